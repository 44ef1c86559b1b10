use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use decksync::api::{deck, trello};
use decksync::config::{self, Config};
use decksync::sync;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;
    let _guard = init_logging(&config)?;

    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval * 60));
    let config = Arc::new(config);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => spawn_groups(&config),
            result = &mut shutdown => {
                result?;
                break;
            }
        }
    }

    info!("exiting");
    Ok(())
}

/// Fan out one fire-and-forget reconciliation task per recognized sync group.
/// Groups share no state; a pass that outlives the interval may overlap the
/// next run of the same group and converge on a later tick.
fn spawn_groups(config: &Arc<Config>) {
    info!("synchronizing now");
    for (index, group) in config.sync.iter().enumerate() {
        match group.kind.as_str() {
            "trello" => {
                let config = Arc::clone(config);
                tokio::spawn(async move {
                    let group = &config.sync[index];
                    let source = deck::Client::new(
                        config.nextcloud.api.clone(),
                        &config.nextcloud.username,
                        &config.nextcloud.password,
                    );
                    let target =
                        trello::Client::new(config.trello.key.clone(), config.trello.token.clone());
                    sync::run_group(group, &source, &target).await;
                });
            }
            other => {
                warn!(group = %group.name, kind = %other, "unknown sync type, skipping");
            }
        }
    }
}

fn init_logging(config: &Config) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let default = if config.debug {
        "decksync=debug"
    } else {
        "decksync=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let stdout = tracing_subscriber::fmt::layer();

    match &config.log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stdout).init();
            Ok(None)
        }
    }
}

/// Resolves on SIGINT or SIGTERM. Ticks stop; in-flight group tasks are
/// abandoned when the process returns, with no drain.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for ctrl-c")?;
            }
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    Ok(())
}
