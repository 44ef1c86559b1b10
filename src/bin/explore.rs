//! Prints the boards and stacks/lists visible to the configured credentials,
//! with the ids to paste into sync-group definitions.

use anyhow::{bail, Result};

use decksync::api::{deck, trello};
use decksync::config::{self, Config};

enum Service {
    Deck,
    Trello,
}

fn parse_service(arg: &str) -> Option<Service> {
    match arg.to_lowercase().as_str() {
        "deck" | "nextcloud" => Some(Service::Deck),
        "trello" => Some(Service::Trello),
        _ => None,
    }
}

async fn show_deck(config: &Config) -> Result<()> {
    let client = deck::Client::new(
        config.nextcloud.api.clone(),
        &config.nextcloud.username,
        &config.nextcloud.password,
    );
    for board in client.boards().await? {
        println!("{} [{}]", board.title, board.id);
        for stack in client.stacks(board.id).await? {
            println!("- {} [{}]", stack.title, stack.id);
        }
    }
    Ok(())
}

async fn show_trello(config: &Config) -> Result<()> {
    let client = trello::Client::new(config.trello.key.clone(), config.trello.token.clone());
    for board in client.boards().await? {
        println!("{} [{}]", board.name, board.id);
        for list in client.lists(&board.id).await? {
            println!("- {} [{}]", list.name, list.id);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;

    let args: Vec<String> = std::env::args().collect();
    match args.get(1) {
        None => {
            println!("[Trello]");
            show_trello(&config).await?;
            println!();
            println!("[Nextcloud]");
            show_deck(&config).await?;
        }
        Some(arg) => match parse_service(arg) {
            Some(Service::Deck) => show_deck(&config).await?,
            Some(Service::Trello) => show_trello(&config).await?,
            None => bail!("unknown service '{arg}' (expected 'deck' or 'trello')"),
        },
    }

    Ok(())
}
