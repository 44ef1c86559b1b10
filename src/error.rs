use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes shared by both API clients.
///
/// Authentication and not-found failures arrive as `Status` values carrying
/// the response code; callers that care can match on it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} API: got {status} - {message}")]
    Status {
        service: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
