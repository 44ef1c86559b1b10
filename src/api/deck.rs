use async_trait::async_trait;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;

use super::SourceStack;
use crate::error::ApiError;

/// Client for the Nextcloud Deck API.
pub struct Client {
    api: String,
    auth_header: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(api: String, username: &str, password: &str) -> Self {
        let creds = format!("{username}:{password}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        Self {
            api,
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let resp = req
            .header("Authorization", &self.auth_header)
            .header("OCS-APIRequest", "true")
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if status != StatusCode::OK {
            return Err(status_error(status, &body));
        }
        Ok(body.to_vec())
    }

    pub async fn boards(&self) -> Result<Vec<Board>, ApiError> {
        let body = self
            .send(self.client.get(format!("{}/boards", self.api)))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn stacks(&self, board: i64) -> Result<Vec<Stack>, ApiError> {
        let body = self
            .send(self.client.get(format!("{}/boards/{board}/stacks", self.api)))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn stack(&self, board: i64, stack: i64) -> Result<Stack, ApiError> {
        let body = self
            .send(
                self.client
                    .get(format!("{}/boards/{board}/stacks/{stack}", self.api)),
            )
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SourceStack for Client {
    async fn cards(&self, board: i64, stack: i64) -> Result<Vec<Card>, ApiError> {
        Ok(self.stack(board, stack).await?.cards)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stack {
    pub id: i64,
    pub title: String,
    /// Absent from the response when the stack is empty.
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    /// Null on the wire for cards without one; compared as empty.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
    ApiError::Status {
        service: "deck",
        status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_parses_message_field() {
        let err = status_error(StatusCode::FORBIDDEN, br#"{"message":"no board access"}"#);
        assert_eq!(
            err.to_string(),
            "deck API: got 403 Forbidden - no board access"
        );
    }

    #[test]
    fn status_error_falls_back_to_status_reason() {
        let err = status_error(StatusCode::NOT_FOUND, b"<html>gateway</html>");
        assert_eq!(err.to_string(), "deck API: got 404 Not Found - Not Found");
    }

    #[test]
    fn card_description_may_be_null() {
        let card: Card =
            serde_json::from_str(r#"{"id":7,"title":"Fix login","description":null}"#).unwrap();
        assert_eq!(card.description, None);

        let card: Card = serde_json::from_str(r#"{"id":8,"title":"Ship it"}"#).unwrap();
        assert_eq!(card.description, None);
    }

    #[test]
    fn stack_cards_default_to_empty() {
        let stack: Stack = serde_json::from_str(r#"{"id":5,"title":"Backlog"}"#).unwrap();
        assert!(stack.cards.is_empty());
    }
}
