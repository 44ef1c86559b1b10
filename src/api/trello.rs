use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::TargetList;
use crate::error::ApiError;

const TRELLO_API: &str = "https://api.trello.com/1";

/// Client for the Trello REST API. Authenticates with key/token query
/// parameters on every request.
pub struct Client {
    api_key: String,
    token: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(api_key: String, token: String) -> Self {
        Self {
            api_key,
            token,
            client: reqwest::Client::new(),
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.api_key), ("token", &self.token)]
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let resp = req.query(&self.auth_params()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if status != StatusCode::OK {
            return Err(status_error(status, &body));
        }
        Ok(body.to_vec())
    }

    pub async fn boards(&self) -> Result<Vec<Board>, ApiError> {
        let body = self
            .send(self.client.get(format!("{TRELLO_API}/members/me/boards")))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn lists(&self, board: &str) -> Result<Vec<List>, ApiError> {
        let body = self
            .send(self.client.get(format!("{TRELLO_API}/boards/{board}/lists")))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn cards(&self, list: &str) -> Result<Vec<Card>, ApiError> {
        let body = self
            .send(self.client.get(format!("{TRELLO_API}/lists/{list}/cards")))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn new_card(
        &self,
        list: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<Card, ApiError> {
        let payload = serde_json::json!({
            "idList": list,
            "name": name,
            "desc": desc,
            "idLabels": labels,
        });
        let body = self
            .send(self.client.post(format!("{TRELLO_API}/cards")).json(&payload))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn update_card(
        &self,
        card: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<Card, ApiError> {
        let payload = serde_json::json!({
            "name": name,
            "desc": desc,
            "idLabels": labels,
        });
        let body = self
            .send(
                self.client
                    .put(format!("{TRELLO_API}/cards/{card}"))
                    .json(&payload),
            )
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn delete_card(&self, card: &str) -> Result<(), ApiError> {
        self.send(self.client.delete(format!("{TRELLO_API}/cards/{card}")))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TargetList for Client {
    async fn cards(&self, list: &str) -> Result<Vec<Card>, ApiError> {
        self.cards(list).await
    }

    async fn create(
        &self,
        list: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<Card, ApiError> {
        self.new_card(list, name, desc, labels).await
    }

    async fn update(
        &self,
        card: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<Card, ApiError> {
        self.update_card(card, name, desc, labels).await
    }

    async fn delete(&self, card: &str) -> Result<(), ApiError> {
        self.delete_card(card).await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub id_labels: Vec<String>,
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body);
    let message = match text.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        m => m.to_string(),
    };
    ApiError::Status {
        service: "trello",
        status,
        message,
    }
}
