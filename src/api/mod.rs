pub mod deck;
pub mod trello;

use async_trait::async_trait;

use crate::error::ApiError;

/// Read side of a sync group: the authoritative card list in a Deck stack.
#[async_trait]
pub trait SourceStack: Send + Sync {
    async fn cards(&self, board: i64, stack: i64) -> Result<Vec<deck::Card>, ApiError>;
}

/// Write side of a sync group: the Trello list mirroring the source.
///
/// Each call is one network mutation with no idempotency key; a retried
/// create can duplicate a card.
#[async_trait]
pub trait TargetList: Send + Sync {
    async fn cards(&self, list: &str) -> Result<Vec<trello::Card>, ApiError>;
    async fn create(
        &self,
        list: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<trello::Card, ApiError>;
    async fn update(
        &self,
        card: &str,
        name: &str,
        desc: &str,
        labels: &[String],
    ) -> Result<trello::Card, ApiError>;
    async fn delete(&self, card: &str) -> Result<(), ApiError>;
}
