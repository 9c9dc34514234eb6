use crate::domain::model::{ContentKey, InboundEvent, OutboundMessage, Shelf, SummaryDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-through access to the static content files.
pub trait ContentStore: Send + Sync {
    fn lookup(&self, shelf: Shelf, key: &ContentKey) -> Result<String>;
    fn lookup_summary(&self, shelf: Shelf, key: &ContentKey) -> Result<SummaryDocument>;
}

#[async_trait]
pub trait Paraphraser: Send + Sync {
    async fn paraphrase(&self, text: &str) -> Result<String>;
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
    async fn acknowledge(&self, callback_id: &str) -> Result<()>;
}

/// Inbound side of the transport. Implementations track their own cursor.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn next_events(&self) -> Result<Vec<InboundEvent>>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for std::sync::Arc<T> {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        (**self).send(message).await
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<()> {
        (**self).acknowledge(callback_id).await
    }
}
