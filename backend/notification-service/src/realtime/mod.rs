//! Real-time delivery boundary
//!
//! The dispatcher only sees [`RealtimeChannel`]. Delivery carries no guarantee and
//! does not require a subscriber to be present.

mod local;
mod pubsub;

pub use pubsub::{notification_topic, RedisRealtimeChannel};

use crate::websocket::WebSocketMessage;
use thiserror::Error;
use uuid::Uuid;

/// What happened to a single publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Accepted by at least this many live receivers
    Delivered(usize),
    /// Nobody is listening for the recipient right now
    NoSubscriber,
}

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Failed to serialize realtime payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Realtime transport error: {0}")]
    Transport(String),
}

#[async_trait::async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Publish `message` to whatever is listening for `recipient_id`
    async fn publish(
        &self,
        recipient_id: Uuid,
        message: &WebSocketMessage,
    ) -> Result<PublishOutcome, PushError>;

    /// Transport name for logs
    fn name(&self) -> &'static str;
}
