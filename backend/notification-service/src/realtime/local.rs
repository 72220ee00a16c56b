use super::{PublishOutcome, PushError, RealtimeChannel};
use crate::websocket::{ConnectionManager, WebSocketMessage};
use uuid::Uuid;

/// In-process delivery to the recipient's WebSocket sessions on this node
#[async_trait::async_trait]
impl RealtimeChannel for ConnectionManager {
    async fn publish(
        &self,
        recipient_id: Uuid,
        message: &WebSocketMessage,
    ) -> Result<PublishOutcome, PushError> {
        match self.send_notification(recipient_id, message.clone()).await {
            0 => Ok(PublishOutcome::NoSubscriber),
            n => Ok(PublishOutcome::Delivered(n)),
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_publish_reports_subscriber_presence() {
        let hub = ConnectionManager::new();
        let user_id = Uuid::new_v4();

        let outcome = hub.publish(user_id, &WebSocketMessage::ping()).await.unwrap();
        assert_eq!(outcome, PublishOutcome::NoSubscriber);

        let (tx, _rx) = mpsc::unbounded_channel();
        hub.subscribe(user_id, tx).await;
        let outcome = hub.publish(user_id, &WebSocketMessage::ping()).await.unwrap();
        assert_eq!(outcome, PublishOutcome::Delivered(1));
    }
}
