use super::{PublishOutcome, PushError, RealtimeChannel};
use crate::websocket::WebSocketMessage;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;
use uuid::Uuid;

/// Pub/sub topic a recipient's notifications are published on
pub fn notification_topic(recipient_id: Uuid) -> String {
    format!("notifications:{}", recipient_id)
}

/// Publishes notifications to Redis for gateway nodes subscribed per recipient
#[derive(Clone)]
pub struct RedisRealtimeChannel {
    conn: ConnectionManager,
}

impl RedisRealtimeChannel {
    pub async fn connect(redis_url: &str) -> redis::RedisResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected realtime channel to Redis");
        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl RealtimeChannel for RedisRealtimeChannel {
    async fn publish(
        &self,
        recipient_id: Uuid,
        message: &WebSocketMessage,
    ) -> Result<PublishOutcome, PushError> {
        let payload = message.to_json()?;
        let mut conn = self.conn.clone();

        // PUBLISH replies with the number of subscribers that got the message
        let receivers: i64 = conn
            .publish(notification_topic(recipient_id), payload)
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        Ok(match receivers {
            n if n > 0 => PublishOutcome::Delivered(n as usize),
            _ => PublishOutcome::NoSubscriber,
        })
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_topic_is_scoped_to_recipient() {
        let recipient = Uuid::new_v4();
        assert_eq!(
            notification_topic(recipient),
            format!("notifications:{}", recipient)
        );
    }
}
