/// WebSocket message types for real-time notifications
use crate::models::Notification;
use serde::{Deserialize, Serialize};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebSocketMessage {
    /// Server pushes a notification to client
    Notification(Notification),

    /// Heartbeat/ping from server
    Ping { timestamp: i64 },

    /// Client responds to ping
    Pong { timestamp: i64 },

    /// Error message from server
    Error { code: String, message: String },

    /// Connection established confirmation
    Connected { connection_id: String, timestamp: i64 },
}

impl WebSocketMessage {
    pub fn notification(notification: Notification) -> Self {
        WebSocketMessage::Notification(notification)
    }

    /// Create a ping message
    pub fn ping() -> Self {
        WebSocketMessage::Ping {
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn pong(timestamp: i64) -> Self {
        WebSocketMessage::Pong { timestamp }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        WebSocketMessage::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn connected(connection_id: impl Into<String>) -> Self {
        WebSocketMessage::Connected {
            connection_id: connection_id.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateNotificationRequest, NotificationType};
    use uuid::Uuid;

    #[test]
    fn test_notification_payload_is_tagged_and_flat() {
        let notification = Notification::from_request(CreateNotificationRequest {
            recipient_id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            subject_id: None,
            notification_type: NotificationType::Follow,
            message: "carol started following you".to_string(),
        });

        let json = WebSocketMessage::notification(notification.clone())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "notification");
        assert_eq!(value["notification_type"], "FOLLOW");
        assert_eq!(value["recipient_id"], notification.recipient_id.to_string());
        assert_eq!(value["is_read"], false);
    }

    #[test]
    fn test_pong_parses_from_client_text() {
        let msg = WebSocketMessage::from_json(r#"{"type":"pong","timestamp":42}"#).unwrap();
        assert_eq!(msg, WebSocketMessage::pong(42));
    }

    #[test]
    fn test_error_message() {
        let json = WebSocketMessage::error("UNSUPPORTED", "Clients may only send pong")
            .to_json()
            .unwrap();
        assert!(json.contains("\"type\":\"error\""));
    }
}
