use chrono::{DateTime, Utc};
use error_types::ServiceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Notification type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    /// User liked a post
    Like,
    /// User commented on a post
    Comment,
    /// User started following
    Follow,
}

impl NotificationType {
    /// Stored and rendered form
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Like => "LIKE",
            NotificationType::Comment => "COMMENT",
            NotificationType::Follow => "FOLLOW",
        }
    }
}

impl FromStr for NotificationType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LIKE" => Ok(NotificationType::Like),
            "COMMENT" => Ok(NotificationType::Comment),
            "FOLLOW" => Ok(NotificationType::Follow),
            other => Err(ServiceError::Persistence(format!(
                "Unknown notification type in storage: {}",
                other
            ))),
        }
    }
}

/// Core notification model
///
/// `is_read` only ever moves from false to true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,

    /// Recipient user ID
    pub recipient_id: Uuid,

    /// User whose action triggered the notification
    pub actor_id: Uuid,

    /// Post the event refers to; None for follows
    pub subject_id: Option<Uuid>,

    pub notification_type: NotificationType,

    pub message: String,

    pub is_read: bool,

    /// Timestamp when marked as read
    pub read_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification for a new event
    pub fn from_request(req: CreateNotificationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id: req.recipient_id,
            actor_id: req.actor_id,
            subject_id: req.subject_id,
            notification_type: req.notification_type,
            message: req.message,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Input of `NotificationDispatcher::notify`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateNotificationRequest {
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub subject_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub message: String,
}
