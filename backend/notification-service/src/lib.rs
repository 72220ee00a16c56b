pub mod metrics;
pub mod models;
pub mod realtime;
pub mod repository;
pub mod services;
pub mod websocket;

pub use models::{CreateNotificationRequest, Notification, NotificationType};
pub use realtime::{PublishOutcome, PushError, RealtimeChannel, RedisRealtimeChannel};
pub use repository::{
    InMemoryNotificationRepository, NotificationRepository, PostgresNotificationRepository,
};
pub use services::{NotificationDispatcher, DEFAULT_PUSH_TIMEOUT};
pub use websocket::{ConnectionManager, WebSocketMessage};
