/// WebSocket real-time notification hub
///
/// Live sessions register a sender with the `ConnectionManager`; the dispatcher
/// pushes `WebSocketMessage::Notification` to every session of the recipient.

pub mod manager;
pub mod messages;

pub use manager::{ConnectionManager, WebSocketSender};
pub use messages::WebSocketMessage;
