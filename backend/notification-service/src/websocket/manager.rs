/// WebSocket Connection Manager
///
/// Tracks live WebSocket sessions per user. A user may hold several sessions at
/// once; each one is addressed by its own connection id so a closing session only
/// removes itself.

use super::WebSocketMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Type alias for WebSocket message sender
pub type WebSocketSender = mpsc::UnboundedSender<WebSocketMessage>;

#[derive(Clone, Default)]
pub struct ConnectionManager {
    /// user_id -> (connection_id, sender) for each live session
    connections: Arc<RwLock<HashMap<Uuid, Vec<(Uuid, WebSocketSender)>>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for `user_id` and return its connection id
    pub async fn subscribe(&self, user_id: Uuid, sender: WebSocketSender) -> Uuid {
        let connection_id = Uuid::new_v4();
        let mut connections = self.connections.write().await;
        connections
            .entry(user_id)
            .or_default()
            .push((connection_id, sender));
        connection_id
    }

    /// Remove one session; the user entry goes away with its last session
    pub async fn unsubscribe(&self, user_id: Uuid, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if let Some(senders) = connections.get_mut(&user_id) {
            senders.retain(|(id, _)| *id != connection_id);
            if senders.is_empty() {
                connections.remove(&user_id);
            }
        }
    }

    /// Send to every live session of `user_id` and return how many accepted it.
    ///
    /// Senders whose receiver is gone are pruned on the way.
    pub async fn send_notification(&self, user_id: Uuid, message: WebSocketMessage) -> usize {
        let mut connections = self.connections.write().await;
        let Some(senders) = connections.get_mut(&user_id) else {
            return 0;
        };

        senders.retain(|(_, sender)| !sender.is_closed());
        let delivered = senders
            .iter()
            .filter(|(_, sender)| sender.send(message.clone()).is_ok())
            .count();

        if senders.is_empty() {
            connections.remove(&user_id);
        }
        delivered
    }

    /// Get the number of active connections for a user
    pub async fn connection_count(&self, user_id: Uuid) -> usize {
        let connections = self.connections.read().await;
        connections.get(&user_id).map(|v| v.len()).unwrap_or(0)
    }

    /// Get the total number of active connections
    pub async fn total_connections(&self) -> usize {
        let connections = self.connections.read().await;
        connections.values().map(|v| v.len()).sum()
    }
}
