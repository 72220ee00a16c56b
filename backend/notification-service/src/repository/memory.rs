//! In-memory notification store with the same ordering and read semantics as the
//! PostgreSQL repository.

use super::NotificationRepository;
use crate::models::Notification;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use error_types::{ServiceError, ServiceResult};
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<DashMap<Uuid, Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stored rows across all recipients
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[async_trait::async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> ServiceResult<()> {
        match self.notifications.entry(notification.id) {
            Entry::Occupied(_) => Err(ServiceError::conflict("Notification already exists")),
            Entry::Vacant(slot) => {
                slot.insert(notification.clone());
                Ok(())
            }
        }
    }

    async fn list(&self, recipient_id: Uuid, unread_only: bool) -> ServiceResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.recipient_id == recipient_id)
            .filter(|entry| !unread_only || !entry.is_read)
            .map(|entry| entry.value().clone())
            .collect();
        notifications.sort_by_key(|n| Reverse((n.created_at, n.id)));
        Ok(notifications)
    }

    async fn count_unread(&self, recipient_id: Uuid) -> ServiceResult<i64> {
        let count = self
            .notifications
            .iter()
            .filter(|entry| entry.recipient_id == recipient_id && !entry.is_read)
            .count();
        Ok(count as i64)
    }

    async fn mark_read(
        &self,
        notification_id: Uuid,
        recipient_id: Uuid,
    ) -> ServiceResult<Option<Notification>> {
        match self.notifications.get_mut(&notification_id) {
            Some(mut entry) if entry.recipient_id == recipient_id => {
                if !entry.is_read {
                    entry.is_read = true;
                    entry.read_at = Some(Utc::now());
                }
                Ok(Some(entry.value().clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> ServiceResult<u64> {
        let now = Utc::now();
        let mut transitioned = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.recipient_id == recipient_id && !entry.is_read {
                entry.is_read = true;
                entry.read_at = Some(now);
                transitioned += 1;
            }
        }
        Ok(transitioned)
    }
}
