mod memory;
mod postgres;

pub use memory::InMemoryNotificationRepository;
pub use postgres::PostgresNotificationRepository;

use crate::models::Notification;
use error_types::ServiceResult;
use uuid::Uuid;

/// Durable storage for notifications.
///
/// Listings are newest first, ties broken by id descending. The read flag is
/// one-way: no method sets it back to false.
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> ServiceResult<()>;

    /// All notifications of a recipient, or only the unread ones
    async fn list(&self, recipient_id: Uuid, unread_only: bool) -> ServiceResult<Vec<Notification>>;

    async fn count_unread(&self, recipient_id: Uuid) -> ServiceResult<i64>;

    /// Mark one notification read. None when it does not exist or belongs to
    /// someone else. An already-read notification is returned unchanged.
    async fn mark_read(
        &self,
        notification_id: Uuid,
        recipient_id: Uuid,
    ) -> ServiceResult<Option<Notification>>;

    /// Returns how many notifications moved from unread to read
    async fn mark_all_read(&self, recipient_id: Uuid) -> ServiceResult<u64>;
}
