pub mod comments;
pub mod follow;
pub mod likes;

pub use comments::CommentService;
pub use follow::FollowService;
pub use likes::LikeService;

use error_types::{ServiceError, ServiceResult};
use graph_service::UserDirectory;
use notification_service::{NotificationDispatcher, NotificationType};
use tracing::error;
use uuid::Uuid;

/// Display handle of the user performing an action
async fn actor_handle(users: &dyn UserDirectory, actor_id: Uuid) -> ServiceResult<String> {
    users
        .find_by_id(actor_id)
        .await?
        .map(|user| user.username)
        .ok_or_else(|| ServiceError::not_found("User not found"))
}

/// Record a notification for an already-committed action.
///
/// The action has succeeded by the time this runs, so a failure to store the
/// notification is logged and not returned to the caller.
async fn notify_after_commit(
    notifications: &NotificationDispatcher,
    recipient_id: Uuid,
    actor_id: Uuid,
    subject_id: Option<Uuid>,
    notification_type: NotificationType,
    message: String,
) {
    if let Err(e) = notifications
        .notify(recipient_id, actor_id, subject_id, notification_type, message)
        .await
    {
        error!(
            recipient = %recipient_id,
            actor = %actor_id,
            kind = notification_type.as_str(),
            error = %e,
            "Failed to record notification"
        );
    }
}
