use super::{actor_handle, notify_after_commit};
use error_types::{ServiceError, ServiceResult};
use graph_service::{RelationshipService, UserSummary};
use notification_service::{NotificationDispatcher, NotificationType};
use uuid::Uuid;

/// Follow/unfollow entry point that also tells the followee
#[derive(Clone)]
pub struct FollowService {
    relationships: RelationshipService,
    notifications: NotificationDispatcher,
}

impl FollowService {
    pub fn new(relationships: RelationshipService, notifications: NotificationDispatcher) -> Self {
        Self {
            relationships,
            notifications,
        }
    }

    pub fn relationships(&self) -> &RelationshipService {
        &self.relationships
    }

    /// Create the follow edge, then notify the followee
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<UserSummary> {
        if follower_id == followee_id {
            return Err(ServiceError::validation("Cannot follow yourself"));
        }

        let handle = actor_handle(self.relationships.users().as_ref(), follower_id).await?;
        let followee = self
            .relationships
            .follow_user(follower_id, followee_id)
            .await?;

        notify_after_commit(
            &self.notifications,
            followee_id,
            follower_id,
            None,
            NotificationType::Follow,
            format!("{} started following you", handle),
        )
        .await;

        Ok(followee)
    }

    /// Unfollowing is silent
    pub async fn unfollow(
        &self,
        follower_id: Uuid,
        followee_id: Uuid,
    ) -> ServiceResult<UserSummary> {
        self.relationships
            .unfollow_user(follower_id, followee_id)
            .await
    }
}
