use super::{actor_handle, notify_after_commit};
use crate::domain::models::{Comment, MAX_COMMENT_LENGTH};
use crate::repository::CommentRepository;
use error_types::{ServiceError, ServiceResult};
use feed_service::{PostStore, PostSummary};
use graph_service::UserDirectory;
use notification_service::{NotificationDispatcher, NotificationType};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserDirectory>,
    notifications: NotificationDispatcher,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserDirectory>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
            notifications,
        }
    }

    async fn require_post(&self, post_id: Uuid) -> ServiceResult<PostSummary> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post not found"))
    }

    /// Store a comment and notify the post author unless they wrote it
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> ServiceResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Comment content is required"));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ServiceError::validation(format!(
                "Comment exceeds {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        let post = self.require_post(post_id).await?;
        let handle = actor_handle(self.users.as_ref(), author_id).await?;

        let comment = self
            .comments
            .create_comment(&Comment::new(post_id, author_id, content))
            .await?;
        info!(comment_id = %comment.id, post = %post_id, author = %author_id, "Comment created");

        if post.author_id != author_id {
            notify_after_commit(
                &self.notifications,
                post.author_id,
                author_id,
                Some(post_id),
                NotificationType::Comment,
                format!("{} commented on your post", handle),
            )
            .await;
        }

        Ok(comment)
    }

    /// Newest first
    pub async fn list_comments(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        self.require_post(post_id).await?;
        self.comments.list_for_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCommentRepository;
    use feed_service::InMemoryPostStore;
    use graph_service::InMemoryUserDirectory;
    use notification_service::{
        ConnectionManager, InMemoryNotificationRepository, DEFAULT_PUSH_TIMEOUT,
    };

    fn service() -> CommentService {
        CommentService::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::new(InMemoryPostStore::new()),
            Arc::new(InMemoryUserDirectory::new()),
            NotificationDispatcher::new(
                Arc::new(InMemoryNotificationRepository::new()),
                Arc::new(ConnectionManager::new()),
                DEFAULT_PUSH_TIMEOUT,
            ),
        )
    }

    #[tokio::test]
    async fn test_blank_comment_rejected_before_lookup() {
        let err = service()
            .add_comment(Uuid::new_v4(), Uuid::new_v4(), "  \n ")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_overlong_comment_rejected() {
        let content = "x".repeat(MAX_COMMENT_LENGTH + 1);
        let err = service()
            .add_comment(Uuid::new_v4(), Uuid::new_v4(), &content)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_is_not_found() {
        let err = service()
            .add_comment(Uuid::new_v4(), Uuid::new_v4(), "nice")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
