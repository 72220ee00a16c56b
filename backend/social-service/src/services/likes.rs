use super::{actor_handle, notify_after_commit};
use crate::domain::models::{
    Like, LikeCount, LikeStatus, Liker, DEFAULT_LIKERS_PAGE_SIZE, MAX_LIKERS_PAGE_SIZE,
};
use crate::repository::LikeRepository;
use error_types::{ServiceError, ServiceResult};
use feed_service::{PostStore, PostSummary};
use graph_service::UserDirectory;
use notification_service::{NotificationDispatcher, NotificationType};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct LikeService {
    likes: Arc<dyn LikeRepository>,
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserDirectory>,
    notifications: NotificationDispatcher,
}

impl LikeService {
    pub fn new(
        likes: Arc<dyn LikeRepository>,
        posts: Arc<dyn PostStore>,
        users: Arc<dyn UserDirectory>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            likes,
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

    /// Like a post and notify its author, unless the author liked their own post
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Like> {
        let post = self.require_post(post_id).await?;
        let handle = actor_handle(self.users.as_ref(), user_id).await?;

        let like = self.likes.create_like(user_id, post_id).await?;
        info!(user = %user_id, post = %post_id, "Post liked");

        if post.author_id != user_id {
            notify_after_commit(
                &self.notifications,
                post.author_id,
                user_id,
                Some(post_id),
                NotificationType::Like,
                format!("{} liked your post", handle),
            )
            .await;
        }

        Ok(like)
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        self.require_post(post_id).await?;

        if !self.likes.delete_like(user_id, post_id).await? {
            return Err(ServiceError::validation("Post is not liked"));
        }
        info!(user = %user_id, post = %post_id, "Post unliked");
        Ok(())
    }

    pub async fn like_count(&self, post_id: Uuid) -> ServiceResult<LikeCount> {
        self.require_post(post_id).await?;
        let count = self.likes.count_likes(post_id).await?;
        Ok(LikeCount { post_id, count })
    }

    /// Count for the post plus whether `user_id` has liked it
    pub async fn like_status(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<LikeStatus> {
        self.require_post(post_id).await?;
        let like_count = self.likes.count_likes(post_id).await?;
        let liked_by_current_user = self.likes.has_liked(user_id, post_id).await?;

        Ok(LikeStatus {
            post_id,
            like_count,
            liked_by_current_user,
        })
    }

    /// Zero-based page of a post's likers, newest like first
    pub async fn list_likers(
        &self,
        post_id: Uuid,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<Vec<Liker>> {
        let size = match size {
            None => DEFAULT_LIKERS_PAGE_SIZE,
            Some(0) => return Err(ServiceError::validation("Page size must be a positive integer")),
            Some(size) => size.min(MAX_LIKERS_PAGE_SIZE),
        };
        self.require_post(post_id).await?;

        let offset = page as i64 * size as i64;
        let likes = self.likes.list_likers(post_id, offset, size as i64).await?;

        let user_ids: Vec<Uuid> = likes.iter().map(|like| like.user_id).collect();
        let usernames: HashMap<Uuid, String> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();

        debug!(post = %post_id, page, size, returned = likes.len(), "Listing likers");

        // Likers whose account vanished are skipped
        Ok(likes
            .into_iter()
            .filter_map(|like| {
                usernames.get(&like.user_id).map(|username| Liker {
                    user_id: like.user_id,
                    username: username.clone(),
                    liked_at: like.created_at,
                })
            })
            .collect())
    }
}
