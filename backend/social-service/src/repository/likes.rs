use crate::domain::models::Like;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use error_types::{ServiceError, ServiceResult};
use sqlx::PgPool;
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;

/// Storage for likes; at most one like per (user, post), enforced atomically
#[async_trait::async_trait]
pub trait LikeRepository: Send + Sync {
    /// Insert a like, or fail with `Conflict` if the user already liked the post
    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Like>;

    /// Returns false if there was no like to delete
    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool>;

    async fn count_likes(&self, post_id: Uuid) -> ServiceResult<i64>;

    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool>;

    /// Likes on a post, newest first with id as tiebreaker
    async fn list_likers(&self, post_id: Uuid, offset: i64, limit: i64) -> ServiceResult<Vec<Like>>;
}

/// Repository for Like operations
#[derive(Clone)]
pub struct PostgresLikeRepository {
    pool: PgPool,
}

impl PostgresLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Like> {
        let like = sqlx::query_as::<_, Like>(
            r#"
            INSERT INTO likes (id, user_id, post_id, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, post_id) DO NOTHING
            RETURNING id, user_id, post_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        like.ok_or_else(|| ServiceError::conflict("Post already liked"))
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_likes(&self, post_id: Uuid) -> ServiceResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_likers(&self, post_id: Uuid, offset: i64, limit: i64) -> ServiceResult<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, user_id, post_id, created_at
            FROM likes
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryLikeRepository {
    likes: Arc<DashMap<(Uuid, Uuid), Like>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Like> {
        match self.likes.entry((user_id, post_id)) {
            Entry::Occupied(_) => Err(ServiceError::conflict("Post already liked")),
            Entry::Vacant(slot) => {
                let like = Like::new(user_id, post_id);
                slot.insert(like.clone());
                Ok(like)
            }
        }
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.likes.remove(&(user_id, post_id)).is_some())
    }

    async fn count_likes(&self, post_id: Uuid) -> ServiceResult<i64> {
        Ok(self.likes.iter().filter(|e| e.key().1 == post_id).count() as i64)
    }

    async fn has_liked(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<bool> {
        Ok(self.likes.contains_key(&(user_id, post_id)))
    }

    async fn list_likers(&self, post_id: Uuid, offset: i64, limit: i64) -> ServiceResult<Vec<Like>> {
        let mut likes: Vec<Like> = self
            .likes
            .iter()
            .filter(|e| e.key().1 == post_id)
            .map(|e| e.value().clone())
            .collect();
        likes.sort_by_key(|like| Reverse((like.created_at, like.id)));

        Ok(likes
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
