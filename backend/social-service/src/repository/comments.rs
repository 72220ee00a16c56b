use crate::domain::models::Comment;
use dashmap::DashMap;
use error_types::ServiceResult;
use sqlx::PgPool;
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> ServiceResult<Comment>;

    /// Newest first, ties broken by id descending
    async fn list_for_post(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>>;
}

/// Repository for Comment operations
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> ServiceResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, post_id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, post_id, author_id, content, created_at, updated_at
            "#,
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_for_post(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<DashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> ServiceResult<Comment> {
        self.comments.insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn list_for_post(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.post_id == post_id)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(comments)
    }
}
