use super::PostStore;
use crate::models::PostSummary;
use error_types::ServiceResult;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostStore for PostgresPostStore {
    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<PostSummary>> {
        if author_ids.is_empty() || limit <= 0 {
            return Ok(Vec::new());
        }

        // id breaks timestamp ties so offset pagination stays stable
        let posts = sqlx::query_as::<_, PostSummary>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE author_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Fetched {} posts for {} authors (offset: {}, limit: {})",
            posts.len(),
            author_ids.len(),
            offset,
            limit
        );
        Ok(posts)
    }

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<PostSummary>> {
        let post = sqlx::query_as::<_, PostSummary>(
            "SELECT id, author_id, content, created_at FROM posts WHERE id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }
}
