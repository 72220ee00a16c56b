use super::GraphRepositoryTrait;
use crate::domain::edge::{Edge, GraphStats};
use error_types::{ServiceError, ServiceResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL repository for the social graph (source of truth)
#[derive(Clone)]
pub struct PostgresGraphRepository {
    pool: PgPool,
}

impl PostgresGraphRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GraphRepositoryTrait for PostgresGraphRepository {
    /// The primary key on (follower_id, followee_id) decides the race: the losing
    /// insert returns no row and is reported as a conflict.
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<Edge> {
        let inserted = sqlx::query_as::<_, Edge>(
            r#"
            INSERT INTO follows (follower_id, followee_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            RETURNING follower_id, followee_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(edge) => {
                debug!(
                    "Created FOLLOWS in PostgreSQL: {} -> {}",
                    follower_id, followee_id
                );
                Ok(edge)
            }
            None => Err(ServiceError::conflict("Relationship already exists")),
        }
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool> {
        let affected = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(
            "Deleted FOLLOWS in PostgreSQL: {} -> {} (rows: {})",
            follower_id, followee_id, affected
        );
        Ok(affected > 0)
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn get_following(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let following: Vec<Uuid> = sqlx::query_scalar(
            "SELECT followee_id FROM follows
             WHERE follower_id = $1
             ORDER BY followee_id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(following)
    }

    async fn get_followers(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let followers: Vec<Uuid> = sqlx::query_scalar(
            "SELECT follower_id FROM follows
             WHERE followee_id = $1
             ORDER BY follower_id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(followers)
    }

    async fn get_stats(&self, user_id: Uuid) -> ServiceResult<GraphStats> {
        let (followers_count, following_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(GraphStats {
            user_id,
            followers_count,
            following_count,
        })
    }

    async fn health_check(&self) -> ServiceResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
