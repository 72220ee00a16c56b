use crate::domain::edge::{Edge, GraphStats};
use error_types::ServiceResult;
use uuid::Uuid;

/// Storage boundary for the directed follow graph.
///
/// Implementations must enforce at most one edge per ordered pair atomically: a
/// concurrent duplicate `create_follow` surfaces as `ServiceError::Conflict`, never as
/// a second row.
#[async_trait::async_trait]
pub trait GraphRepositoryTrait: Send + Sync {
    /// Insert a follow edge, or fail with `Conflict` if it already exists
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<Edge>;

    /// Delete a follow edge; returns false if there was nothing to delete
    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool>;

    /// Check if follower is following followee
    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool>;

    /// Users that `user_id` follows, ascending by id
    async fn get_following(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>>;

    /// Users following `user_id`, ascending by id
    async fn get_followers(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>>;

    async fn get_stats(&self, user_id: Uuid) -> ServiceResult<GraphStats>;

    /// Health check (optional)
    async fn health_check(&self) -> ServiceResult<()> {
        Ok(())
    }
}
