mod memory;
mod postgres;

pub use memory::InMemoryPostStore;
pub use postgres::PostgresPostStore;

use crate::models::PostSummary;
use error_types::ServiceResult;
use uuid::Uuid;

/// Read access to posts. The feed never writes posts.
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Posts by any of `author_ids`, ordered by `(created_at DESC, id DESC)`
    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<PostSummary>>;

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<PostSummary>>;
}
