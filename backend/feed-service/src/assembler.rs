//! Feed assembly
//!
//! Candidate authors are the user's followees plus the user. Posts come back from
//! the store in `(created_at DESC, id DESC)` order, which is total, so offset pages
//! never overlap or skip even when timestamps collide. A follow/unfollow between two
//! page requests can shift the candidate set; that read skew is accepted.

use crate::models::FeedPage;
use crate::store::PostStore;
use error_types::{ServiceError, ServiceResult};
use graph_service::GraphRepositoryTrait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    /// Page size used when the caller does not pass one
    pub default_page_size: u32,
    /// Larger requested sizes are clamped to this
    pub max_page_size: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

#[derive(Clone)]
pub struct FeedAssembler {
    graph: Arc<dyn GraphRepositoryTrait>,
    posts: Arc<dyn PostStore>,
    settings: FeedSettings,
}

impl FeedAssembler {
    pub fn new(
        graph: Arc<dyn GraphRepositoryTrait>,
        posts: Arc<dyn PostStore>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            graph,
            posts,
            settings,
        }
    }

    pub fn settings(&self) -> FeedSettings {
        self.settings
    }

    /// Resolve the effective page size, or reject a zero size
    pub fn page_size(&self, requested: Option<u32>) -> ServiceResult<u32> {
        match requested {
            None => Ok(self.settings.default_page_size),
            Some(0) => Err(ServiceError::validation("Page size must be a positive integer")),
            Some(size) => Ok(size.min(self.settings.max_page_size)),
        }
    }

    /// Zero-based `page`; out-of-range pages are empty, not errors
    pub async fn get_feed(
        &self,
        user_id: Uuid,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<FeedPage> {
        let size = self.page_size(size)?;

        let offset = match (page as u64).checked_mul(size as u64) {
            Some(offset) if offset <= i64::MAX as u64 => offset as i64,
            _ => return Ok(FeedPage::empty(page, size)),
        };

        let mut authors: BTreeSet<Uuid> = self
            .graph
            .get_following(user_id)
            .await?
            .into_iter()
            .collect();
        authors.insert(user_id);
        let authors: Vec<Uuid> = authors.into_iter().collect();

        // One extra row tells us whether another page exists
        let mut posts = self
            .posts
            .find_by_authors(&authors, offset, size as i64 + 1)
            .await?;
        let has_more = posts.len() > size as usize;
        posts.truncate(size as usize);

        debug!(
            user = %user_id,
            authors = authors.len(),
            page,
            size,
            returned = posts.len(),
            has_more,
            "Feed assembled"
        );

        Ok(FeedPage {
            posts,
            page,
            size,
            has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryPostStore;
    use graph_service::InMemoryGraphRepository;

    fn assembler(settings: FeedSettings) -> FeedAssembler {
        FeedAssembler::new(
            Arc::new(InMemoryGraphRepository::new()),
            Arc::new(InMemoryPostStore::new()),
            settings,
        )
    }

    #[test]
    fn test_page_size_defaults_and_clamps() {
        let feed = assembler(FeedSettings::default());

        assert_eq!(feed.page_size(None).unwrap(), 10);
        assert_eq!(feed.page_size(Some(25)).unwrap(), 25);
        assert_eq!(feed.page_size(Some(5000)).unwrap(), 100);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let feed = assembler(FeedSettings::default());
        assert!(matches!(
            feed.page_size(Some(0)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_user_without_posts_gets_empty_page() {
        let feed = assembler(FeedSettings::default());
        let page = feed.get_feed(Uuid::new_v4(), 0, None).await.unwrap();

        assert!(page.posts.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.size, 10);
    }

    #[tokio::test]
    async fn test_overflowing_offset_is_empty_page() {
        let feed = assembler(FeedSettings {
            default_page_size: 10,
            max_page_size: u32::MAX,
        });
        let page = feed
            .get_feed(Uuid::new_v4(), u32::MAX, Some(u32::MAX))
            .await
            .unwrap();
        assert!(page.posts.is_empty());
    }
}
