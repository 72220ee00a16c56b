use super::PostStore;
use crate::models::PostSummary;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use error_types::ServiceResult;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    posts: Arc<DashMap<Uuid, PostSummary>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, post: PostSummary) {
        self.posts.insert(post.id, post);
    }

    /// Store a new post by `author_id` at `created_at` and return it
    pub fn publish(
        &self,
        author_id: Uuid,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> PostSummary {
        let post = PostSummary {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            created_at,
        };
        self.insert(post.clone());
        post
    }
}

#[async_trait::async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<PostSummary>> {
        if author_ids.is_empty() || limit <= 0 || offset < 0 {
            return Ok(Vec::new());
        }

        let authors: HashSet<&Uuid> = author_ids.iter().collect();
        let mut posts: Vec<PostSummary> = self
            .posts
            .iter()
            .filter(|entry| authors.contains(&entry.value().author_id))
            .map(|entry| entry.value().clone())
            .collect();
        posts.sort_by_key(|post| Reverse((post.created_at, post.id)));

        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<PostSummary>> {
        Ok(self.posts.get(&post_id).map(|entry| entry.value().clone()))
    }
}
