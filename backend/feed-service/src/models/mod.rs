use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only projection of a post, supplied by the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One page of a user's feed, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub size: u32,
    pub has_more: bool,
}

impl FeedPage {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            posts: Vec::new(),
            page,
            size,
            has_more: false,
        }
    }
}
