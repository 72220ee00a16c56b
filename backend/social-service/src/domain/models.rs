use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted comment, in characters
pub const MAX_COMMENT_LENGTH: usize = 280;

pub const DEFAULT_LIKERS_PAGE_SIZE: u32 = 10;
pub const MAX_LIKERS_PAGE_SIZE: u32 = 100;

/// Like entity - represents a user liking a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Like count response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeCount {
    pub post_id: Uuid,
    pub count: i64,
}

/// Like count plus whether the caller is among the likers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    pub post_id: Uuid,
    pub like_count: i64,
    pub liked_by_current_user: bool,
}

/// One entry of a post's liker listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liker {
    pub user_id: Uuid,
    pub username: String,
    pub liked_at: DateTime<Utc>,
}
