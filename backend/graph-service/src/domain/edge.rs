use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 關係邊（有向邊）: follower -> followee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Edge {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn new_follow(follower_id: Uuid, followee_id: Uuid) -> Self {
        Self {
            follower_id,
            followee_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.follower_id == self.followee_id
    }
}

/// Follower / following counts for a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub user_id: Uuid,
    pub followers_count: i64,
    pub following_count: i64,
}

impl GraphStats {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            followers_count: 0,
            following_count: 0,
        }
    }
}
