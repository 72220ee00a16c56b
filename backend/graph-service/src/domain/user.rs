use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of an account, owned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub is_private: bool,
}

impl User {
    pub fn new(id: Uuid, username: impl Into<String>, is_private: bool) -> Self {
        Self {
            id,
            username: username.into(),
            is_private,
        }
    }
}

/// Public identity returned by follow/unfollow and follower listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
