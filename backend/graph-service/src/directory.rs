//! User directory
//!
//! Read-only access to account identities and privacy flags. The identity service
//! owns the `users` table; this crate only reads it.

use crate::domain::user::User;
use dashmap::DashMap;
use error_types::ServiceResult;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> ServiceResult<Option<User>>;

    /// Batch lookup; unknown ids are skipped, order is unspecified
    async fn find_by_ids(&self, user_ids: &[Uuid]) -> ServiceResult<Vec<User>>;

    async fn exists(&self, user_id: Uuid) -> ServiceResult<bool> {
        Ok(self.find_by_id(user_id).await?.is_some())
    }
}

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, is_private FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_ids(&self, user_ids: &[Uuid]) -> ServiceResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, is_private FROM users WHERE id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn exists(&self, user_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<DashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Register a fresh account and return it
    pub fn register(&self, username: &str, is_private: bool) -> User {
        let user = User::new(Uuid::new_v4(), username, is_private);
        self.insert(user.clone());
        user
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> ServiceResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn find_by_ids(&self, user_ids: &[Uuid]) -> ServiceResult<Vec<User>> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|entry| entry.value().clone()))
            .collect())
    }
}
