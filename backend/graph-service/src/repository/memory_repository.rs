//! In-memory graph repository
//!
//! Mirrors the PostgreSQL semantics, including the uniqueness constraint and the
//! self-follow check constraint. Used by tests and local runs without a database.

use super::GraphRepositoryTrait;
use crate::domain::edge::{Edge, GraphStats};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use error_types::{ServiceError, ServiceResult};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryGraphRepository {
    edges: Arc<DashMap<(Uuid, Uuid), Edge>>,
}

impl InMemoryGraphRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[async_trait::async_trait]
impl GraphRepositoryTrait for InMemoryGraphRepository {
    async fn create_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<Edge> {
        let edge = Edge::new_follow(follower_id, followee_id);
        if edge.is_self_loop() {
            return Err(ServiceError::validation("Cannot follow yourself"));
        }

        // Entry holds the shard lock, so check and insert are one step.
        match self.edges.entry((follower_id, followee_id)) {
            Entry::Occupied(_) => Err(ServiceError::conflict("Relationship already exists")),
            Entry::Vacant(slot) => {
                slot.insert(edge.clone());
                Ok(edge)
            }
        }
    }

    async fn delete_follow(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool> {
        Ok(self.edges.remove(&(follower_id, followee_id)).is_some())
    }

    async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool> {
        Ok(self.edges.contains_key(&(follower_id, followee_id)))
    }

    async fn get_following(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let mut following: Vec<Uuid> = self
            .edges
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.key().1)
            .collect();
        following.sort();
        Ok(following)
    }

    async fn get_followers(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let mut followers: Vec<Uuid> = self
            .edges
            .iter()
            .filter(|entry| entry.key().1 == user_id)
            .map(|entry| entry.key().0)
            .collect();
        followers.sort();
        Ok(followers)
    }

    async fn get_stats(&self, user_id: Uuid) -> ServiceResult<GraphStats> {
        let mut stats = GraphStats::empty(user_id);
        for entry in self.edges.iter() {
            let (follower, followee) = *entry.key();
            if followee == user_id {
                stats.followers_count += 1;
            }
            if follower == user_id {
                stats.following_count += 1;
            }
        }
        Ok(stats)
    }
}
