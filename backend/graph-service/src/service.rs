use crate::directory::UserDirectory;
use crate::domain::edge::GraphStats;
use crate::domain::user::{User, UserSummary};
use crate::privacy::PrivacyGate;
use crate::repository::GraphRepositoryTrait;
use error_types::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Follow graph operations exposed to controllers and other services
#[derive(Clone)]
pub struct RelationshipService {
    graph: Arc<dyn GraphRepositoryTrait>,
    users: Arc<dyn UserDirectory>,
    privacy: PrivacyGate,
}

impl RelationshipService {
    pub fn new(graph: Arc<dyn GraphRepositoryTrait>, users: Arc<dyn UserDirectory>) -> Self {
        let privacy = PrivacyGate::new(graph.clone());
        Self {
            graph,
            users,
            privacy,
        }
    }

    pub fn graph(&self) -> Arc<dyn GraphRepositoryTrait> {
        self.graph.clone()
    }

    pub fn users(&self) -> Arc<dyn UserDirectory> {
        self.users.clone()
    }

    /// Create the edge `follower -> followee` and return the followee's identity.
    ///
    /// Duplicate detection is left to the repository's atomic insert, so two
    /// concurrent identical requests yield one success and one `Conflict`.
    pub async fn follow_user(
        &self,
        follower_id: Uuid,
        followee_id: Uuid,
    ) -> ServiceResult<UserSummary> {
        if follower_id == followee_id {
            return Err(ServiceError::validation("Cannot follow yourself"));
        }

        let followee = self.require_user(followee_id).await?;
        self.graph.create_follow(follower_id, followee_id).await?;

        info!(
            follower = %follower_id,
            followee = %followee_id,
            "Follow created"
        );
        Ok(followee.into())
    }

    pub async fn unfollow_user(
        &self,
        follower_id: Uuid,
        followee_id: Uuid,
    ) -> ServiceResult<UserSummary> {
        let followee = self.require_user(followee_id).await?;

        if !self.graph.delete_follow(follower_id, followee_id).await? {
            return Err(ServiceError::validation("Not following this user"));
        }

        info!(
            follower = %follower_id,
            followee = %followee_id,
            "Follow deleted"
        );
        Ok(followee.into())
    }

    pub async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> ServiceResult<bool> {
        self.graph.is_following(follower_id, followee_id).await
    }

    pub async fn list_followers(
        &self,
        user_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<Vec<UserSummary>> {
        let target = self.require_user(user_id).await?;
        self.privacy.authorize(requester_id, &target).await?;

        let ids = self.graph.get_followers(user_id).await?;
        debug!(user = %user_id, count = ids.len(), "Listing followers");
        self.summaries(&ids).await
    }

    pub async fn list_following(
        &self,
        user_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<Vec<UserSummary>> {
        let target = self.require_user(user_id).await?;
        self.privacy.authorize(requester_id, &target).await?;

        let ids = self.graph.get_following(user_id).await?;
        debug!(user = %user_id, count = ids.len(), "Listing following");
        self.summaries(&ids).await
    }

    pub async fn graph_stats(&self, user_id: Uuid, requester_id: Uuid) -> ServiceResult<GraphStats> {
        let target = self.require_user(user_id).await?;
        self.privacy.authorize(requester_id, &target).await?;
        self.graph.get_stats(user_id).await
    }

    /// Internal, ungated followee set (feed assembly)
    pub async fn following_ids(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        self.graph.get_following(user_id).await
    }

    async fn require_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User does not exist"))
    }

    /// One batch lookup, ascending by id. Accounts missing from the directory are
    /// dropped rather than failing the listing.
    async fn summaries(&self, ids: &[Uuid]) -> ServiceResult<Vec<UserSummary>> {
        let mut summaries: Vec<UserSummary> = self
            .users
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(UserSummary::from)
            .collect();
        summaries.sort_by_key(|summary| summary.id);
        Ok(summaries)
    }
}
