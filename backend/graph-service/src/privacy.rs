use crate::domain::user::User;
use crate::repository::GraphRepositoryTrait;
use error_types::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Visibility rule for follower/following data of private accounts.
///
/// A viewer may see a target's graph if the target is public, if the viewer is the
/// target, or if the viewer follows the target.
#[derive(Clone)]
pub struct PrivacyGate {
    graph: Arc<dyn GraphRepositoryTrait>,
}

impl PrivacyGate {
    pub fn new(graph: Arc<dyn GraphRepositoryTrait>) -> Self {
        Self { graph }
    }

    pub async fn authorize(&self, viewer_id: Uuid, target: &User) -> ServiceResult<()> {
        if !target.is_private || viewer_id == target.id {
            return Ok(());
        }

        if self.graph.is_following(viewer_id, target.id).await? {
            return Ok(());
        }

        debug!(
            viewer = %viewer_id,
            target = %target.id,
            "Denied graph read on private account"
        );
        Err(ServiceError::privacy("This account is private"))
    }
}
