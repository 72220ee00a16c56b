use crate::repository::{CommentRepository, LikeRepository};
use crate::services::{CommentService, FollowService, LikeService};
use feed_service::{FeedAssembler, FeedSettings, PostStore};
use graph_service::{GraphRepositoryTrait, RelationshipService, UserDirectory};
use notification_service::{
    ConnectionManager, NotificationDispatcher, NotificationRepository, RealtimeChannel,
};
use std::sync::Arc;
use std::time::Duration;

/// Storage backends the services are wired onto
pub struct Stores {
    pub graph: Arc<dyn GraphRepositoryTrait>,
    pub users: Arc<dyn UserDirectory>,
    pub posts: Arc<dyn PostStore>,
    pub likes: Arc<dyn LikeRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub follows: FollowService,
    pub feed: FeedAssembler,
    pub likes: LikeService,
    pub comments: CommentService,
    pub notifications: NotificationDispatcher,
    /// Local WebSocket sessions; only fed by the dispatcher with the local backend
    pub hub: ConnectionManager,
}

impl AppState {
    pub fn build(
        stores: Stores,
        channel: Arc<dyn RealtimeChannel>,
        hub: ConnectionManager,
        feed_settings: FeedSettings,
        push_timeout: Duration,
    ) -> Self {
        let notifications =
            NotificationDispatcher::new(stores.notifications, channel, push_timeout);
        let relationships = RelationshipService::new(stores.graph.clone(), stores.users.clone());

        Self {
            follows: FollowService::new(relationships, notifications.clone()),
            feed: FeedAssembler::new(stores.graph, stores.posts.clone(), feed_settings),
            likes: LikeService::new(
                stores.likes,
                stores.posts.clone(),
                stores.users.clone(),
                notifications.clone(),
            ),
            comments: CommentService::new(
                stores.comments,
                stores.posts,
                stores.users,
                notifications.clone(),
            ),
            notifications,
            hub,
        }
    }
}
