#![allow(dead_code)]

use feed_service::{FeedSettings, InMemoryPostStore};
use graph_service::{InMemoryGraphRepository, InMemoryUserDirectory};
use notification_service::{ConnectionManager, InMemoryNotificationRepository, DEFAULT_PUSH_TIMEOUT};
use social_service::repository::{InMemoryCommentRepository, InMemoryLikeRepository, LikeRepository};
use social_service::{AppState, Stores};
use std::sync::Arc;

/// Fully in-memory application with handles to the seeded stores
pub struct TestApp {
    pub state: AppState,
    pub users: InMemoryUserDirectory,
    pub posts: InMemoryPostStore,
    pub notifications: InMemoryNotificationRepository,
    pub hub: ConnectionManager,
}

pub fn test_app() -> TestApp {
    test_app_with_likes(Arc::new(InMemoryLikeRepository::new()))
}

/// Same as `test_app`, with a caller-supplied like store
pub fn test_app_with_likes(likes: Arc<dyn LikeRepository>) -> TestApp {
    let users = InMemoryUserDirectory::new();
    let posts = InMemoryPostStore::new();
    let notifications = InMemoryNotificationRepository::new();
    let hub = ConnectionManager::new();

    let stores = Stores {
        graph: Arc::new(InMemoryGraphRepository::new()),
        users: Arc::new(users.clone()),
        posts: Arc::new(posts.clone()),
        likes,
        comments: Arc::new(InMemoryCommentRepository::new()),
        notifications: Arc::new(notifications.clone()),
    };
    let state = AppState::build(
        stores,
        Arc::new(hub.clone()),
        hub.clone(),
        FeedSettings::default(),
        DEFAULT_PUSH_TIMEOUT,
    );

    TestApp {
        state,
        users,
        posts,
        notifications,
        hub,
    }
}
