/// HTTP boundary tests
///
/// Coverage:
/// - Caller identity from X-User-Id, 401 when absent or malformed
/// - Domain errors map to 400 / 403 / 404 / 409 with a JSON error body
/// - Happy paths for follow, feed, likes, and the notification inbox
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::Utc;
use common::{test_app, test_app_with_likes, TestApp};
use error_types::{ErrorResponse, ServiceError, ServiceResult};
use serde_json::Value;
use social_service::config::RealtimeBackend;
use social_service::domain::models::Like;
use social_service::handlers::{self, USER_ID_HEADER};
use social_service::repository::LikeRepository;
use std::sync::Arc;
use uuid::Uuid;

macro_rules! service {
    ($app:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($app.state.clone()))
                .route("/health", web::get().to(handlers::health))
                .route("/health/ready", web::get().to(handlers::readiness))
                .configure(handlers::configure_realtime(RealtimeBackend::Local))
                .configure(handlers::configure),
        )
        .await
    };
}

fn as_user(req: test::TestRequest, user_id: Uuid) -> test::TestRequest {
    req.insert_header((USER_ID_HEADER, user_id.to_string()))
}

fn seeded() -> (TestApp, Uuid, Uuid) {
    let app = test_app();
    let alice = app.users.register("alice", false).id;
    let bob = app.users.register("bob", false).id;
    (app, alice, bob)
}

#[actix_web::test]
async fn health_needs_no_identity() {
    let app = test_app();
    let svc = service!(app);

    let resp = test::call_service(&svc, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &svc,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_or_malformed_user_header_is_unauthorized() {
    let app = test_app();
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        test::TestRequest::get().uri("/api/v1/notifications").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &svc,
        test::TestRequest::get()
            .uri("/api/v1/notifications")
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "UNAUTHORIZED");
}

#[actix_web::test]
async fn follow_twice_is_conflict() {
    let (app, alice, bob) = seeded();
    let svc = service!(app);
    let uri = format!("/api/v1/relationships/follow/{}", bob);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::post().uri(&uri), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "bob");

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::post().uri(&uri), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, 409);
    assert_eq!(body.error, "CONFLICT");
}

#[actix_web::test]
async fn self_follow_is_bad_request() {
    let (app, alice, _) = seeded();
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post().uri(&format!("/api/v1/relationships/follow/{}", alice)),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn follow_unknown_user_is_not_found() {
    let (app, alice, _) = seeded();
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post()
                .uri(&format!("/api/v1/relationships/follow/{}", Uuid::new_v4())),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn private_follower_list_is_forbidden_for_strangers() {
    let app = test_app();
    let private = app.users.register("pat", true).id;
    let stranger = app.users.register("sam", false).id;
    let svc = service!(app);
    let uri = format!("/api/v1/relationships/{}/followers", private);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri(&uri), stranger).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri(&uri), private).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn feed_rejects_zero_size_and_serves_pages() {
    let (app, alice, bob) = seeded();
    app.state.follows.follow(alice, bob).await.unwrap();
    app.posts.publish(bob, "hello", Utc::now());
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri("/api/v1/feed?page=0&size=0"), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri("/api/v1/feed"), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["size"], 10);
    assert_eq!(body["has_more"], false);
    assert_eq!(body["posts"][0]["content"], "hello");
}

#[actix_web::test]
async fn like_flow_reaches_author_inbox() {
    let (app, alice, bob) = seeded();
    let post = app.posts.publish(bob, "sunset", Utc::now());
    let svc = service!(app);
    let likes_uri = format!("/api/v1/posts/{}/likes", post.id);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::post().uri(&likes_uri), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri("/api/v1/notifications/unread/count"), bob)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["unread_count"], 1);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::get().uri("/api/v1/notifications/unread"), bob).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["notification_type"], "LIKE");
    assert_eq!(body[0]["actor_id"], alice.to_string());
    let notification_id = body[0]["id"].as_str().unwrap().to_string();

    // Someone else's notification looks absent
    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post()
                .uri(&format!("/api/v1/notifications/{}/read", notification_id)),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &svc,
        as_user(test::TestRequest::post().uri("/api/v1/notifications/read-all"), bob)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["marked_read"], 1);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get().uri(&format!("{}/count", likes_uri)),
            bob,
        )
        .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
}

#[actix_web::test]
async fn comment_validation_and_missing_post() {
    let (app, alice, bob) = seeded();
    let post = app.posts.publish(bob, "question?", Utc::now());
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post()
                .uri(&format!("/api/v1/posts/{}/comments", post.id))
                .set_json(serde_json::json!({ "content": "   " })),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post()
                .uri(&format!("/api/v1/posts/{}/comments", Uuid::new_v4()))
                .set_json(serde_json::json!({ "content": "hi" })),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post()
                .uri(&format!("/api/v1/posts/{}/comments", post.id))
                .set_json(serde_json::json!({ "content": "answer" })),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn malformed_path_id_is_bad_request() {
    let (app, alice, _) = seeded();
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get().uri("/api/v1/relationships/not-a-uuid/followers"),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn like_status_and_likers_listing() {
    let (app, alice, bob) = seeded();
    let post = app.posts.publish(bob, "sunset", Utc::now());
    app.state.likes.like(alice, post.id).await.unwrap();
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get().uri(&format!("/api/v1/posts/{}/likes/status", post.id)),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["like_count"], 1);
    assert_eq!(body["liked_by_current_user"], true);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get().uri(&format!("/api/v1/posts/{}/likes/status", post.id)),
            bob,
        )
        .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["liked_by_current_user"], false);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{}/likes?page=0&size=5", post.id)),
            bob,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["username"], "alice");
    assert_eq!(body[0]["user_id"], alice.to_string());

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::get()
                .uri(&format!("/api/v1/posts/{}/likes/status", Uuid::new_v4())),
            bob,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

const STORE_FAILURE: &str = "password=hunter2 connection refused";

/// Like store whose backend is unreachable
struct UnreachableLikeStore;

#[async_trait::async_trait]
impl LikeRepository for UnreachableLikeStore {
    async fn create_like(&self, _user_id: Uuid, _post_id: Uuid) -> ServiceResult<Like> {
        Err(ServiceError::Persistence(STORE_FAILURE.to_string()))
    }

    async fn delete_like(&self, _user_id: Uuid, _post_id: Uuid) -> ServiceResult<bool> {
        Err(ServiceError::Persistence(STORE_FAILURE.to_string()))
    }

    async fn count_likes(&self, _post_id: Uuid) -> ServiceResult<i64> {
        Err(ServiceError::Persistence(STORE_FAILURE.to_string()))
    }

    async fn has_liked(&self, _user_id: Uuid, _post_id: Uuid) -> ServiceResult<bool> {
        Err(ServiceError::Persistence(STORE_FAILURE.to_string()))
    }

    async fn list_likers(
        &self,
        _post_id: Uuid,
        _offset: i64,
        _limit: i64,
    ) -> ServiceResult<Vec<Like>> {
        Err(ServiceError::Persistence(STORE_FAILURE.to_string()))
    }
}

#[actix_web::test]
async fn storage_failure_is_opaque_500() {
    let app = test_app_with_likes(Arc::new(UnreachableLikeStore));
    let alice = app.users.register("alice", false).id;
    let bob = app.users.register("bob", false).id;
    let post = app.posts.publish(bob, "sunset", Utc::now());
    let svc = service!(app);

    let resp = test::call_service(
        &svc,
        as_user(
            test::TestRequest::post().uri(&format!("/api/v1/posts/{}/likes", post.id)),
            alice,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let raw = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&raw);
    assert!(!text.contains("hunter2"));
    assert!(!text.contains("connection refused"));

    let body: ErrorResponse = serde_json::from_slice(&raw).unwrap();
    assert_eq!(body.status, 500);
    assert_eq!(body.error, error_types::error_codes::PERSISTENCE);
    assert_eq!(body.message, "Internal server error");

    // No notification reaches the author when the like was never stored
    assert_eq!(app.state.notifications.unread_count(bob).await.unwrap(), 0);
}

#[actix_web::test]
async fn websocket_route_only_served_with_local_backend() {
    let (app, alice, _) = seeded();

    let local = service!(app);
    let resp = test::call_service(
        &local,
        as_user(test::TestRequest::get().uri("/ws/notifications"), alice).to_request(),
    )
    .await;
    assert_ne!(resp.status(), StatusCode::NOT_FOUND);

    let remote = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state.clone()))
            .configure(handlers::configure_realtime(RealtimeBackend::Redis))
            .configure(handlers::configure),
    )
    .await;
    let resp = test::call_service(
        &remote,
        as_user(test::TestRequest::get().uri("/ws/notifications"), alice).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
