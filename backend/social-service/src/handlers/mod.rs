//! HTTP boundary
//!
//! Caller identity comes from the `X-User-Id` header set by the upstream auth
//! gateway. Handlers translate between HTTP and the services; every domain error
//! renders through `ServiceError`'s `ResponseError` impl.

pub mod comments;
pub mod feed;
pub mod likes;
pub mod notifications;
pub mod relationships;
pub mod websocket;

use crate::config::RealtimeBackend;
use actix_web::http::StatusCode;
use actix_web::{error, web, Error, FromRequest, HttpRequest, HttpResponse};
use error_types::{error_codes, ErrorResponse};
use std::future::{ready, Ready};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok());

        ready(user_id.map(UserId).ok_or_else(|| {
            json_error(
                error_codes::UNAUTHORIZED,
                "Missing or invalid X-User-Id header",
                StatusCode::UNAUTHORIZED,
            )
        }))
    }
}

fn json_error(code: &str, message: impl Into<String>, status: StatusCode) -> Error {
    let body = ErrorResponse::new(code, message, status);
    error::InternalError::from_response(
        body.message.clone(),
        HttpResponse::build(status).json(body),
    )
    .into()
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Readiness: the graph store must answer
pub async fn readiness(state: web::Data<crate::state::AppState>) -> HttpResponse {
    match state.follows.relationships().graph().health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "unavailable" }))
        }
    }
}

/// Register `/ws/notifications`; only the local backend feeds this process's hub
pub fn configure_realtime(backend: RealtimeBackend) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        if backend == RealtimeBackend::Local {
            cfg.route("/ws/notifications", web::get().to(websocket::notifications_ws));
        }
    }
}

/// Register every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _| {
        json_error(error_codes::VALIDATION, err.to_string(), StatusCode::BAD_REQUEST)
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        json_error(error_codes::VALIDATION, err.to_string(), StatusCode::BAD_REQUEST)
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _| {
        json_error(error_codes::VALIDATION, err.to_string(), StatusCode::BAD_REQUEST)
    }))
    .service(
        web::scope("/api/v1")
            .service(
                web::scope("/relationships")
                    .route("/follow/{user_id}", web::post().to(relationships::follow))
                    .route("/follow/{user_id}", web::delete().to(relationships::unfollow))
                    .route(
                        "/is-following/{user_id}",
                        web::get().to(relationships::is_following),
                    )
                    .route("/{user_id}/followers", web::get().to(relationships::followers))
                    .route("/{user_id}/following", web::get().to(relationships::following))
                    .route("/{user_id}/stats", web::get().to(relationships::stats)),
            )
            .route("/feed", web::get().to(feed::get_feed))
            .service(
                web::scope("/posts/{post_id}")
                    .route("/likes", web::post().to(likes::like_post))
                    .route("/likes", web::delete().to(likes::unlike_post))
                    .route("/likes", web::get().to(likes::list_likers))
                    .route("/likes/count", web::get().to(likes::like_count))
                    .route("/likes/status", web::get().to(likes::like_status))
                    .route("/comments", web::post().to(comments::add_comment))
                    .route("/comments", web::get().to(comments::list_comments)),
            )
            .service(
                web::scope("/notifications")
                    .route("", web::get().to(notifications::list_all))
                    .route("/unread", web::get().to(notifications::list_unread))
                    .route("/unread/count", web::get().to(notifications::unread_count))
                    .route("/read-all", web::post().to(notifications::mark_all_read))
                    .route("/{notification_id}/read", web::post().to(notifications::mark_read)),
            ),
    );
}
