use super::UserId;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
pub async fn list_all(
    state: web::Data<AppState>,
    caller: UserId,
) -> Result<HttpResponse, ServiceError> {
    let notifications = state.notifications.list_all(caller.0).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// GET /api/v1/notifications/unread
pub async fn list_unread(
    state: web::Data<AppState>,
    caller: UserId,
) -> Result<HttpResponse, ServiceError> {
    let notifications = state.notifications.list_unread(caller.0).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

/// GET /api/v1/notifications/unread/count
pub async fn unread_count(
    state: web::Data<AppState>,
    caller: UserId,
) -> Result<HttpResponse, ServiceError> {
    let unread_count = state.notifications.unread_count(caller.0).await?;
    Ok(HttpResponse::Ok().json(UnreadCountResponse { unread_count }))
}

/// POST /api/v1/notifications/{notification_id}/read
pub async fn mark_read(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let notification = state
        .notifications
        .mark_read(path.into_inner(), caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(notification))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    state: web::Data<AppState>,
    caller: UserId,
) -> Result<HttpResponse, ServiceError> {
    let marked_read = state.notifications.mark_all_read(caller.0).await?;
    Ok(HttpResponse::Ok().json(MarkAllReadResponse { marked_read }))
}
