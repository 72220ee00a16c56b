use super::UserId;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LikersQuery {
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

/// POST /api/v1/posts/{post_id}/likes
pub async fn like_post(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let like = state.likes.like(caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(like))
}

/// DELETE /api/v1/posts/{post_id}/likes
pub async fn unlike_post(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.likes.unlike(caller.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/posts/{post_id}/likes/count
pub async fn like_count(
    state: web::Data<AppState>,
    _caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let count = state.likes.like_count(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(count))
}

/// GET /api/v1/posts/{post_id}/likes?page=&size=
pub async fn list_likers(
    state: web::Data<AppState>,
    _caller: UserId,
    path: web::Path<Uuid>,
    query: web::Query<LikersQuery>,
) -> Result<HttpResponse, ServiceError> {
    let likers = state
        .likes
        .list_likers(path.into_inner(), query.page, query.size)
        .await?;
    Ok(HttpResponse::Ok().json(likers))
}

/// GET /api/v1/posts/{post_id}/likes/status
pub async fn like_status(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let status = state.likes.like_status(caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(status))
}
