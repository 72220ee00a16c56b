use super::UserId;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ServiceError> {
    let comment = state
        .comments
        .add_comment(caller.0, path.into_inner(), &body.content)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// GET /api/v1/posts/{post_id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    _caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let comments = state.comments.list_comments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
