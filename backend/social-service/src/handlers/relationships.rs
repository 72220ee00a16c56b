use super::UserId;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct IsFollowingResponse {
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub is_following: bool,
}

/// POST /api/v1/relationships/follow/{user_id}
pub async fn follow(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let followee = state.follows.follow(caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(followee))
}

/// DELETE /api/v1/relationships/follow/{user_id}
pub async fn unfollow(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let followee = state.follows.unfollow(caller.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(followee))
}

/// GET /api/v1/relationships/is-following/{user_id}
pub async fn is_following(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let followee_id = path.into_inner();
    let is_following = state
        .follows
        .relationships()
        .is_following(caller.0, followee_id)
        .await?;

    Ok(HttpResponse::Ok().json(IsFollowingResponse {
        follower_id: caller.0,
        followee_id,
        is_following,
    }))
}

/// GET /api/v1/relationships/{user_id}/followers
pub async fn followers(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let users = state
        .follows
        .relationships()
        .list_followers(path.into_inner(), caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/v1/relationships/{user_id}/following
pub async fn following(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let users = state
        .follows
        .relationships()
        .list_following(path.into_inner(), caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/v1/relationships/{user_id}/stats
pub async fn stats(
    state: web::Data<AppState>,
    caller: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let stats = state
        .follows
        .relationships()
        .graph_stats(path.into_inner(), caller.0)
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}
