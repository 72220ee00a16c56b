use super::UserId;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use error_types::ServiceError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

/// GET /api/v1/feed?page=&size=
pub async fn get_feed(
    state: web::Data<AppState>,
    caller: UserId,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = state.feed.get_feed(caller.0, query.page, query.size).await?;
    Ok(HttpResponse::Ok().json(page))
}
