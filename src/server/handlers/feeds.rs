use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{Feed, FeedEntry};
use crate::errors::DashboardResult;
use crate::server::handlers::parse_id;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewFeed {
    pub title: String,
    pub url: String,
}

/// GET /api/feeds
pub async fn list(State(state): State<AppState>) -> DashboardResult<Json<Vec<Feed>>> {
    Ok(Json(state.registry.list_feeds()?))
}

/// POST /api/feeds
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewFeed>,
) -> DashboardResult<(StatusCode, Json<Feed>)> {
    let feed = state.registry.add_feed(&body.title, &body.url)?;
    Ok((StatusCode::CREATED, Json(feed)))
}

/// DELETE /api/feeds/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>> {
    state.registry.remove_feed(parse_id("feed", &id)?)?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/feeds/{id}/entries
pub async fn entries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Vec<FeedEntry>>> {
    let feed = state.registry.feed(parse_id("feed", &id)?)?;
    let entries = state.feed_entries.fetch_entries(&feed).await?;
    Ok(Json(entries))
}
