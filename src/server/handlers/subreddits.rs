use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{CommunityPost, Subreddit};
use crate::errors::DashboardResult;
use crate::server::handlers::parse_id;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewSubreddit {
    pub name: String,
}

/// GET /api/subreddits
pub async fn list(State(state): State<AppState>) -> DashboardResult<Json<Vec<Subreddit>>> {
    Ok(Json(state.registry.list_subreddits()?))
}

/// POST /api/subreddits
pub async fn follow(
    State(state): State<AppState>,
    Json(body): Json<NewSubreddit>,
) -> DashboardResult<(StatusCode, Json<Subreddit>)> {
    let subreddit = state.registry.follow_subreddit(&body.name)?;
    Ok((StatusCode::CREATED, Json(subreddit)))
}

/// DELETE /api/subreddits/{id}
pub async fn unfollow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>> {
    state.registry.unfollow_subreddit(parse_id("subreddit", &id)?)?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/subreddits/{id}/posts
pub async fn posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Vec<CommunityPost>>> {
    let subreddit = state.registry.subreddit(parse_id("subreddit", &id)?)?;
    let posts = state.community_posts.fetch_posts(&subreddit).await?;
    Ok(Json(posts))
}
