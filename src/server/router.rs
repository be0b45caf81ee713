//! HTTP routes, mounted under `/api`

use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{favicon, feeds, subreddits};
use crate::server::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/favicon/{domain}", get(favicon::get_favicon))
        .route("/feeds", get(feeds::list).post(feeds::create))
        .route("/feeds/{id}", delete(feeds::remove))
        .route("/feeds/{id}/entries", get(feeds::entries))
        .route("/subreddits", get(subreddits::list).post(subreddits::follow))
        .route("/subreddits/{id}", delete(subreddits::unfollow))
        .route("/subreddits/{id}/posts", get(subreddits::posts));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
