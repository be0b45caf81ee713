use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::errors::DashboardResult;
use crate::server::state::AppState;

const BROWSER_CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /api/favicon/{domain}
pub async fn get_favicon(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> DashboardResult<Response> {
    let icon = state.favicons.resolve(&domain).await?;

    Ok((
        [
            (CONTENT_TYPE, icon.content_type),
            (CACHE_CONTROL, BROWSER_CACHE_CONTROL.to_string()),
        ],
        icon.bytes,
    )
        .into_response())
}
