pub mod favicon;
pub mod feeds;
pub mod subreddits;

use crate::errors::{DashboardError, DashboardResult};

/// Ids are numeric; anything else cannot name a stored row
fn parse_id(kind: &str, raw: &str) -> DashboardResult<i64> {
    raw.parse()
        .map_err(|_| DashboardError::NotFound(format!("{} {}", kind, raw)))
}
