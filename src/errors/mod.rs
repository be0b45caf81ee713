use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Error, Debug)]
pub enum DashboardError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Input errors, raised before any I/O happens
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // Upstream errors
    #[error("Upstream unavailable: {0}")]
    Upstream(#[from] FetchError),

    #[error("Upstream response could not be parsed: {0}")]
    Parse(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether the failure originates upstream (network, status or malformed payload)
    pub fn is_upstream(&self) -> bool {
        matches!(self, DashboardError::Upstream(_) | DashboardError::Parse(_))
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
