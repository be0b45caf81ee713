use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// A successful (2xx) upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} sent more than {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

/// One outbound GET with a hard latency ceiling. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url`, failing with [`FetchError::Timeout`] once `timeout` elapses
    /// and with [`FetchError::Status`] for any non-2xx answer.
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError>;
}
