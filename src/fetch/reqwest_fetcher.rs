use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;

use crate::fetch::traits::{FetchError, FetchResponse, HttpFetcher};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; HomeLab-Dashboard/1.0)";

const MAX_REDIRECTS: usize = 10;

/// Largest body read from any upstream
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// [`HttpFetcher`] backed by a shared reqwest client
pub struct ReqwestFetcher {
    client: Client,
    body_limit: usize,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            body_limit: MAX_BODY_BYTES,
        })
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    fn classify(url: &str, timeout: Duration, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }

    fn too_large(&self, url: &str) -> FetchError {
        FetchError::TooLarge {
            url: url.to_string(),
            limit: self.body_limit,
        }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError> {
        debug!(url, ?timeout, "outbound request");

        // The timeout covers connect, headers and the body read below; dropping the
        // future cancels the request.
        let mut response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if response
            .content_length()
            .is_some_and(|len| len > self.body_limit as u64)
        {
            return Err(self.too_large(url));
        }

        // The declared length may be absent or wrong, so the limit is enforced
        // while streaming too
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Self::classify(url, timeout, e))?
        {
            if body.len() + chunk.len() > self.body_limit {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        addr
    }

    #[test]
    fn test_client_builds() {
        assert!(ReqwestFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher = ReqwestFetcher::new().unwrap();
        // Port 9 on localhost (discard) is closed on CI machines
        let result = fetcher
            .get("http://127.0.0.1:9/", Duration::from_secs(2))
            .await;

        assert!(matches!(
            result,
            Err(FetchError::Network { .. }) | Err(FetchError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept, then never answer
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let fetcher = ReqwestFetcher::new().unwrap();
        let timeout = Duration::from_millis(300);
        let url = format!("http://{}/", addr);

        let started = Instant::now();
        let result = fetcher.get(&url, timeout).await;
        let elapsed = started.elapsed();

        assert_eq!(result, Err(FetchError::Timeout { url, timeout }));
        assert!(elapsed >= timeout, "returned early after {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_follows_redirect_and_sends_user_agent() {
        let router = Router::new()
            .route(
                "/start",
                get(|| async { (StatusCode::FOUND, [(header::LOCATION, "/done")]) }),
            )
            .route(
                "/done",
                get(|headers: HeaderMap| async move {
                    let agent = headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    ([(header::CONTENT_TYPE, "text/plain")], agent)
                }),
            );
        let addr = spawn_server(router).await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let response = fetcher
            .get(&format!("http://{}/start", addr), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("text/plain"));
        assert_eq!(response.body, USER_AGENT.as_bytes());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route("/gone", get(|| async { StatusCode::NOT_FOUND }));
        let addr = spawn_server(router).await;
        let url = format!("http://{}/gone", addr);

        let fetcher = ReqwestFetcher::new().unwrap();
        let result = fetcher.get(&url, Duration::from_secs(5)).await;

        assert_eq!(result, Err(FetchError::Status { url, status: 404 }));
    }

    #[tokio::test]
    async fn test_declared_length_over_limit_is_rejected() {
        let router = Router::new().route("/big", get(|| async { vec![0u8; 2048] }));
        let addr = spawn_server(router).await;
        let url = format!("http://{}/big", addr);

        let fetcher = ReqwestFetcher::new().unwrap().with_body_limit(1024);
        let result = fetcher.get(&url, Duration::from_secs(5)).await;

        assert_eq!(result, Err(FetchError::TooLarge { url, limit: 1024 }));
    }

    #[tokio::test]
    async fn test_undeclared_length_over_limit_is_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            // No Content-Length: the body runs until the connection closes
            let head = "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n";
            // The client hangs up once the limit is hit, so write errors are expected
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(&[1u8; 4096]).await;
            let _ = socket.shutdown().await;
        });
        let url = format!("http://{}/icon.png", addr);

        let fetcher = ReqwestFetcher::new().unwrap().with_body_limit(1024);
        let result = fetcher.get(&url, Duration::from_secs(5)).await;

        assert_eq!(result, Err(FetchError::TooLarge { url, limit: 1024 }));
    }
}
