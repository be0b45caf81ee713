use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{TtlCache, COMMUNITY_POSTS_TTL};
use crate::domain::{CommunityPost, Subreddit};
use crate::errors::DashboardResult;
use crate::fetch::HttpFetcher;
use crate::sources::reddit;

/// Fetches the hot listing of followed subreddits
pub struct CommunityPostService {
    fetcher: Arc<dyn HttpFetcher>,
    cache: TtlCache<Vec<CommunityPost>>,
    timeout: Duration,
}

impl CommunityPostService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, capacity: usize, timeout: Duration) -> Self {
        Self::with_cache(
            fetcher,
            TtlCache::new("community_posts", COMMUNITY_POSTS_TTL, capacity),
            timeout,
        )
    }

    pub fn with_cache(
        fetcher: Arc<dyn HttpFetcher>,
        cache: TtlCache<Vec<CommunityPost>>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &TtlCache<Vec<CommunityPost>> {
        &self.cache
    }

    pub async fn fetch_posts(&self, subreddit: &Subreddit) -> DashboardResult<Vec<CommunityPost>> {
        self.cache
            .get_or_try_insert_with(subreddit.cache_key(), || self.fetch_uncached(&subreddit.name))
            .await
    }

    async fn fetch_uncached(&self, name: &str) -> DashboardResult<Vec<CommunityPost>> {
        let url = reddit::hot_listing_url(name)?;

        let response = self
            .fetcher
            .get(&url, self.timeout)
            .await
            .inspect_err(|e| warn!(subreddit = name, error = %e, "listing fetch failed"))?;

        let posts = reddit::parse_listing(&response.body)
            .inspect_err(|e| warn!(subreddit = name, error = %e, "listing parse failed"))?;

        info!(subreddit = name, posts = posts.len(), "listing refreshed");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::errors::DashboardError;
    use crate::fetch::{FetchError, FetchResponse, MockHttpFetcher};
    use mockall::predicate::{always, eq};
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn listing_response() -> FetchResponse {
        let body = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t3", "data": {
                        "id": "a1", "title": "Text post", "url": "https://www.reddit.com/r/rust/comments/a1/",
                        "permalink": "/r/rust/comments/a1/text_post/", "score": 10, "num_comments": 2,
                        "author": "ferris", "created_utc": 1700000000.0, "thumbnail": "self",
                        "selftext": "body"
                    }},
                    {"kind": "t3", "data": {
                        "id": "b2", "title": "Link post", "url": "https://img.example/x.jpg",
                        "permalink": "/r/rust/comments/b2/link_post/", "score": 99, "num_comments": 0,
                        "author": "crab", "created_utc": 1700000500.0,
                        "thumbnail": "https://img.example/x.jpg", "selftext": ""
                    }}
                ]
            }
        });
        FetchResponse::new(200, Some("application/json"), serde_json::to_vec(&body).unwrap())
    }

    fn subreddit(name: &str) -> Subreddit {
        Subreddit {
            id: Some(1),
            ..Subreddit::new(name.to_string())
        }
    }

    fn service(mock: MockHttpFetcher) -> (CommunityPostService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock("community_posts", COMMUNITY_POSTS_TTL, 16, clock.clone());
        (
            CommunityPostService::with_cache(Arc::new(mock), cache, TIMEOUT),
            clock,
        )
    }

    #[tokio::test]
    async fn test_fetches_hot_listing() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .with(
                eq("https://www.reddit.com/r/rust/hot.json?limit=20".to_string()),
                eq(TIMEOUT),
            )
            .times(1)
            .returning(|_, _| Ok(listing_response()));

        let (service, _) = service(mock);
        let posts = service.fetch_posts(&subreddit("rust")).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a1");
        assert_eq!(posts[0].thumbnail, None);
        assert_eq!(posts[0].permalink, "https://www.reddit.com/r/rust/comments/a1/text_post/");
        assert_eq!(posts[1].thumbnail.as_deref(), Some("https://img.example/x.jpg"));
        assert_eq!(posts[1].selftext.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_cached_by_name_within_ttl() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(1).returning(|_, _| Ok(listing_response()));

        let (service, clock) = service(mock);
        service.fetch_posts(&subreddit("rust")).await.unwrap();
        clock.advance(COMMUNITY_POSTS_TTL - Duration::from_secs(1));

        // A second follow of the same community shares the cached listing
        let again = Subreddit {
            id: Some(2),
            ..Subreddit::new("rust".to_string())
        };
        let posts = service.fetch_posts(&again).await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_refreshes_after_ttl() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(2).returning(|_, _| Ok(listing_response()));

        let (service, clock) = service(mock);
        service.fetch_posts(&subreddit("rust")).await.unwrap();
        clock.advance(COMMUNITY_POSTS_TTL);
        service.fetch_posts(&subreddit("rust")).await.unwrap();
    }

    #[tokio::test]
    async fn test_upstream_503_not_cached() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .with(always(), always())
            .times(2)
            .returning(|url, _| {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                })
            });

        let (service, _) = service(mock);

        for _ in 0..2 {
            let result = service.fetch_posts(&subreddit("rust")).await;
            assert!(matches!(result, Err(DashboardError::Upstream(_))));
        }
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_non_listing_json_is_parse_error() {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _| Ok(FetchResponse::new(200, Some("application/json"), b"[]".to_vec())));

        let (service, _) = service(mock);
        let result = service.fetch_posts(&subreddit("rust")).await;
        assert!(matches!(result, Err(DashboardError::Parse(_))));
    }
}
