use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{TtlCache, FEED_ENTRIES_TTL};
use crate::domain::{Feed, FeedEntry};
use crate::errors::DashboardResult;
use crate::fetch::HttpFetcher;
use crate::sources::rss_atom;

/// Fetches and normalizes the latest entries of followed feeds
pub struct FeedEntryService {
    fetcher: Arc<dyn HttpFetcher>,
    cache: TtlCache<Vec<FeedEntry>>,
    timeout: Duration,
}

impl FeedEntryService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, capacity: usize, timeout: Duration) -> Self {
        Self::with_cache(
            fetcher,
            TtlCache::new("feed_entries", FEED_ENTRIES_TTL, capacity),
            timeout,
        )
    }

    pub fn with_cache(
        fetcher: Arc<dyn HttpFetcher>,
        cache: TtlCache<Vec<FeedEntry>>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &TtlCache<Vec<FeedEntry>> {
        &self.cache
    }

    /// Entries of an already-resolved feed, served from cache when fresh
    pub async fn fetch_entries(&self, feed: &Feed) -> DashboardResult<Vec<FeedEntry>> {
        let key = feed.cache_key();

        self.cache
            .get_or_try_insert_with(&key, || self.fetch_uncached(feed))
            .await
    }

    async fn fetch_uncached(&self, feed: &Feed) -> DashboardResult<Vec<FeedEntry>> {
        let response = self
            .fetcher
            .get(&feed.url, self.timeout)
            .await
            .inspect_err(|e| warn!(feed = %feed.title, error = %e, "feed fetch failed"))?;

        let entries = rss_atom::parse_entries(&response.body)
            .inspect_err(|e| warn!(feed = %feed.title, error = %e, "feed parse failed"))?;

        info!(feed = %feed.title, entries = entries.len(), "feed refreshed");
        Ok(entries)
    }
}
