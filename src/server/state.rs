use std::sync::Arc;

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::services::{CommunityPostService, FaviconService, FeedEntryService, FollowService};
use crate::storage::{SqliteFeedRepository, SqliteStorage, SqliteSubredditRepository};

pub type Registry = FollowService<SqliteFeedRepository, SqliteSubredditRepository>;

/// Everything the handlers share. Caches live inside the services and are
/// created empty here, once per process.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub favicons: Arc<FaviconService>,
    pub feed_entries: Arc<FeedEntryService>,
    pub community_posts: Arc<CommunityPostService>,
}

impl AppState {
    pub fn new(storage: SqliteStorage, fetcher: Arc<dyn HttpFetcher>, config: &Config) -> Self {
        let registry = FollowService::new(
            SqliteFeedRepository::new(storage.clone()),
            SqliteSubredditRepository::new(storage),
        );

        Self {
            registry: Arc::new(registry),
            favicons: Arc::new(FaviconService::new(fetcher.clone(), config.cache_capacity)),
            feed_entries: Arc::new(FeedEntryService::new(
                fetcher.clone(),
                config.cache_capacity,
                config.upstream_timeout,
            )),
            community_posts: Arc::new(CommunityPostService::new(
                fetcher,
                config.cache_capacity,
                config.upstream_timeout,
            )),
        }
    }

    /// Drop stale entries from every cache; returns how many were removed
    pub fn sweep_caches(&self) -> usize {
        self.favicons.cache().sweep()
            + self.feed_entries.cache().sweep()
            + self.community_posts.cache().sweep()
    }
}
