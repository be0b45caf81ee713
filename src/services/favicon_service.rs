use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{TtlCache, FAVICON_TTL};
use crate::domain::FaviconAsset;
use crate::errors::{DashboardError, DashboardResult};
use crate::fetch::HttpFetcher;
use crate::sources::favicon::{accept, candidate_urls, validate_domain};

/// Per-candidate probe timeout
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves the best available icon for a domain by probing well-known
/// locations in order.
///
/// Only successful lookups are cached; a domain without any usable icon is
/// probed again on the next request.
pub struct FaviconService {
    fetcher: Arc<dyn HttpFetcher>,
    cache: TtlCache<FaviconAsset>,
}

impl FaviconService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, capacity: usize) -> Self {
        Self::with_cache(fetcher, TtlCache::new("favicon", FAVICON_TTL, capacity))
    }

    pub fn with_cache(fetcher: Arc<dyn HttpFetcher>, cache: TtlCache<FaviconAsset>) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &TtlCache<FaviconAsset> {
        &self.cache
    }

    pub async fn resolve(&self, domain: &str) -> DashboardResult<FaviconAsset> {
        let domain = validate_domain(domain)?;

        self.cache
            .get_or_try_insert_with(domain, || self.probe(domain))
            .await
    }

    async fn probe(&self, domain: &str) -> DashboardResult<FaviconAsset> {
        for url in candidate_urls(domain) {
            match self.fetcher.get(&url, PROBE_TIMEOUT).await {
                Ok(response) => match accept(response) {
                    Some(icon) => {
                        info!(domain, url = %url, bytes = icon.bytes.len(), "favicon resolved");
                        return Ok(icon);
                    }
                    None => debug!(url = %url, "candidate is not a usable image"),
                },
                Err(e) => debug!(url = %url, error = %e, "candidate failed"),
            }
        }

        Err(DashboardError::NotFound(format!("no favicon for {}", domain)))
    }
}
