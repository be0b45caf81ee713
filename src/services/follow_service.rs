use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::domain::{Feed, Subreddit};
use crate::errors::{DashboardError, DashboardResult};
use crate::storage::traits::{FeedRepository, SubredditRepository};

static SUBREDDIT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{2,21}$").expect("subreddit pattern is valid"));

/// The followed feeds and subreddits, and the lookup from their ids to the
/// upstream URL or name
pub struct FollowService<F: FeedRepository, S: SubredditRepository> {
    feeds: F,
    subreddits: S,
}

impl<F: FeedRepository, S: SubredditRepository> FollowService<F, S> {
    pub fn new(feeds: F, subreddits: S) -> Self {
        Self { feeds, subreddits }
    }

    /// Add a feed after checking its URL is an absolute http(s) URL
    pub fn add_feed(&self, title: &str, url: &str) -> DashboardResult<Feed> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DashboardError::InvalidInput("feed title is required".to_string()));
        }

        let url = normalize_feed_url(url)?;

        if self.feeds.exists(&url)? {
            return Err(DashboardError::AlreadyExists(url));
        }

        let feed = Feed::new(title.to_string(), url);
        let id = self.feeds.add(&feed)?;

        Ok(Feed {
            id: Some(id),
            ..feed
        })
    }

    /// Unfollowing leaves any cached entries to expire on their own
    pub fn remove_feed(&self, id: i64) -> DashboardResult<()> {
        if self.feeds.remove(id)? {
            Ok(())
        } else {
            Err(DashboardError::NotFound(format!("feed {}", id)))
        }
    }

    pub fn list_feeds(&self) -> DashboardResult<Vec<Feed>> {
        self.feeds.get_all()
    }

    pub fn feed(&self, id: i64) -> DashboardResult<Feed> {
        self.feeds
            .get_by_id(id)?
            .ok_or_else(|| DashboardError::NotFound(format!("feed {}", id)))
    }

    /// Follow a subreddit; accepts both `rust` and `r/rust`
    pub fn follow_subreddit(&self, name: &str) -> DashboardResult<Subreddit> {
        let name = clean_subreddit_name(name)?;

        if self.subreddits.exists(&name)? {
            return Err(DashboardError::AlreadyExists(name));
        }

        let subreddit = Subreddit::new(name);
        let id = self.subreddits.add(&subreddit)?;

        Ok(Subreddit {
            id: Some(id),
            ..subreddit
        })
    }

    pub fn unfollow_subreddit(&self, id: i64) -> DashboardResult<()> {
        if self.subreddits.remove(id)? {
            Ok(())
        } else {
            Err(DashboardError::NotFound(format!("subreddit {}", id)))
        }
    }

    pub fn list_subreddits(&self) -> DashboardResult<Vec<Subreddit>> {
        self.subreddits.get_all()
    }

    pub fn subreddit(&self, id: i64) -> DashboardResult<Subreddit> {
        self.subreddits
            .get_by_id(id)?
            .ok_or_else(|| DashboardError::NotFound(format!("subreddit {}", id)))
    }
}

fn normalize_feed_url(url: &str) -> DashboardResult<String> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| DashboardError::InvalidInput(format!("invalid feed URL: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
        return Err(DashboardError::InvalidInput(format!(
            "feed URL must be http(s): {}",
            url
        )));
    }

    Ok(parsed.into())
}

fn clean_subreddit_name(name: &str) -> DashboardResult<String> {
    let trimmed = name.trim();
    let name = trimmed
        .strip_prefix("r/")
        .or_else(|| trimmed.strip_prefix("/r/"))
        .unwrap_or(trimmed)
        .trim();

    if !SUBREDDIT_NAME.is_match(name) {
        return Err(DashboardError::InvalidInput(format!(
            "invalid subreddit name: {}",
            name
        )));
    }

    Ok(name.to_string())
}
