use crate::domain::{Feed, Subreddit};
use crate::errors::DashboardResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedRepository: Send + Sync {
    fn add(&self, feed: &Feed) -> DashboardResult<i64>;
    fn remove(&self, id: i64) -> DashboardResult<bool>;
    fn get_all(&self) -> DashboardResult<Vec<Feed>>;
    fn get_by_id(&self, id: i64) -> DashboardResult<Option<Feed>>;
    fn exists(&self, url: &str) -> DashboardResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SubredditRepository: Send + Sync {
    fn add(&self, subreddit: &Subreddit) -> DashboardResult<i64>;
    fn remove(&self, id: i64) -> DashboardResult<bool>;
    fn get_all(&self) -> DashboardResult<Vec<Subreddit>>;
    fn get_by_id(&self, id: i64) -> DashboardResult<Option<Subreddit>>;
    fn exists(&self, name: &str) -> DashboardResult<bool>;
}
