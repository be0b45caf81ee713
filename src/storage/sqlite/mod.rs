mod connection;
mod feed_repository;
mod subreddit_repository;

pub use connection::SqliteStorage;
pub use feed_repository::SqliteFeedRepository;
pub use subreddit_repository::SqliteSubredditRepository;
