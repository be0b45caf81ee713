pub mod traits;
pub mod sqlite;

pub use traits::{FeedRepository, SubredditRepository};
pub use sqlite::{SqliteFeedRepository, SqliteStorage, SqliteSubredditRepository};
