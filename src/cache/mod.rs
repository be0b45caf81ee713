pub mod clock;
pub mod ttl_cache;

use std::time::Duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl_cache::TtlCache;

/// How long a resolved favicon stays fresh
pub const FAVICON_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How long a feed's normalized entries stay fresh
pub const FEED_ENTRIES_TTL: Duration = Duration::from_secs(15 * 60);

/// How long a subreddit's hot listing stays fresh
pub const COMMUNITY_POSTS_TTL: Duration = Duration::from_secs(10 * 60);
