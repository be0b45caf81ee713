pub mod feed;
pub mod subreddit;
pub mod feed_entry;
pub mod community_post;
pub mod favicon;

pub use feed::Feed;
pub use subreddit::Subreddit;
pub use feed_entry::FeedEntry;
pub use community_post::CommunityPost;
pub use favicon::FaviconAsset;
