pub mod favicon_service;
pub mod feed_entry_service;
pub mod community_post_service;
pub mod follow_service;

pub use favicon_service::FaviconService;
pub use feed_entry_service::FeedEntryService;
pub use community_post_service::CommunityPostService;
pub use follow_service::FollowService;
