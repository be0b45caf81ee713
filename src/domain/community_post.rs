use serde::{Deserialize, Serialize};

/// One post of a subreddit's hot listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: String,
    pub title: String,
    pub url: String,
    pub permalink: String,
    pub score: i64,
    pub num_comments: i64,
    pub author: String,
    /// Seconds since the Unix epoch
    pub created_utc: i64,
    pub thumbnail: Option<String>,
    pub selftext: Option<String>,
}
