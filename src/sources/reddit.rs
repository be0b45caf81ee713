use serde::Deserialize;
use url::Url;

use crate::domain::CommunityPost;
use crate::errors::{DashboardError, DashboardResult};
use crate::sources::rss_atom::truncate_chars;

pub const REDDIT_ORIGIN: &str = "https://www.reddit.com";

/// Posts requested per listing; also the most ever returned
pub const PAGE_SIZE: usize = 20;

/// Longest selftext kept, in characters
pub const MAX_SELFTEXT_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
    #[serde(default)]
    author: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    selftext: Option<String>,
}

/// URL of the hot listing for a subreddit, with the name escaped as a single
/// path segment
pub fn hot_listing_url(name: &str) -> DashboardResult<String> {
    let mut url = Url::parse(REDDIT_ORIGIN).map_err(|e| DashboardError::Config(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| DashboardError::Config("reddit origin cannot be a base".to_string()))?
        .extend(&["r", name, "hot.json"]);
    url.query_pairs_mut()
        .append_pair("limit", &PAGE_SIZE.to_string());

    Ok(url.into())
}

/// Parse a listing document into at most [`PAGE_SIZE`] posts, in upstream order
pub fn parse_listing(bytes: &[u8]) -> DashboardResult<Vec<CommunityPost>> {
    let listing: Listing =
        serde_json::from_slice(bytes).map_err(|e| DashboardError::Parse(e.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .take(PAGE_SIZE)
        .map(|child| normalize_post(child.data))
        .collect())
}

fn normalize_post(raw: RawPost) -> CommunityPost {
    CommunityPost {
        id: raw.id,
        title: raw.title,
        url: raw.url,
        permalink: format!("{}{}", REDDIT_ORIGIN, raw.permalink),
        score: raw.score,
        num_comments: raw.num_comments,
        author: raw.author,
        created_utc: raw.created_utc as i64,
        thumbnail: raw.thumbnail.filter(|t| is_absolute_http_url(t)),
        selftext: raw
            .selftext
            .map(|text| truncate_chars(&text, MAX_SELFTEXT_CHARS)),
    }
}

/// Reddit uses sentinels such as "self", "default" or "nsfw" for missing thumbnails
fn is_absolute_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}
