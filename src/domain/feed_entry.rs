use serde::{Deserialize, Serialize};

/// One normalized item of an RSS or Atom feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl FeedEntry {
    pub fn new(title: String, link: String) -> Self {
        Self {
            title,
            link,
            published: String::new(),
            summary: None,
        }
    }

    pub fn with_published(mut self, published: String) -> Self {
        self.published = published;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }
}
