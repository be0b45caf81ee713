use serde::{Deserialize, Serialize};

/// A followed RSS/Atom feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
    #[serde(skip)]
    pub sort_order: i64,
    #[serde(skip)]
    pub created_at: Option<String>,
}

impl Feed {
    pub fn new(title: String, url: String) -> Self {
        Self {
            id: None,
            title,
            url,
            sort_order: 0,
            created_at: None,
        }
    }

    /// Key of this feed's entries in the entry cache
    pub fn cache_key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.url.clone(),
        }
    }
}
