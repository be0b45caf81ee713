use serde::{Deserialize, Serialize};

/// A followed subreddit; `name` is stored without the `r/` prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subreddit {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip)]
    pub sort_order: i64,
    #[serde(skip)]
    pub created_at: Option<String>,
}

impl Subreddit {
    pub fn new(name: String) -> Self {
        Self {
            id: None,
            name,
            sort_order: 0,
            created_at: None,
        }
    }

    /// Posts are cached by name, the key Reddit itself uses
    pub fn cache_key(&self) -> &str {
        &self.name
    }
}
