use rusqlite::Row;

use crate::domain::Feed;
use crate::errors::{DashboardError, DashboardResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FeedRepository;

const SELECT_FEED: &str = "SELECT id, title, url, sort_order, created_at FROM feeds";

pub struct SqliteFeedRepository {
    storage: SqliteStorage,
}

impl SqliteFeedRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Feed> {
        Ok(Feed {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            url: row.get(2)?,
            sort_order: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl FeedRepository for SqliteFeedRepository {
    fn add(&self, feed: &Feed) -> DashboardResult<i64> {
        let conn = self.storage.connection()?;

        // Check if already exists (within the same connection to avoid deadlock)
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM feeds WHERE url = ?1)")?;
        let exists: bool = stmt.query_row([&feed.url], |row| row.get(0))?;
        drop(stmt);

        if exists {
            return Err(DashboardError::AlreadyExists(feed.url.clone()));
        }

        conn.execute(
            "INSERT INTO feeds (title, url, sort_order)
             VALUES (?1, ?2, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM feeds))",
            (&feed.title, &feed.url),
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn remove(&self, id: i64) -> DashboardResult<bool> {
        let conn = self.storage.connection()?;
        let removed = conn.execute("DELETE FROM feeds WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    fn get_all(&self) -> DashboardResult<Vec<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY sort_order, id", SELECT_FEED))?;

        let feeds = stmt.query_map([], Self::from_row)?;

        feeds.collect::<Result<Vec<_>, _>>().map_err(DashboardError::from)
    }

    fn get_by_id(&self, id: i64) -> DashboardResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_FEED))?;

        match stmt.query_row([id], Self::from_row) {
            Ok(f) => Ok(Some(f)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DashboardError::from(e)),
        }
    }

    fn exists(&self, url: &str) -> DashboardResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM feeds WHERE url = ?1)")?;
        let exists: bool = stmt.query_row([url], |row| row.get(0))?;
        Ok(exists)
    }
}
