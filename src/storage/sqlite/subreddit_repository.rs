use rusqlite::Row;

use crate::domain::Subreddit;
use crate::errors::{DashboardError, DashboardResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::SubredditRepository;

const SELECT_SUBREDDIT: &str = "SELECT id, name, sort_order, created_at FROM subreddits";

pub struct SqliteSubredditRepository {
    storage: SqliteStorage,
}

impl SqliteSubredditRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Subreddit> {
        Ok(Subreddit {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            sort_order: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl SubredditRepository for SqliteSubredditRepository {
    fn add(&self, subreddit: &Subreddit) -> DashboardResult<i64> {
        let conn = self.storage.connection()?;

        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM subreddits WHERE name = ?1)")?;
        let exists: bool = stmt.query_row([&subreddit.name], |row| row.get(0))?;
        drop(stmt);

        if exists {
            return Err(DashboardError::AlreadyExists(subreddit.name.clone()));
        }

        conn.execute(
            "INSERT INTO subreddits (name, sort_order)
             VALUES (?1, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM subreddits))",
            [&subreddit.name],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn remove(&self, id: i64) -> DashboardResult<bool> {
        let conn = self.storage.connection()?;
        let removed = conn.execute("DELETE FROM subreddits WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    fn get_all(&self) -> DashboardResult<Vec<Subreddit>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY sort_order, id", SELECT_SUBREDDIT))?;

        let subreddits = stmt.query_map([], Self::from_row)?;

        subreddits
            .collect::<Result<Vec<_>, _>>()
            .map_err(DashboardError::from)
    }

    fn get_by_id(&self, id: i64) -> DashboardResult<Option<Subreddit>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_SUBREDDIT))?;

        match stmt.query_row([id], Self::from_row) {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DashboardError::from(e)),
        }
    }

    fn exists(&self, name: &str) -> DashboardResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM subreddits WHERE name = ?1)")?;
        let exists: bool = stmt.query_row([name], |row| row.get(0))?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> SqliteSubredditRepository {
        SqliteSubredditRepository::new(SqliteStorage::in_memory().unwrap())
    }

    #[test]
    fn test_add_get_remove() {
        let repo = setup_repo();

        let id = repo.add(&Subreddit::new("rust".to_string())).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().name, "rust");

        assert!(repo.remove(id).unwrap());
        assert!(repo.get_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let repo = setup_repo();

        repo.add(&Subreddit::new("rust".to_string())).unwrap();
        let result = repo.add(&Subreddit::new("Rust".to_string()));

        assert!(matches!(result, Err(DashboardError::AlreadyExists(_))));
        assert!(repo.exists("RUST").unwrap());
    }

    #[test]
    fn test_get_all_ordered() {
        let repo = setup_repo();
        repo.add(&Subreddit::new("rust".to_string())).unwrap();
        repo.add(&Subreddit::new("selfhosted".to_string())).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["rust", "selfhosted"]);
    }
}
