// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! SQLite-backed snapshot cache.

use formwork::{Cache, FormworkError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Cache storing blobs in a single SQLite table.
///
/// The database file is stored at `cache_dir/cache.db`.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Opens (or creates) the cache database under `cache_dir`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)?;
        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)
            .map_err(|e| FormworkError::Cache(format!("Failed to open database: {}", e)))?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS cache (
                key TEXT PRIMARY KEY NOT NULL,
                value BLOB NOT NULL
            )
            "#,
            [],
        )
        .map_err(|e| FormworkError::Cache(format!("Failed to create table: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FormworkError::Cache(e.to_string()))?;
        f(&conn).map_err(|e| FormworkError::Cache(e.to_string()))
    }
}

impl Cache for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cache (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| conn.execute("DELETE FROM cache WHERE key = ?1", params![key]))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_basic_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache = SqliteCache::new(&temp_dir.path().join("nested")).unwrap();

        cache.set("key1", b"value1").unwrap();
        assert_eq!(cache.get("key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(cache.get("nonexistent").unwrap(), None);

        cache.set("key1", b"value2").unwrap();
        assert_eq!(cache.get("key1").unwrap(), Some(b"value2".to_vec()));

        cache.remove("key1").unwrap();
        assert_eq!(cache.get("key1").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        SqliteCache::new(temp_dir.path())
            .unwrap()
            .set("formwork-forms", b"{}")
            .unwrap();

        let reopened = SqliteCache::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("formwork-forms").unwrap(), Some(b"{}".to_vec()));
    }
}
