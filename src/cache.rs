use crate::error::{ActivityError, Result};
use crate::model::SCHEMA_VERSION;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

pub const DEFAULT_CACHE_DIR: &str = ".gh-activity";

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// SQLite store of raw API responses keyed by repository slug.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_path: Option<P>) -> Result<Self> {
        let cache_dir = match cache_path {
            Some(path) => path.as_ref().to_path_buf(),
            None => Path::new(DEFAULT_CACHE_DIR).to_path_buf(),
        };
        std::fs::create_dir_all(&cache_dir)?;
        let conn = Connection::open(cache_dir.join("cache.db"))?;
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    pub fn in_memory() -> Result<Self> {
        let mut cache = Self { conn: Connection::open_in_memory()? };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS responses (
                key TEXT PRIMARY KEY,
                fetched_at INTEGER NOT NULL,
                body TEXT NOT NULL
            );
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(ActivityError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<CachedResponse>> {
        let result = self.conn.query_row(
            "SELECT fetched_at, body FROM responses WHERE key = ?",
            params![key],
            |row| {
                let ts: i64 = row.get(0)?;
                let fetched_at = Utc.timestamp_opt(ts, 0).single().ok_or_else(|| {
                    rusqlite::Error::InvalidColumnType(
                        0,
                        "fetched_at".to_string(),
                        rusqlite::types::Type::Integer,
                    )
                })?;
                Ok(CachedResponse { body: row.get(1)?, fetched_at })
            },
        );
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn put(&mut self, key: &str, body: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, fetched_at, body) VALUES (?, ?, ?)",
            params![key, fetched_at.timestamp(), body],
        )?;
        Ok(())
    }

    /// Removes every cached response and returns how many were dropped.
    pub fn clear(&mut self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM responses", [])?)
    }

    #[cfg(test)]
    pub(crate) fn set_read_only(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA query_only = 1;")?;
        Ok(())
    }
}
