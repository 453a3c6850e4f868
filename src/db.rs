use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

/// Store of serialized reports keyed by `"<type>-<hash>"`.
///
/// Entries are written whole and never expire.
#[async_trait]
pub trait ReportCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, report: &str) -> Result<()>;
}

pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {:?}", dir))?;
        }
        let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Cache connection poisoned"))
    }

    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let report = conn
            .query_row(
                "SELECT report FROM report_cache WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(report)
    }

    /// Last writer wins.
    pub fn store(&self, key: &str, report: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO report_cache (key, report, cached_at)
             VALUES (?1, ?2, datetime('now'))",
            rusqlite::params![key, report],
        )?;
        Ok(())
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let conn = self.lock()?;
        let entries: usize =
            conn.query_row("SELECT COUNT(*) FROM report_cache", [], |r| r.get(0))?;
        let newest: Option<String> =
            conn.query_row("SELECT MAX(cached_at) FROM report_cache", [], |r| r.get(0))?;
        let bytes: i64 = conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(report)), 0) FROM report_cache",
            [],
            |r| r.get(0),
        )?;
        Ok(CacheStats {
            entries,
            newest,
            bytes,
        })
    }
}

#[async_trait]
impl ReportCache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.load(key)
    }

    async fn put(&self, key: &str, report: &str) -> Result<()> {
        self.store(key, report)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS report_cache (
            key        TEXT PRIMARY KEY,
            report     TEXT NOT NULL,
            cached_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Stats ──

pub struct CacheStats {
    pub entries: usize,
    pub newest: Option<String>,
    pub bytes: i64,
}
