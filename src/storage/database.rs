use super::{HistoryStore, HISTORY_KEY};
use crate::history::History;
use crate::utils::paths::{ensure_directories_exist, get_database_path};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed key-value store.
///
/// Every mutation runs in an IMMEDIATE transaction, so concurrent writers
/// (the popup and a `cliphist capture` running at the same time) are
/// serialized by the database lock instead of overwriting each other.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.init()?;
        Ok(store)
    }

    pub fn open_default() -> Result<Self> {
        ensure_directories_exist()?;
        Self::open(get_database_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("Failed to open database at {:?}", self.path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn init(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

fn read_history(conn: &Connection) -> Result<History> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![HISTORY_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("Stored value for '{HISTORY_KEY}' is not a list of strings")),
        None => Ok(History::new()),
    }
}

fn write_history(conn: &Connection, history: &History) -> Result<()> {
    let json = serde_json::to_string(history)?;
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![HISTORY_KEY, json],
    )?;
    debug!(entries = history.len(), "Saved clipboard history");
    Ok(())
}

impl HistoryStore for SqliteStore {
    fn load(&self) -> Result<History> {
        let conn = self.connection()?;
        read_history(&conn)
    }

    fn save(&self, history: &History) -> Result<()> {
        let conn = self.connection()?;
        write_history(&conn, history)
    }

    fn update(
        &self,
        apply: &mut dyn FnMut(&History) -> Option<History>,
    ) -> Result<Option<History>> {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to lock clipboard history for update")?;

        let current = read_history(&tx)?;
        let next = apply(&current);
        if let Some(history) = &next {
            write_history(&tx, history)?;
        }
        tx.commit()?;

        Ok(next)
    }
}
