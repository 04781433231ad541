pub mod database;
#[cfg(test)]
pub mod memory;

use crate::history::History;
use anyhow::Result;

pub use database::SqliteStore;

/// Storage key holding the serialized history.
pub const HISTORY_KEY: &str = "clipboardHistory";

/// Key-addressed persistence for the clipboard history.
pub trait HistoryStore {
    /// Returns the stored history, or an empty one when nothing was stored yet.
    fn load(&self) -> Result<History>;

    /// Replaces the stored history.
    fn save(&self, history: &History) -> Result<()>;

    /// Atomic read-modify-write. `apply` sees the current history and returns
    /// the replacement, or `None` to leave storage untouched. Returns what was
    /// written.
    fn update(
        &self,
        apply: &mut dyn FnMut(&History) -> Option<History>,
    ) -> Result<Option<History>>;
}
