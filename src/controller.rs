use crate::clipboard::ClipboardProvider;
use crate::history::{History, HistoryItem, HistoryView};
use crate::storage::HistoryStore;
use anyhow::Result;
use tracing::{debug, error, info};

/// What a capture did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The text was prepended to the history.
    Captured(String),
    /// The clipboard held no text.
    Empty,
    /// The text equals the most recent entry.
    Duplicate,
    /// Reading the clipboard failed. Already logged.
    ReadFailed,
}

impl CaptureOutcome {
    /// Message for the confirmation dialog, if this capture deserves one.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            CaptureOutcome::Captured(text) => Some(format!("Clipboard captured: {text}")),
            _ => None,
        }
    }
}

/// Owns the history store and the clipboard, and implements the popup's
/// operations on top of them.
pub struct Controller {
    store: Box<dyn HistoryStore>,
    clipboard: Box<dyn ClipboardProvider>,
}

impl Controller {
    pub fn new(store: Box<dyn HistoryStore>, clipboard: Box<dyn ClipboardProvider>) -> Self {
        Self { store, clipboard }
    }

    pub fn load_history(&self) -> Result<History> {
        self.store.load()
    }

    pub fn save_history(&self, history: &History) -> Result<()> {
        self.store.save(history)
    }

    /// Prepends `text` unconditionally and returns the new history.
    pub fn add_entry(&self, text: &str) -> Result<History> {
        let written = self.store.update(&mut |history| Some(history.with_entry(text)))?;
        Ok(written.unwrap_or_default())
    }

    pub fn capture_clipboard(&mut self) -> Result<CaptureOutcome> {
        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                error!(error = ?e, "Failed to read clipboard");
                return Ok(CaptureOutcome::ReadFailed);
            }
        };

        if text.is_empty() {
            debug!("Clipboard is empty, nothing to capture");
            return Ok(CaptureOutcome::Empty);
        }

        // Duplicate check and prepend share one atomic update.
        let written = self.store.update(&mut |history| {
            if history.is_latest(&text) {
                None
            } else {
                Some(history.with_entry(text.as_str()))
            }
        })?;

        match written {
            Some(history) => {
                info!(entries = history.len(), "Captured clipboard text");
                Ok(CaptureOutcome::Captured(text))
            }
            None => {
                debug!("Clipboard text matches the latest entry");
                Ok(CaptureOutcome::Duplicate)
            }
        }
    }

    pub fn clear_history(&self) -> Result<()> {
        self.store.update(&mut |_| Some(History::new()))?;
        info!("Cleared clipboard history");
        Ok(())
    }

    pub fn render(&self) -> Result<HistoryView> {
        Ok(HistoryView::build(&self.load_history()?))
    }

    pub fn copy_item(&mut self, item: &HistoryItem) -> Result<()> {
        self.clipboard.write_text(&item.text)?;
        debug!(index = item.index, "Copied entry to clipboard");
        Ok(())
    }
}
