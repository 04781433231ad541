use serde::{Deserialize, Serialize};

/// Maximum number of clipboard entries kept.
pub const MAX_HISTORY: usize = 10;

/// Captured clipboard strings, most recent first.
///
/// Never holds more than [`MAX_HISTORY`] entries. Only the most recent entry
/// is checked for duplicates at capture time, so older duplicates can coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<String>) -> Self {
        entries.truncate(MAX_HISTORY);
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn is_latest(&self, text: &str) -> bool {
        self.latest() == Some(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy with `text` prepended, dropping the oldest entries past
    /// the capacity.
    pub fn with_entry(&self, text: impl Into<String>) -> Self {
        let mut entries = Vec::with_capacity(MAX_HISTORY);
        entries.push(text.into());
        entries.extend(self.entries.iter().take(MAX_HISTORY - 1).cloned());
        Self { entries }
    }
}

impl From<Vec<String>> for History {
    fn from(entries: Vec<String>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<History> for Vec<String> {
    fn from(history: History) -> Self {
        history.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history_of(items: &[&str]) -> History {
        History::from_entries(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_with_entry_prepends() {
        let history = history_of(&["a"]).with_entry("b");
        assert_eq!(history.entries(), &["b".to_string(), "a".to_string()]);
        assert_eq!(history.latest(), Some("b"));
    }

    #[test]
    fn test_with_entry_drops_oldest_at_capacity() {
        let mut history = History::new();
        for i in 0..MAX_HISTORY {
            history = history.with_entry(format!("item {i}"));
        }
        assert_eq!(history.len(), MAX_HISTORY);

        let history = history.with_entry("newest");
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.latest(), Some("newest"));
        assert_eq!(history.get(MAX_HISTORY - 1), Some("item 1"));
        assert!(!history.entries().contains(&"item 0".to_string()));
    }

    #[test]
    fn test_with_entry_keeps_older_duplicates() {
        let history = history_of(&["b", "a"]).with_entry("a");
        assert_eq!(history.entries(), &["a", "b", "a"]);
    }

    #[test]
    fn test_is_latest() {
        let history = history_of(&["b", "a"]);
        assert!(history.is_latest("b"));
        assert!(!history.is_latest("a"));
        assert!(!History::new().is_latest(""));
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<String> = (0..15).map(|i| i.to_string()).collect();
        let history = History::from_entries(entries);
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.latest(), Some("0"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let history = history_of(&["b", "a"]);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["b","a"]"#);

        let parsed: History = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }
}
