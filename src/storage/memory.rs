use super::HistoryStore;
use crate::history::History;
use anyhow::Result;
use std::sync::Mutex;

/// In-process store used by the controller and UI tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: Mutex<History>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: History) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<History> {
        Ok(self.history.lock().unwrap().clone())
    }

    fn save(&self, history: &History) -> Result<()> {
        *self.history.lock().unwrap() = history.clone();
        Ok(())
    }

    fn update(
        &self,
        apply: &mut dyn FnMut(&History) -> Option<History>,
    ) -> Result<Option<History>> {
        let mut guard = self.history.lock().unwrap();
        let next = apply(&*guard);
        if let Some(history) = &next {
            *guard = history.clone();
        }
        Ok(next)
    }
}
