use super::mode::Mode;
use crate::controller::Controller;
use crate::history::{HistoryItem, HistoryView};
use crate::keybindings::{KeyBinding, KeybindingCache};
use crate::ui::theme::Theme;
use anyhow::Result;
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

pub struct AppState {
    pub controller: Controller,
    pub view: HistoryView,
    pub cursor_position: usize,
    pub mode: Mode,
    pub dialog_message: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub keybindings: KeybindingCache,
    pub pending_key: Option<KeyBinding>,
    pub pending_key_time: Option<Instant>,
    pub timeoutlen: u64,
    pub confirm_capture: bool,
    pub status_message: Option<(String, Instant)>,
}

impl AppState {
    /// Builds the state and performs the initial render.
    pub fn new(
        controller: Controller,
        theme: Theme,
        keybindings: KeybindingCache,
        timeoutlen: u64,
        confirm_capture: bool,
    ) -> Result<Self> {
        let mut state = Self {
            controller,
            view: HistoryView::Placeholder,
            cursor_position: 0,
            mode: Mode::Browse,
            dialog_message: None,
            should_quit: false,
            show_help: false,
            theme,
            keybindings,
            pending_key: None,
            pending_key_time: None,
            timeoutlen,
            confirm_capture,
            status_message: None,
        };
        state.refresh()?;
        Ok(state)
    }

    /// Rebuilds the view from storage.
    pub fn refresh(&mut self) -> Result<()> {
        self.view = self.controller.render()?;
        self.clamp_cursor();
        Ok(())
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_position + 1 < self.view.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_top(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_bottom(&mut self) {
        self.cursor_position = self.view.len().saturating_sub(1);
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor_position = self.cursor_position.min(self.view.len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&HistoryItem> {
        self.view.get(self.cursor_position)
    }

    pub fn open_dialog(&mut self, message: String) {
        self.dialog_message = Some(message);
        self.mode = Mode::Dialog;
        self.show_help = false;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_message = None;
        self.mode = Mode::Browse;
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) {
        if let Some((_, set_at)) = &self.status_message
            && set_at.elapsed() >= STATUS_MESSAGE_TTL
        {
            self.status_message = None;
        }
    }

    pub fn clear_expired_pending_key(&mut self) {
        if let Some(started) = self.pending_key_time
            && started.elapsed() >= Duration::from_millis(self.timeoutlen)
        {
            self.pending_key = None;
            self.pending_key_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::FakeClipboard;
    use crate::history::History;
    use crate::storage::memory::MemoryStore;

    fn state_with(entries: &[&str]) -> AppState {
        let history = History::from_entries(entries.iter().map(|s| s.to_string()).collect());
        let controller = Controller::new(
            Box::new(MemoryStore::with_history(history)),
            Box::new(FakeClipboard::new()),
        );
        AppState::new(controller, Theme::default(), KeybindingCache::default(), 1000, true)
            .unwrap()
    }

    #[test]
    fn test_new_renders_initial_view() {
        let state = state_with(&["b", "a"]);
        assert_eq!(state.view.len(), 2);
        assert_eq!(state.selected_item().map(|i| i.text.as_str()), Some("b"));

        let empty = state_with(&[]);
        assert_eq!(empty.view, HistoryView::Placeholder);
        assert!(empty.selected_item().is_none());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut state = state_with(&["c", "b", "a"]);

        state.move_cursor_up();
        assert_eq!(state.cursor_position, 0);

        state.move_cursor_bottom();
        assert_eq!(state.cursor_position, 2);
        state.move_cursor_down();
        assert_eq!(state.cursor_position, 2);

        state.move_cursor_top();
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_refresh_clamps_cursor() {
        let mut state = state_with(&["c", "b", "a"]);
        state.move_cursor_bottom();

        state.controller.clear_history().unwrap();
        state.refresh().unwrap();

        assert_eq!(state.cursor_position, 0);
        assert_eq!(state.view, HistoryView::Placeholder);
    }

    #[test]
    fn test_dialog_switches_mode() {
        let mut state = state_with(&[]);
        state.show_help = true;

        state.open_dialog("hello".to_string());
        assert_eq!(state.mode, Mode::Dialog);
        assert!(!state.show_help);

        state.close_dialog();
        assert_eq!(state.mode, Mode::Browse);
        assert!(state.dialog_message.is_none());
    }

    #[test]
    fn test_expired_pending_key_is_cleared() {
        let mut state = state_with(&[]);
        state.timeoutlen = 0;
        state.pending_key_time = Some(Instant::now());
        state.pending_key = "g".parse().ok();

        state.clear_expired_pending_key();

        assert!(state.pending_key.is_none());
    }
}
