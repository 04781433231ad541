use super::mode::Mode;
use super::state::AppState;
use crate::keybindings::{Action, KeyBinding, KeyLookupResult};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::warn;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    match state.mode {
        Mode::Browse => handle_browse_mode(key, state)?,
        Mode::Dialog => handle_dialog_mode(key, state),
    }
    Ok(())
}

fn handle_browse_mode(key: KeyEvent, state: &mut AppState) -> Result<()> {
    let pending = state.pending_key.take();
    state.pending_key_time = None;

    match state.keybindings.lookup_browse(&key, pending) {
        KeyLookupResult::Action(action) => dispatch(action, state)?,
        KeyLookupResult::Pending => {
            state.pending_key = Some(KeyBinding::from_event(&key));
            state.pending_key_time = Some(Instant::now());
        }
        KeyLookupResult::None => {}
    }

    Ok(())
}

fn handle_dialog_mode(key: KeyEvent, state: &mut AppState) {
    if state.keybindings.get_dialog_action(&key) == Some(Action::DismissDialog) {
        state.close_dialog();
    }
}

/// Runs one bound action against the state.
pub fn dispatch(action: Action, state: &mut AppState) -> Result<()> {
    match action {
        Action::MoveUp => state.move_cursor_up(),
        Action::MoveDown => state.move_cursor_down(),
        Action::MoveTop => state.move_cursor_top(),
        Action::MoveBottom => state.move_cursor_bottom(),
        Action::Capture => capture(state)?,
        Action::CopySelected => copy_selected(state),
        Action::ClearHistory => clear(state)?,
        Action::ToggleHelp => state.show_help = !state.show_help,
        Action::CloseHelp => state.show_help = false,
        Action::Quit => state.should_quit = true,
        Action::DismissDialog => state.close_dialog(),
    }
    Ok(())
}

fn capture(state: &mut AppState) -> Result<()> {
    let outcome = state.controller.capture_clipboard()?;

    if let Some(message) = outcome.confirmation() {
        state.refresh()?;
        state.move_cursor_top();
        if state.confirm_capture {
            state.open_dialog(message);
        } else {
            state.set_status_message(message);
        }
    }

    Ok(())
}

fn copy_selected(state: &mut AppState) {
    let Some(item) = state.selected_item().cloned() else {
        return;
    };

    match state.controller.copy_item(&item) {
        Ok(()) => state.set_status_message(format!("Copied entry {}", item.index + 1)),
        Err(e) => {
            warn!(error = ?e, "Failed to copy entry");
            state.set_status_message(format!("Copy failed: {e}"));
        }
    }
}

fn clear(state: &mut AppState) -> Result<()> {
    state.controller.clear_history()?;
    state.refresh()?;
    state.set_status_message("History cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::FakeClipboard;
    use crate::controller::Controller;
    use crate::history::{History, HistoryView};
    use crate::keybindings::KeybindingCache;
    use crate::storage::memory::MemoryStore;
    use crate::ui::theme::Theme;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn setup(entries: &[&str]) -> (AppState, FakeClipboard) {
        let history = History::from_entries(entries.iter().map(|s| s.to_string()).collect());
        let clipboard = FakeClipboard::new();
        let controller = Controller::new(
            Box::new(MemoryStore::with_history(history)),
            Box::new(clipboard.clone()),
        );
        let state =
            AppState::new(controller, Theme::default(), KeybindingCache::default(), 1000, true)
                .unwrap();
        (state, clipboard)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), state).unwrap();
    }

    fn texts(state: &AppState) -> Vec<String> {
        state.view.items().iter().map(|i| i.text.clone()).collect()
    }

    #[test]
    fn test_capture_opens_blocking_dialog() {
        let (mut state, clipboard) = setup(&["old"]);
        clipboard.set_contents("fresh");

        press(&mut state, KeyCode::Char('c'));

        assert_eq!(state.mode, Mode::Dialog);
        assert_eq!(state.dialog_message.as_deref(), Some("Clipboard captured: fresh"));
        assert_eq!(texts(&state), vec!["fresh", "old"]);

        // Clear is swallowed while the dialog is up.
        press(&mut state, KeyCode::Char('D'));
        assert_eq!(state.mode, Mode::Dialog);
        assert_eq!(texts(&state), vec!["fresh", "old"]);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Browse);
    }

    #[test]
    fn test_capture_without_confirmation_sets_status() {
        let (mut state, clipboard) = setup(&[]);
        state.confirm_capture = false;
        clipboard.set_contents("quiet");

        press(&mut state, KeyCode::Char('c'));

        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(
            state.status_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Clipboard captured: quiet")
        );
    }

    #[test]
    fn test_duplicate_capture_is_silent() {
        let (mut state, clipboard) = setup(&["same"]);
        clipboard.set_contents("same");

        press(&mut state, KeyCode::Char('c'));

        assert_eq!(state.mode, Mode::Browse);
        assert!(state.dialog_message.is_none());
        assert_eq!(texts(&state), vec!["same"]);
    }

    #[test]
    fn test_failed_read_is_silent() {
        let (mut state, clipboard) = setup(&["kept"]);
        clipboard.fail_reads();

        press(&mut state, KeyCode::Char('c'));

        assert_eq!(state.mode, Mode::Browse);
        assert!(state.status_message.is_none());
        assert_eq!(texts(&state), vec!["kept"]);
    }

    #[test]
    fn test_copy_selected_writes_its_text() {
        let (mut state, clipboard) = setup(&["b", "a"]);

        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('y'));
        assert_eq!(clipboard.contents(), Some("a".to_string()));

        press(&mut state, KeyCode::Up);
        press(&mut state, KeyCode::Enter);
        assert_eq!(clipboard.contents(), Some("b".to_string()));
    }

    #[test]
    fn test_copy_on_placeholder_does_nothing() {
        let (mut state, clipboard) = setup(&[]);

        press(&mut state, KeyCode::Enter);

        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn test_clear_shows_placeholder() {
        let (mut state, _) = setup(&["b", "a"]);

        handle_key_event(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT), &mut state)
            .unwrap();

        assert_eq!(state.view, HistoryView::Placeholder);
        assert!(state.controller.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let (mut state, _) = setup(&["c", "b", "a"]);
        press(&mut state, KeyCode::Char('G'));
        assert_eq!(state.cursor_position, 2);

        press(&mut state, KeyCode::Char('g'));
        assert!(state.pending_key.is_some());
        press(&mut state, KeyCode::Char('g'));

        assert_eq!(state.cursor_position, 0);
        assert!(state.pending_key.is_none());
    }

    #[test]
    fn test_help_and_quit() {
        let (mut state, _) = setup(&[]);

        press(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        press(&mut state, KeyCode::Esc);
        assert!(!state.show_help);

        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }
}
