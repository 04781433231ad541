use crate::app::AppState;
use crate::history::MAX_HISTORY;
use crate::keybindings::Action;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let left_content = match &state.status_message {
        Some((message, _)) => format!(" {} | {}", state.mode, message),
        None => format!(" {} | {}/{} entries", state.mode, state.view.len(), MAX_HISTORY),
    };

    let hint = |action: Action, label: &str| {
        state
            .keybindings
            .key_for(action)
            .map(|key| format!("{key} {label}"))
    };
    let nav_hint = [
        hint(Action::Capture, "capture"),
        hint(Action::CopySelected, "copy"),
        hint(Action::ClearHistory, "clear"),
        hint(Action::ToggleHelp, "help"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("  ");
    let version_text = format!("v{VERSION}");

    let padding = area.width.saturating_sub(
        (left_content.width() + nav_hint.width() + version_text.width() + 3) as u16,
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let status_line = format!(
        "{} {} {:>padding$} {}",
        left_content,
        nav_hint,
        "",
        version_text,
        padding = padding as usize
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));

    f.render_widget(status, area);
}
