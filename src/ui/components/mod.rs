pub mod history_list;
pub mod status_bar;

use crate::app::AppState;
use crate::keybindings::{Action, KeyBinding};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // History list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    history_list::render(f, state, chunks[0]);
    status_bar::render(f, state, chunks[1]);

    if state.show_help {
        render_help_overlay(f, state);
    }

    if let Some(message) = &state.dialog_message {
        render_dialog(f, state, message);
    }
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let key = |action: Action| {
        state
            .keybindings
            .key_for(action)
            .as_ref()
            .map(KeyBinding::to_string)
            .unwrap_or_else(|| "-".to_string())
    };

    let help_text = format!(
        "
    Clipboard History Help

      {:<8} Move cursor up
      {:<8} Move cursor down
      {:<8} Jump to newest / oldest (also gg)
      {:<8} Capture clipboard
      {:<8} Copy selected entry
      {:<8} Clear history
      {:<8} Toggle help
      {:<8} Quit
    ",
        key(Action::MoveUp),
        key(Action::MoveDown),
        format!("{}/{}", key(Action::MoveTop), key(Action::MoveBottom)),
        key(Action::Capture),
        key(Action::CopySelected),
        key(Action::ClearHistory),
        key(Action::ToggleHelp),
        key(Action::Quit),
    );

    let area = centered_rect(60, 60, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_dialog(f: &mut Frame, state: &AppState, message: &str) {
    let area = centered_rect(70, 30, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Captured ")
        .border_style(Style::default().fg(state.theme.dialog_border))
        .style(Style::default().bg(state.theme.background));

    let text = format!("{message}\n\n[Enter] OK");
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
