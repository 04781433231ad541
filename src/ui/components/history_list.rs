use crate::app::{AppState, Mode};
use crate::history::{HistoryView, PLACEHOLDER};
use crate::utils::unicode::{single_line, truncate_to_width};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const COPY_LABEL: &str = " [Copy]";

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Clipboard History ")
        .style(Style::default().bg(state.theme.background));

    let items = match &state.view {
        HistoryView::Placeholder => {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .block(block)
                .style(Style::default().fg(state.theme.placeholder));
            f.render_widget(placeholder, area);
            return;
        }
        HistoryView::Items(items) => items,
    };

    // Borders take two columns, the number prefix is fixed width.
    let available_width = area.width.saturating_sub(2) as usize;

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let is_cursor = item.index == state.cursor_position && state.mode == Mode::Browse;
            let number = format!("{:>2}. ", item.index + 1);
            let text_width = available_width.saturating_sub(number.width() + COPY_LABEL.width());
            let text = truncate_to_width(&single_line(&item.text), text_width);

            let text_style = if is_cursor {
                Style::default()
                    .fg(state.theme.cursor)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(state.theme.foreground)
            };

            let copy_style = if is_cursor {
                Style::default()
                    .fg(state.theme.copy_button)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(state.theme.placeholder)
                    .add_modifier(Modifier::DIM)
            };

            ListItem::new(Line::from(vec![
                Span::styled(number, Style::default().fg(state.theme.placeholder)),
                Span::styled(text, text_style),
                Span::styled(COPY_LABEL, copy_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor_position));

    let list = List::new(list_items).block(block);
    f.render_stateful_widget(list, area, &mut list_state);
}
