use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NEWLINE_MARKER: char = '⏎';
const ELLIPSIS: char = '…';

/// Collapses an entry onto one line so multi-line clips keep one row each.
pub fn single_line(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => out.push(NEWLINE_MARKER),
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Cuts `s` to at most `max_width` display columns, ending in an ellipsis when
/// anything was dropped.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}
