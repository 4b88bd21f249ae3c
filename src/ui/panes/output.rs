//! Output pane rendering
//!
//! Draws the bytes written by `.` up to the current history position. Text
//! runs are drawn as-is; any byte that is neither printable ASCII, tab nor
//! newline is drawn as a dimmed `\xNN` escape so that binary output stays
//! readable and lines up with what the program actually wrote.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Split output bytes into styled display lines.
///
/// A trailing newline does not open an extra empty line.
pub fn output_lines(bytes: &[u8]) -> Vec<Line<'static>> {
    let text_style = Style::default().fg(DEFAULT_THEME.fg);
    let escape_style = Style::default().fg(DEFAULT_THEME.comment);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();

    for &byte in bytes {
        match byte {
            b'\n' => {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), text_style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            b' '..=b'~' => run.push(byte as char),
            b'\t' => run.push_str("    "),
            _ => {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), text_style));
                }
                spans.push(Span::styled(format!("\\x{:02x}", byte), escape_style));
            }
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, text_style));
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the output pane; `scroll_offset` is the first visible line
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    bytes: &[u8],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let plural = if bytes.len() == 1 { "" } else { "s" };
    let block = Block::default()
        .title(format!(" Output ({} byte{}) ", bytes.len(), plural))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::left(1));

    let lines = output_lines(bytes);
    if lines.is_empty() {
        *scroll_offset = 0;
        let empty = Paragraph::new("(no output)")
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Newest output sticks to the bottom once it overflows
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let scroll = u16::try_from(*scroll_offset).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
