//! Tape pane rendering
//!
//! Shows the touched part of the tape as rows of [`CELLS_PER_ROW`] cells,
//! each row prefixed by the index of its first cell. The cell under the
//! cursor is highlighted and described in full (decimal, hex, character) in
//! a header line.
//!
//! Cells beyond the high-water mark are always zero and are not drawn.

use crate::memory::tape::Tape;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub const CELLS_PER_ROW: usize = 8;

/// Scroll state for the tape pane
pub struct TapeScrollState {
    pub offset: usize,
    pub follow_cursor: bool,
}

fn describe_byte(value: u8) -> String {
    match value {
        b' '..=b'~' => format!("'{}'", value as char),
        b'\n' => "'\\n'".to_string(),
        b'\t' => "'\\t'".to_string(),
        _ => "·".to_string(),
    }
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let cursor = tape.cursor();
    let block = Block::default()
        .title(format!(" Tape (cell {}/{}) ", cursor, tape.capacity()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let current = tape.current();
    let header = Line::from(vec![
        Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(
            format!("[{}] ", cursor),
            Style::default().fg(DEFAULT_THEME.offset),
        ),
        Span::styled(
            format!("{:3}", current),
            Style::default()
                .fg(DEFAULT_THEME.arith_cmd)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  0x{:02x}  {}", current, describe_byte(current)),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ]);

    let touched = tape.touched();
    let total_rows = touched.len().div_ceil(CELLS_PER_ROW);
    let cursor_row = cursor / CELLS_PER_ROW;

    // Header takes one row inside the borders
    let visible_height = area.height.saturating_sub(3).max(1) as usize;

    if total_rows > visible_height {
        let max_scroll = total_rows - visible_height;
        if scroll_state.follow_cursor {
            if cursor_row < scroll_state.offset {
                scroll_state.offset = cursor_row;
            } else if cursor_row >= scroll_state.offset + visible_height {
                scroll_state.offset = cursor_row + 1 - visible_height;
            }
        }
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let mut items = vec![ListItem::new(header)];

    for (row_idx, row) in touched
        .chunks(CELLS_PER_ROW)
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
    {
        let base = row_idx * CELLS_PER_ROW;
        let mut spans = vec![Span::styled(
            format!("{:05} │", base),
            Style::default().fg(DEFAULT_THEME.comment),
        )];

        for (i, &value) in row.iter().enumerate() {
            let index = base + i;
            let style = if index == cursor {
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if value == 0 {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{:3}", value), style));
        }

        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
