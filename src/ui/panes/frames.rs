//! Loop frame pane rendering
//!
//! Lists the open loops innermost first. Each frame shows the offset and
//! source position of the `[` that opened it, which is where a non-zero `]`
//! jumps back to.

use crate::memory::frames::LoopFrameStack;
use crate::program::Program;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the frames pane
pub struct FramesScrollState {
    pub offset: usize,
}

/// Render the loop frame pane
pub fn render_frames_pane(
    frame: &mut Frame,
    area: Rect,
    frames: &LoopFrameStack,
    program: &Program,
    is_focused: bool,
    scroll_state: &mut FramesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(
            " Loop Frames ({}/{}) ",
            frames.depth(),
            frames.capacity()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    if frames.is_empty() {
        let list = List::new(vec![
            ListItem::new("(no open loops)").style(Style::default().fg(DEFAULT_THEME.comment))
        ])
        .block(block);
        frame.render_widget(list, area);
        return;
    }

    let all_items: Vec<ListItem> = frames
        .frames()
        .iter()
        .enumerate()
        .rev()
        .map(|(depth, &offset)| {
            let location = program.location(offset);
            ListItem::new(Line::from(vec![
                Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("Frame {} ", depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    "[",
                    Style::default()
                        .fg(DEFAULT_THEME.bracket)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" @ {}", offset),
                    Style::default().fg(DEFAULT_THEME.offset),
                ),
                Span::styled(
                    format!("  (line {}, col {})", location.line, location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_items - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
