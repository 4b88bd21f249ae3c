//! Program pane rendering with instruction highlighting
//!
//! This module renders the program being executed, one source line per row,
//! with the eight commands colored by kind and everything else dimmed as
//! commentary. The byte at the instruction pointer is drawn inverted; when
//! execution stopped on an error it is drawn in the error color instead.
//!
//! Bytes are rendered one cell each (non-printable bytes as `·`) so that the
//! highlighted column always lines up with the instruction offset.

use crate::program::{Instruction, Program};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the program pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

fn instruction_style(byte: u8) -> Style {
    match Instruction::decode(byte) {
        Instruction::MoveRight | Instruction::MoveLeft => {
            Style::default().fg(DEFAULT_THEME.move_cmd)
        }
        Instruction::Increment | Instruction::Decrement => {
            Style::default().fg(DEFAULT_THEME.arith_cmd)
        }
        Instruction::Output | Instruction::Input => Style::default().fg(DEFAULT_THEME.io_cmd),
        Instruction::LoopStart | Instruction::LoopEnd => Style::default()
            .fg(DEFAULT_THEME.bracket)
            .add_modifier(Modifier::BOLD),
        Instruction::NoOp => Style::default().fg(DEFAULT_THEME.comment),
    }
}

fn display_char(byte: u8) -> char {
    match byte {
        b' '..=b'~' => byte as char,
        b'\t' => ' ',
        _ => '·',
    }
}

/// Render the program pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    ip: usize,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = format!(" Program (offset {}/{}) ", ip, program.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    // (start offset, bytes) for every line, newlines excluded
    let mut lines: Vec<(usize, &[u8])> = Vec::new();
    let mut start = 0;
    for line in program.as_bytes().split(|&b| b == b'\n') {
        lines.push((start, line));
        start += line.len() + 1;
    }
    let total_lines = lines.len();

    let location = program.location(ip);
    let current_line = location.line;

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    let target_line_idx = current_line.saturating_sub(1);
    scroll_state.offset = target_line_idx.saturating_sub(target_row);
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, (line_start, bytes))| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];

            for (i, &byte) in bytes.iter().enumerate() {
                let offset = line_start + i;
                let mut style = instruction_style(byte);
                if offset == ip {
                    style = if is_error {
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                            .bg(DEFAULT_THEME.secondary)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD)
                    };
                } else if is_current {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }
                spans.push(Span::styled(display_char(byte).to_string(), style));
            }

            // End of program marker
            if is_current && ip == program.len() && line_start + bytes.len() == ip {
                spans.push(Span::styled(
                    " ⏹ end",
                    Style::default()
                        .fg(DEFAULT_THEME.success)
                        .add_modifier(Modifier::BOLD),
                ));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
