//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::ui::panes::{
    render_frames_pane, render_output_pane, render_source_pane, render_status_bar,
    render_tape_pane, FramesScrollState, SourceScrollState, StatusRenderData, TapeScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between automatic steps in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(150);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Output,
    Tape,
    Frames,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: program -> output -> tape -> frames)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Frames,
            FocusedPane::Frames => FocusedPane::Program,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Frames,
            FocusedPane::Output => FocusedPane::Program,
            FocusedPane::Tape => FocusedPane::Output,
            FocusedPane::Frames => FocusedPane::Tape,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter instance, with its recorded history
    pub interpreter: Interpreter,

    /// Error that ended the recorded run, shown at the last step
    pub run_error: Option<RuntimeError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tape_scroll: TapeScrollState,
    pub frames_scroll: FramesScrollState,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Create a new app around an interpreter that has already recorded a run
    pub fn new(interpreter: Interpreter, run_error: Option<RuntimeError>) -> Self {
        let status_message = match &run_error {
            Some(e) => format!("Run stopped: {}", e),
            None => String::from("Ready!"),
        };

        App {
            interpreter,
            run_error,
            focused_pane: FocusedPane::Program,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None, // Will be set to center on first render
            },
            tape_scroll: TapeScrollState {
                offset: 0,
                follow_cursor: true,
            },
            frames_scroll: FramesScrollState { offset: 0 },
            output_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The run error applies only once history has reached its last step
    fn showing_error(&self) -> bool {
        self.run_error.is_some()
            && self.interpreter.history_position() + 1 >= self.interpreter.total_snapshots()
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tape (top) | Loop frames (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let showing_error = self.showing_error();

        render_source_pane(
            frame,
            left_rows[0],
            self.interpreter.program(),
            self.interpreter.ip(),
            showing_error,
            self.focused_pane == FocusedPane::Program,
            &mut self.source_scroll,
        );

        render_output_pane(
            frame,
            left_rows[1],
            self.interpreter.visible_bytes(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        render_tape_pane(
            frame,
            right_rows[0],
            self.interpreter.tape(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        render_frames_pane(
            frame,
            right_rows[1],
            self.interpreter.frames(),
            self.interpreter.program(),
            self.focused_pane == FocusedPane::Frames,
            &mut self.frames_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.interpreter.history_position(),
                total_steps: self.interpreter.total_snapshots(),
                instructions_executed: self.interpreter.steps(),
                has_error: showing_error,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.after_move();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Program => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.follow_cursor = false;
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Program => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.follow_cursor = false;
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_add(1);
                }
                FocusedPane::Frames => {
                    self.frames_scroll.offset = self.frames_scroll.offset.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(PLAY_INTERVAL)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                match self.interpreter.jump_to_end() {
                    Ok(()) => self.status_message = "Jumped to end".to_string(),
                    Err(e) => self.status_message = e.to_string(),
                }
                self.after_move();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                match self.interpreter.rewind_to_start() {
                    Ok(()) => self.status_message = "Jumped to start".to_string(),
                    Err(e) => self.status_message = e.to_string(),
                }
                self.after_move();
            }
            _ => {}
        }
    }

    /// Re-follow the cursor and keep the newest output visible
    fn after_move(&mut self) {
        self.tape_scroll.follow_cursor = true;
        self.output_scroll = usize::MAX;
        if self.showing_error() {
            if let Some(e) = &self.run_error {
                self.status_message = format!("Run stopped: {}", e);
            }
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        match self.interpreter.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step forward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
        self.after_move();
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        match self.interpreter.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot step backward: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
        self.after_move();
    }
}
