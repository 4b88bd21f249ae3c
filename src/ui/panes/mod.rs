//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program text with the instruction pointer highlighted
//! - [`tape`]: Tape cells around the cursor
//! - [`frames`]: Open loop frames, innermost first
//! - [`output`]: Bytes written by `.` up to the current step
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state it needs between frames.

pub mod frames;
pub mod output;
pub mod source;
pub mod status;
pub mod tape;

pub use frames::{render_frames_pane, FramesScrollState};
pub use output::render_output_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tape::{render_tape_pane, TapeScrollState};
