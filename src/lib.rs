//! # Introduction
//!
//! bfvm runs programs for the eight-symbol tape language (`> < + - . , [ ]`)
//! on a bounds-checked byte tape. Moving off either end of the tape, nesting
//! loops too deeply, or closing a loop that was never opened stops the run
//! with a [`RuntimeError`](interpreter::errors::RuntimeError) instead of
//! wrapping around or crashing.
//!
//! ## Execution pipeline
//!
//! ```text
//! File → Loader → Program → Interpreter → stdout
//!                                 └─────→ Snapshots → TUI   (--debug)
//! ```
//!
//! 1. [`program`]: the immutable program bytes and instruction decoding.
//! 2. [`memory`]: the tape with its cursor and the loop frame stack.
//! 3. [`interpreter`]: the dispatch loop, bracket resolution, configuration,
//!    and the file loader.
//! 4. [`snapshot`]: execution history with a memory limit and a
//!    [`snapshot::MockTerminal`] that records output for replay.
//! 5. [`ui`]: ratatui-based step debugger; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use bfvm::interpreter::run_program;
//!
//! let mut input: &[u8] = b"";
//! let mut output = Vec::new();
//! run_program("++++++++[>++++++++<-]>+.", &mut input, &mut output).unwrap();
//! assert_eq!(output, b"A");
//! ```

pub mod interpreter;
pub mod memory;
pub mod program;
pub mod snapshot;
pub mod ui;
