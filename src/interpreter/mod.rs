//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the [`Interpreter`](engine::Interpreter) and its dispatch loop
//! - [`loops`]: `[` / `]` resolution against the loop frame stack
//! - [`config`]: tape size, frame limit, EOF behavior, bracket strategy
//! - [`loader`]: reading program files and running them
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! The interpreter executes one byte at a time. Every effect, including a
//! byte written by `.`, is complete before the next instruction starts, and
//! the first error stops the run with the instruction pointer still on the
//! failing instruction.
//!
//! # End of Input
//!
//! When `,` finds the input stream exhausted it stores 255 by default, the
//! byte a C `getchar()` EOF leaves behind. [`config::EofBehavior`] switches
//! this to 0 or to leaving the cell untouched.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod loops;

use crate::program::Program;
use config::Config;
use engine::Interpreter;
use errors::RuntimeError;
use std::io::{Read, Write};

/// Run program bytes on a fresh machine with the default configuration
pub fn run_program<R: Read, W: Write>(
    source: impl Into<Vec<u8>>,
    input: &mut R,
    output: &mut W,
) -> Result<(), RuntimeError> {
    let mut interpreter = Interpreter::new(Program::new(source), Config::default());
    interpreter.run(input, output)
}
