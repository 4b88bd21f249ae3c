//! Program file loading
//!
//! The engine only ever sees bytes already in memory. This module is the glue
//! between a path on disk and a run: stat the file, open it, reserve and read
//! exactly the statted length, and hand the bytes to a fresh [`Interpreter`].
//! Every failure along the way becomes a [`RuntimeError::Io`], including a
//! buffer that cannot be allocated, so callers get the same result type for
//! load errors and execution errors.

use crate::interpreter::config::Config;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{IoOperation, RuntimeError};
use crate::program::Program;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Read a program file from disk.
///
/// The file must still have the length it had when it was statted; a file
/// that shrinks or grows in between is reported as a read failure.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, RuntimeError> {
    let path = path.as_ref();
    let target = path.display().to_string();

    let metadata =
        fs::metadata(path).map_err(|e| RuntimeError::io(IoOperation::Stat, &*target, &e))?;
    let expected = usize::try_from(metadata.len()).map_err(|_| RuntimeError::Io {
        operation: IoOperation::Allocate,
        target: target.clone(),
        message: format!("file too large ({} bytes)", metadata.len()),
    })?;

    let file = File::open(path).map_err(|e| RuntimeError::io(IoOperation::Open, &*target, &e))?;

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(expected)
        .map_err(|e| RuntimeError::Io {
            operation: IoOperation::Allocate,
            target: target.clone(),
            message: e.to_string(),
        })?;
    file.take(metadata.len() + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| RuntimeError::io(IoOperation::Read, &*target, &e))?;

    if bytes.len() != expected {
        return Err(RuntimeError::Io {
            operation: IoOperation::Read,
            target,
            message: format!("expected {} bytes, read {}", expected, bytes.len()),
        });
    }

    Ok(Program::new(bytes))
}

/// Load and run a program file with the default configuration
pub fn run_file<R: Read, W: Write>(
    path: impl AsRef<Path>,
    input: &mut R,
    output: &mut W,
) -> Result<(), RuntimeError> {
    run_file_with_config(path, Config::default(), input, output)
}

/// Load and run a program file
pub fn run_file_with_config<R: Read, W: Write>(
    path: impl AsRef<Path>,
    config: Config,
    input: &mut R,
    output: &mut W,
) -> Result<(), RuntimeError> {
    let program = load_program(path)?;
    let mut interpreter = Interpreter::new(program, config);
    interpreter.run(input, output)
}
