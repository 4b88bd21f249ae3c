//! Runtime error types for the tape machine
//!
//! This module defines [`RuntimeError`], which represents every way a run can
//! fail: bounds violations on the tape or the loop frame stack, I/O failures
//! while loading the program or moving bytes through `.` and `,`, and the
//! debugger's history errors.
//!
//! All runtime errors are fatal - they halt execution immediately and no
//! further instruction runs.

use std::fmt;
use std::io;

/// The I/O step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Stat,
    Open,
    /// The program buffer could not be reserved
    Allocate,
    Read,
    /// `,` could not read from the input stream
    Input,
    /// `.` could not write to the output stream
    Output,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            IoOperation::Stat => "failed to stat",
            IoOperation::Open => "could not open file",
            IoOperation::Allocate => "failed to allocate memory",
            IoOperation::Read => "failed to read file",
            IoOperation::Input => "failed to read input",
            IoOperation::Output => "failed to write output",
        };
        f.write_str(verb)
    }
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `>` on the last tape cell
    StackOverflow {
        offset: usize,
        cursor: usize,
        capacity: usize,
    },

    /// `<` on cell 0
    StackUnderflow { offset: usize },

    /// `[` entered with every loop frame in use
    LoopFrameOverflow { offset: usize, capacity: usize },

    /// `]` with no open loop
    LoopFrameUnderflow { offset: usize },

    /// Program file or stream I/O failed
    Io {
        operation: IoOperation,
        target: String,
        message: String,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation went past either end
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    /// Offset of the instruction that failed, if the error came from one
    pub fn offset(&self) -> Option<usize> {
        match self {
            RuntimeError::StackOverflow { offset, .. } => Some(*offset),
            RuntimeError::StackUnderflow { offset } => Some(*offset),
            RuntimeError::LoopFrameOverflow { offset, .. } => Some(*offset),
            RuntimeError::LoopFrameUnderflow { offset } => Some(*offset),
            RuntimeError::Io { .. } => None,
            RuntimeError::SnapshotLimitExceeded { .. } => None,
            RuntimeError::HistoryOperationFailed { .. } => None,
        }
    }

    pub(crate) fn io(operation: IoOperation, target: impl Into<String>, err: &io::Error) -> Self {
        RuntimeError::Io {
            operation,
            target: target.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackOverflow {
                offset,
                cursor,
                capacity,
            } => {
                write!(
                    f,
                    "stack overflow detected at offset {}: cell {} is the last of {}",
                    offset, cursor, capacity
                )
            }
            RuntimeError::StackUnderflow { offset } => {
                write!(f, "stack underflow detected at offset {}", offset)
            }
            RuntimeError::LoopFrameOverflow { offset, capacity } => {
                write!(
                    f,
                    "loop frame overflow at offset {}: more than {} nested loops",
                    offset, capacity
                )
            }
            RuntimeError::LoopFrameUnderflow { offset } => {
                write!(f, "unmatched `]` at offset {}: no open loop", offset)
            }
            RuntimeError::Io {
                operation,
                target,
                message,
            } => {
                write!(f, "{}: `{}` ({})", operation, target, message)
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
