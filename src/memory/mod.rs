//! Memory model for the tape machine
//!
//! This module provides the two pieces of mutable state an execution owns:
//! - [`tape`]: the byte tape and its cursor
//! - [`frames`]: the stack of open loop frames
//!
//! # Error Handling
//!
//! Both structures report a bounds violation as a bare [`Bound`]. They do not
//! know which instruction caused it, so the interpreter turns it into a
//! `RuntimeError` carrying the instruction offset.

pub mod frames;
pub mod tape;

/// Which end of a bounded structure an operation ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Past the last slot (tape end, frame capacity)
    Upper,
    /// Below the first slot (cell 0, empty frame stack)
    Lower,
}
