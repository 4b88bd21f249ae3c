//! Loop bracket resolution (`[` and `]`).
//!
//! Adds `impl Interpreter` methods for the two bracket instructions. Both
//! look at the cell under the cursor at the moment the bracket is reached,
//! never at the value the loop was entered with.
//!
//! Pairing is discovered while running. An entered `[` pushes its own offset
//! as a loop frame, and a `]` jumps back to `frame + 1` or pops the frame. A
//! `[` whose condition is zero is skipped by scanning forward for its match,
//! or by a [`JumpTable`](crate::program::jump_table::JumpTable) lookup when
//! the engine was configured to build one.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::Bound;

impl Interpreter {
    /// Executes the `[` at `offset`.
    ///
    /// A non-zero condition enters the loop and pushes a frame. A zero
    /// condition moves the instruction pointer just past the matching `]`, or
    /// to the end of the program when there is none.
    pub(crate) fn enter_or_skip(&mut self, offset: usize) -> Result<(), RuntimeError> {
        if self.tape.current() != 0 {
            let capacity = self.frames.capacity();
            self.frames
                .push(offset)
                .map_err(|_| RuntimeError::LoopFrameOverflow { offset, capacity })?;
            self.ip = offset + 1;
            return Ok(());
        }

        self.ip = match &self.jump_table {
            Some(table) => table
                .skip_target(offset)
                .unwrap_or_else(|| self.program.len()),
            None => skip_forward(self.program.as_bytes(), offset),
        };
        Ok(())
    }

    /// Executes the `]` at `offset`.
    ///
    /// A non-zero condition jumps back into the body of the innermost open
    /// loop and keeps its frame. A zero condition pops the frame and falls
    /// through. Either way an empty frame stack is an unmatched `]`.
    pub(crate) fn repeat_or_exit(&mut self, offset: usize) -> Result<(), RuntimeError> {
        let unmatched = move |_: Bound| RuntimeError::LoopFrameUnderflow { offset };

        if self.tape.current() != 0 {
            let start = self.frames.top().map_err(unmatched)?;
            self.ip = start + 1;
        } else {
            self.frames.pop().map_err(unmatched)?;
            self.ip = offset + 1;
        }
        Ok(())
    }
}

/// Offset just past the `]` matching the `[` at `start`.
///
/// Returns `program.len()` when the brackets never balance.
pub fn skip_forward(program: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, &byte) in program.iter().enumerate().skip(start) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return offset + 1;
                }
            }
            _ => {}
        }
    }
    program.len()
}
