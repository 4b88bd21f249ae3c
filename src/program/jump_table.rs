//! Precomputed loop targets
//!
//! Skipping a loop normally rescans the program forward from the `[` every
//! time. A [`JumpTable`] does that matching once, up front, so a skip becomes
//! a single lookup. Only `[` offsets are recorded: `]` is always resolved
//! through the loop frame stack, which keeps unmatched `]` handling identical
//! between both strategies.

use super::Program;
use rustc_hash::FxHashMap;

/// `[` offset → offset just past its matching `]`
#[derive(Debug, Clone, Default)]
pub struct JumpTable {
    targets: FxHashMap<usize, usize>,
}

impl JumpTable {
    /// Pair brackets in a single pass.
    ///
    /// Stray `]` are ignored and unclosed `[` get no entry.
    pub fn build(program: &Program) -> Self {
        let mut targets = FxHashMap::default();
        let mut open: Vec<usize> = Vec::new();

        for (offset, &byte) in program.as_bytes().iter().enumerate() {
            match byte {
                b'[' => open.push(offset),
                b']' => {
                    if let Some(start) = open.pop() {
                        targets.insert(start, offset + 1);
                    }
                }
                _ => {}
            }
        }

        JumpTable { targets }
    }

    /// Where a skipped `[` at `offset` resumes, `None` if it never closes
    pub fn skip_target(&self, offset: usize) -> Option<usize> {
        self.targets.get(&offset).copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
