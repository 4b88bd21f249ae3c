//! Loop frame stack
//!
//! One frame is pushed for every `[` the program enters and popped when the
//! matching `]` exits. A frame is just the offset of its `[`, so re-entering a
//! loop body means jumping to `frame + 1`.

use super::Bound;

/// Bounded stack of open-loop offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopFrameStack {
    frames: Vec<usize>,
    capacity: usize,
}

impl LoopFrameStack {
    pub fn new(capacity: usize) -> Self {
        LoopFrameStack {
            frames: Vec::new(),
            capacity,
        }
    }

    /// Push the offset of an entered `[`
    pub fn push(&mut self, offset: usize) -> Result<(), Bound> {
        if self.frames.len() >= self.capacity {
            return Err(Bound::Upper);
        }
        self.frames.push(offset);
        Ok(())
    }

    /// Pop the innermost frame
    pub fn pop(&mut self) -> Result<usize, Bound> {
        self.frames.pop().ok_or(Bound::Lower)
    }

    /// Innermost frame, without removing it
    pub fn top(&self) -> Result<usize, Bound> {
        self.frames.last().copied().ok_or(Bound::Lower)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All open frames, outermost first (for UI display)
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Replace the open frames, e.g. when restoring a snapshot
    pub fn restore(&mut self, frames: &[usize]) {
        self.frames.clear();
        self.frames.extend_from_slice(frames);
    }
}

impl Default for LoopFrameStack {
    fn default() -> Self {
        Self::new(crate::interpreter::constants::MAX_LOOP_FRAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_capacity() {
        let mut frames = LoopFrameStack::new(2);
        assert!(frames.push(0).is_ok());
        assert!(frames.push(5).is_ok());
        assert_eq!(frames.push(9), Err(Bound::Upper));
        assert_eq!(frames.depth(), 2);
        assert_eq!(frames.top(), Ok(5));
    }

    #[test]
    fn test_empty_stack_underflows() {
        let mut frames = LoopFrameStack::default();
        assert_eq!(frames.top(), Err(Bound::Lower));
        assert_eq!(frames.pop(), Err(Bound::Lower));
    }

    #[test]
    fn test_top_does_not_pop() {
        let mut frames = LoopFrameStack::new(4);
        frames.push(3).unwrap();
        assert_eq!(frames.top(), Ok(3));
        assert_eq!(frames.depth(), 1);
        assert_eq!(frames.pop(), Ok(3));
        assert!(frames.is_empty());
    }
}
