//! The machine's data memory
//!
//! A [`Tape`] is a fixed number of byte cells plus a cursor. Cells start at
//! zero and wrap on overflow. The cursor never wraps: moving past either end
//! is reported back to the caller and leaves the cursor where it was.
//!
//! The tape also tracks a high-water mark, one past the furthest cell the
//! cursor has ever reached. Cells at or beyond it are guaranteed to be zero,
//! which lets snapshots store only the touched prefix.

use super::Bound;

/// Fixed-capacity byte tape with a bounds-checked cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
    high_water: usize,
}

impl Tape {
    /// Create a zeroed tape with `capacity` cells.
    ///
    /// A zero capacity is bumped to one cell so the cursor always has
    /// something to point at.
    pub fn new(capacity: usize) -> Self {
        Tape {
            cells: vec![0; capacity.max(1)],
            cursor: 0,
            high_water: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor one cell right
    pub fn move_right(&mut self) -> Result<(), Bound> {
        let next = self.cursor + 1;
        if next >= self.cells.len() {
            return Err(Bound::Upper);
        }
        self.cursor = next;
        self.high_water = self.high_water.max(next + 1);
        Ok(())
    }

    /// Move the cursor one cell left
    pub fn move_left(&mut self) -> Result<(), Bound> {
        self.cursor = self.cursor.checked_sub(1).ok_or(Bound::Lower)?;
        Ok(())
    }

    /// Place the cursor directly, for presetting state
    pub fn seek(&mut self, index: usize) -> Result<(), Bound> {
        if index >= self.cells.len() {
            return Err(Bound::Upper);
        }
        self.cursor = index;
        self.high_water = self.high_water.max(index + 1);
        Ok(())
    }

    /// Value under the cursor
    pub fn current(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    /// Read any cell, `None` outside the tape
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// Write any cell without moving the cursor
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), Bound> {
        let cell = self.cells.get_mut(index).ok_or(Bound::Upper)?;
        *cell = value;
        self.high_water = self.high_water.max(index + 1);
        Ok(())
    }

    /// Cells the program has been able to reach so far
    pub fn touched(&self) -> &[u8] {
        &self.cells[..self.high_water]
    }

    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Restore cursor and contents from a touched prefix.
    ///
    /// Cells past the prefix are zeroed up to the current high-water mark;
    /// everything beyond that is already zero.
    pub fn restore(&mut self, touched: &[u8], cursor: usize) {
        let len = touched.len().min(self.cells.len());
        self.cells[..len].copy_from_slice(&touched[..len]);
        if self.high_water > len {
            self.cells[len..self.high_water].fill(0);
        }
        self.high_water = len.max(1);
        self.cursor = cursor.min(self.cells.len() - 1);
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(crate::interpreter::constants::TAPE_SIZE)
    }
}
