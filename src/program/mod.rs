//! Program buffer and instruction decoding
//!
//! This module holds the immutable instruction sequence the engine executes:
//! - [`Program`]: the raw program bytes, addressed by instruction offset
//! - [`Instruction`]: the decoded meaning of a single byte
//! - [`jump_table`]: optional precomputed `[` → `]` targets
//!
//! # Source Format
//!
//! Only the eight symbols `> < + - . , [ ]` carry meaning. Every other byte is
//! a no-op, so whitespace and comments can be mixed freely into the source.
//! A NUL byte ends the program: anything after the first NUL is never
//! dispatched or scanned.

pub mod jump_table;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A decoded program byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// Any other byte
    NoOp,
}

impl Instruction {
    pub fn decode(byte: u8) -> Self {
        match byte {
            b'>' => Instruction::MoveRight,
            b'<' => Instruction::MoveLeft,
            b'+' => Instruction::Increment,
            b'-' => Instruction::Decrement,
            b'.' => Instruction::Output,
            b',' => Instruction::Input,
            b'[' => Instruction::LoopStart,
            b']' => Instruction::LoopEnd,
            _ => Instruction::NoOp,
        }
    }

    /// Check whether this byte has an effect when dispatched
    pub fn is_command(self) -> bool {
        !matches!(self, Instruction::NoOp)
    }
}

/// The instruction sequence for one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Build a program from raw source bytes, stopping at the first NUL
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let mut bytes = bytes.into();
        if let Some(nul) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(nul);
        }
        Program { bytes }
    }

    /// Number of addressable bytes (the end-of-program offset)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw byte at `offset`, `None` past the end
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Decoded instruction at `offset`, `None` past the end
    pub fn instruction_at(&self, offset: usize) -> Option<Instruction> {
        self.byte_at(offset).map(Instruction::decode)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes that are one of the eight commands
    pub fn command_count(&self) -> usize {
        self.bytes
            .iter()
            .filter(|&&b| Instruction::decode(b).is_command())
            .count()
    }

    /// Map an instruction offset to a 1-based line and column.
    ///
    /// Offsets past the end map to the position right after the last byte.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let end = offset.min(self.bytes.len());
        let mut line = 1;
        let mut column = 1;
        for &b in &self.bytes[..end] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        SourceLocation::new(line, column)
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Program::new(source.as_bytes())
    }
}
