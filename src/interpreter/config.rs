//! Engine configuration
//!
//! [`Config`] fixes the machine's shape for one run. The defaults reproduce
//! the classic machine: 32 KiB tape, 1024 loop frames, `,` stores 255 at end
//! of input, and skipped loops are found by scanning forward.

use super::constants::{EOF_SENTINEL, MAX_LOOP_FRAMES, TAPE_SIZE};
use std::fmt;
use std::str::FromStr;

/// What `,` stores when the input stream is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofBehavior {
    /// Store 255
    #[default]
    AllOnes,
    /// Store 0
    Zero,
    /// Leave the cell as it was
    Unchanged,
}

impl EofBehavior {
    /// Value to store over `current`, `None` to leave it
    pub fn value(self) -> Option<u8> {
        match self {
            EofBehavior::AllOnes => Some(EOF_SENTINEL),
            EofBehavior::Zero => Some(0),
            EofBehavior::Unchanged => None,
        }
    }
}

impl FromStr for EofBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" | "255" | "all-ones" => Ok(EofBehavior::AllOnes),
            "zero" | "0" => Ok(EofBehavior::Zero),
            "unchanged" | "keep" => Ok(EofBehavior::Unchanged),
            other => Err(format!(
                "unknown EOF behavior `{}` (expected max, zero or unchanged)",
                other
            )),
        }
    }
}

impl fmt::Display for EofBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofBehavior::AllOnes => write!(f, "max"),
            EofBehavior::Zero => write!(f, "zero"),
            EofBehavior::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// How a `[` with a zero condition finds its matching `]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketMatching {
    /// Scan forward from the `[` every time
    #[default]
    Scan,
    /// Look the target up in a table built before the run
    Precomputed,
}

/// Machine parameters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of tape cells. Zero is treated as one: the cursor always needs
    /// a cell to point at, so a zero-sized tape runs as a single cell.
    pub tape_size: usize,
    /// Loop nesting limit. Zero makes every entered `[` overflow.
    pub max_loop_frames: usize,
    pub eof: EofBehavior,
    pub bracket_matching: BracketMatching,
}

impl Config {
    /// Set the tape size; see [`Config::tape_size`] for how zero is handled
    pub fn with_tape_size(mut self, tape_size: usize) -> Self {
        self.tape_size = tape_size;
        self
    }

    pub fn with_max_loop_frames(mut self, max_loop_frames: usize) -> Self {
        self.max_loop_frames = max_loop_frames;
        self
    }

    pub fn with_eof(mut self, eof: EofBehavior) -> Self {
        self.eof = eof;
        self
    }

    pub fn with_bracket_matching(mut self, bracket_matching: BracketMatching) -> Self {
        self.bracket_matching = bracket_matching;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tape_size: TAPE_SIZE,
            max_loop_frames: MAX_LOOP_FRAMES,
            eof: EofBehavior::default(),
            bracket_matching: BracketMatching::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tape_size, 32 * 1024);
        assert_eq!(config.max_loop_frames, 1024);
        assert_eq!(config.eof.value(), Some(255));
        assert_eq!(config.bracket_matching, BracketMatching::Scan);
    }

    #[test]
    fn test_parse_eof_behavior() {
        assert_eq!("zero".parse::<EofBehavior>(), Ok(EofBehavior::Zero));
        assert_eq!("unchanged".parse::<EofBehavior>(), Ok(EofBehavior::Unchanged));
        assert_eq!("max".parse::<EofBehavior>(), Ok(EofBehavior::AllOnes));
        assert!("minus-one".parse::<EofBehavior>().is_err());
    }
}
