// Constants for the tape machine

/// Default tape capacity in cells (32 KiB)
pub const TAPE_SIZE: usize = 32 * 1024;

/// Default maximum number of simultaneously open loops
pub const MAX_LOOP_FRAMES: usize = 1024;

/// Value stored by `,` at end of input under the default EOF behavior.
/// This is what a C `getchar()` EOF (-1) leaves behind in a byte cell.
pub const EOF_SENTINEL: u8 = 0xFF;

/// Default snapshot memory budget for the debugger (256 MB)
pub const SNAPSHOT_MEMORY_LIMIT: usize = 256 * 1024 * 1024;
