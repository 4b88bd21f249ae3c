// Snapshot management for reverse execution

use std::io;

/// Mock terminal capturing `.` output during a recorded run
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    bytes: Vec<u8>,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal { bytes: Vec::new() }
    }

    /// Everything written so far
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Output up to `len` bytes split into display lines.
    ///
    /// Non-printable bytes other than newline are shown as `\xNN`.
    pub fn get_output(&self, len: usize) -> Vec<String> {
        let end = len.min(self.bytes.len());
        if end == 0 {
            return Vec::new();
        }
        let mut lines = vec![String::new()];
        for &b in &self.bytes[..end] {
            match b {
                b'\n' => lines.push(String::new()),
                b' '..=b'~' | b'\t' => {
                    if let Some(line) = lines.last_mut() {
                        line.push(b as char);
                    }
                }
                _ => {
                    if let Some(line) = lines.last_mut() {
                        line.push_str(&format!("\\x{:02x}", b));
                    }
                }
            }
        }
        // Text ending in a newline has no trailing empty line
        if lines.len() > 1 && lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

impl io::Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Snapshot of execution state between two instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Offset of the next instruction to run
    pub ip: usize,
    pub cursor: usize,
    /// Open loop frames, outermost first
    pub frames: Vec<usize>,
    /// Tape cells up to the high-water mark
    pub tape: Vec<u8>,
    /// Bytes of output produced so far
    pub output_len: usize,
    /// Instructions executed so far
    pub steps: u64,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Snapshot>()
            + self.tape.len()
            + self.frames.len() * std::mem::size_of::<usize>()
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
