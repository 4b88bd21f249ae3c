// Execution engine for the tape machine

use crate::interpreter::config::{BracketMatching, Config};
use crate::interpreter::constants::SNAPSHOT_MEMORY_LIMIT;
use crate::interpreter::errors::{IoOperation, RuntimeError};
use crate::memory::{frames::LoopFrameStack, tape::Tape};
use crate::program::{jump_table::JumpTable, Instruction, Program, SourceLocation};
use crate::snapshot::{MockTerminal, Snapshot, SnapshotManager};
use std::io::{self, Read, Write};

/// The main interpreter that executes one program
pub struct Interpreter {
    /// Instructions being executed
    pub(crate) program: Program,

    /// Machine parameters fixed at construction
    config: Config,

    /// Data memory and cursor
    pub(crate) tape: Tape,

    /// Open loops
    pub(crate) frames: LoopFrameStack,

    /// Present only for `BracketMatching::Precomputed`
    pub(crate) jump_table: Option<JumpTable>,

    /// Offset of the next instruction
    pub(crate) ip: usize,

    /// Instructions executed so far, no-ops included
    steps: u64,

    /// Whether execution reached the end of the program
    finished: bool,

    /// Mock terminal for `.` output of recorded runs
    terminal: MockTerminal,

    /// Output bytes visible at the current history position
    output_len: usize,

    /// Snapshot manager for reverse execution
    snapshot_manager: SnapshotManager,

    /// Current position in execution history (for stepping backward/forward)
    history_position: usize,
}

impl Interpreter {
    /// Create a new interpreter with a fresh tape and frame stack
    pub fn new(program: Program, config: Config) -> Self {
        let jump_table = match config.bracket_matching {
            BracketMatching::Scan => None,
            BracketMatching::Precomputed => Some(JumpTable::build(&program)),
        };

        Interpreter {
            program,
            config,
            tape: Tape::new(config.tape_size),
            frames: LoopFrameStack::new(config.max_loop_frames),
            jump_table,
            ip: 0,
            steps: 0,
            finished: false,
            terminal: MockTerminal::new(),
            output_len: 0,
            snapshot_manager: SnapshotManager::new(SNAPSHOT_MEMORY_LIMIT),
            history_position: 0,
        }
    }

    /// Replace the snapshot memory budget used by [`run_recorded`](Self::run_recorded)
    pub fn with_snapshot_limit(mut self, limit: usize) -> Self {
        self.snapshot_manager = SnapshotManager::new(limit);
        self
    }

    /// Run the program from the current position to the end.
    ///
    /// `,` reads from `input` and `.` writes to `output`, one byte at a time.
    /// The first failing instruction stops the run.
    pub fn run<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), RuntimeError> {
        while self.step(input, output)?.is_some() {}
        Ok(())
    }

    /// Execute a single instruction.
    ///
    /// Returns the instruction that ran, or `None` once the instruction
    /// pointer has reached the end of the program. On error the instruction
    /// pointer stays on the failing instruction.
    pub fn step<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Instruction>, RuntimeError> {
        let Some(instruction) = self.program.instruction_at(self.ip) else {
            self.finished = true;
            return Ok(None);
        };
        let offset = self.ip;

        match instruction {
            Instruction::MoveRight => {
                let (cursor, capacity) = (self.tape.cursor(), self.tape.capacity());
                self.tape
                    .move_right()
                    .map_err(|_| RuntimeError::StackOverflow {
                        offset,
                        cursor,
                        capacity,
                    })?;
                self.ip += 1;
            }
            Instruction::MoveLeft => {
                self.tape
                    .move_left()
                    .map_err(|_| RuntimeError::StackUnderflow { offset })?;
                self.ip += 1;
            }
            Instruction::Increment => {
                self.tape.increment();
                self.ip += 1;
            }
            Instruction::Decrement => {
                self.tape.decrement();
                self.ip += 1;
            }
            Instruction::Output => {
                let byte = self.tape.current();
                output
                    .write_all(&[byte])
                    .and_then(|()| output.flush())
                    .map_err(|e| RuntimeError::io(IoOperation::Output, "output stream", &e))?;
                self.ip += 1;
            }
            Instruction::Input => {
                let byte = read_byte(input)
                    .map_err(|e| RuntimeError::io(IoOperation::Input, "input stream", &e))?;
                if let Some(value) = byte.or_else(|| self.config.eof.value()) {
                    self.tape.set_current(value);
                }
                self.ip += 1;
            }
            Instruction::LoopStart => self.enter_or_skip(offset)?,
            Instruction::LoopEnd => self.repeat_or_exit(offset)?,
            Instruction::NoOp => self.ip += 1,
        }

        self.steps += 1;
        Ok(Some(instruction))
    }

    /// Run to the end while recording a snapshot after every command.
    ///
    /// Output goes to the internal [`MockTerminal`]. The history stays
    /// available after an error, so a failed run can still be stepped
    /// through up to the failing instruction.
    pub fn run_recorded<R: Read>(&mut self, input: &mut R) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            self.take_snapshot()?;
        }

        let mut terminal = std::mem::take(&mut self.terminal);
        let result = self.record_until_done(input, &mut terminal);
        self.terminal = terminal;
        self.output_len = self.terminal.len();

        if result.is_ok() && self.last_snapshot_ip() != Some(self.ip) {
            self.take_snapshot()?;
        }
        result
    }

    fn record_until_done<R: Read>(
        &mut self,
        input: &mut R,
        terminal: &mut MockTerminal,
    ) -> Result<(), RuntimeError> {
        while let Some(instruction) = self.step(input, terminal)? {
            if instruction.is_command() {
                self.output_len = terminal.len();
                self.take_snapshot()?;
            }
        }
        Ok(())
    }

    fn last_snapshot_ip(&self) -> Option<usize> {
        self.snapshot_manager
            .len()
            .checked_sub(1)
            .and_then(|last| self.snapshot_manager.get(last))
            .map(|snapshot| snapshot.ip)
    }

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let snapshot = Snapshot {
            ip: self.ip,
            cursor: self.tape.cursor(),
            frames: self.frames.frames().to_vec(),
            tape: self.tape.touched().to_vec(),
            output_len: self.output_len,
            steps: self.steps,
        };

        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage(),
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self.snapshot_manager.get(index).ok_or_else(|| {
            RuntimeError::HistoryOperationFailed {
                message: format!("Snapshot {} not found in history", index),
            }
        })?;

        self.ip = snapshot.ip;
        self.tape.restore(&snapshot.tape, snapshot.cursor);
        self.frames.restore(&snapshot.frames);
        self.output_len = snapshot.output_len;
        self.steps = snapshot.steps;
        self.finished = self.ip >= self.program.len();
        self.history_position = index;
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }

        self.restore_snapshot(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }

        self.restore_snapshot(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }

        self.restore_snapshot(0)
    }

    /// Jump to the last recorded snapshot
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        let last = self.snapshot_manager.len().checked_sub(1).ok_or_else(|| {
            RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }
        })?;

        self.restore_snapshot(last)
    }

    // ========== Getter methods for UI ==========

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Get a mutable reference to the tape, for presetting cells before a run
    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn frames(&self) -> &LoopFrameStack {
        &self.frames
    }

    /// Offset of the next instruction to execute
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Line and column of the next instruction
    pub fn current_location(&self) -> SourceLocation {
        self.program.location(self.ip)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get a reference to the recorded terminal output
    pub fn terminal(&self) -> &MockTerminal {
        &self.terminal
    }

    /// Output bytes produced up to the current history position
    pub fn visible_bytes(&self) -> &[u8] {
        let bytes = self.terminal.bytes();
        &bytes[..self.output_len.min(bytes.len())]
    }

    /// Output lines produced up to the current history position
    pub fn visible_output(&self) -> Vec<String> {
        self.terminal.get_output(self.output_len)
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }
}

/// Read one byte, `None` at end of input
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, input: &[u8]) -> (Interpreter, Vec<u8>, Result<(), RuntimeError>) {
        let mut interpreter = Interpreter::new(Program::from(source), Config::default());
        let mut input = input;
        let mut output = Vec::new();
        let result = interpreter.run(&mut input, &mut output);
        (interpreter, output, result)
    }

    #[test]
    fn test_step_reports_instruction() {
        let mut interpreter = Interpreter::new(Program::from("+x"), Config::default());
        let mut input: &[u8] = &[];
        let mut output = Vec::new();

        assert_eq!(
            interpreter.step(&mut input, &mut output),
            Ok(Some(Instruction::Increment))
        );
        assert_eq!(
            interpreter.step(&mut input, &mut output),
            Ok(Some(Instruction::NoOp))
        );
        assert_eq!(interpreter.step(&mut input, &mut output), Ok(None));
        assert!(interpreter.is_finished());
        assert_eq!(interpreter.steps(), 2);
    }

    #[test]
    fn test_error_leaves_ip_on_failing_instruction() {
        let (interpreter, _, result) = run("+<", &[]);
        assert_eq!(result, Err(RuntimeError::StackUnderflow { offset: 1 }));
        assert_eq!(interpreter.ip(), 1);
        assert!(!interpreter.is_finished());
    }

    #[test]
    fn test_empty_program_finishes_immediately() {
        let (interpreter, output, result) = run("", &[]);
        assert!(result.is_ok());
        assert!(output.is_empty());
        assert!(interpreter.is_finished());
    }

    #[test]
    fn test_read_byte_retries_interrupted() {
        struct Flaky {
            interrupted: bool,
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                buf[0] = b'k';
                Ok(1)
            }
        }

        let mut flaky = Flaky { interrupted: false };
        assert_eq!(read_byte(&mut flaky).unwrap(), Some(b'k'));
    }

    #[test]
    fn test_output_error_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut interpreter = Interpreter::new(Program::from("+.+"), Config::default());
        let mut input: &[u8] = &[];
        let result = interpreter.run(&mut input, &mut Broken);
        assert!(matches!(
            result,
            Err(RuntimeError::Io {
                operation: IoOperation::Output,
                ..
            })
        ));
        assert_eq!(interpreter.tape().current(), 1);
    }
}
