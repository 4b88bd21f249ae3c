// bfvm: tape machine runner and step debugger

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use bfvm::interpreter::config::{BracketMatching, Config, EofBehavior};
use bfvm::interpreter::constants::{MAX_LOOP_FRAMES, TAPE_SIZE};
use bfvm::interpreter::engine::Interpreter;
use bfvm::interpreter::errors::RuntimeError;
use bfvm::interpreter::loader::load_program;
use bfvm::program::Program;
use bfvm::ui::App;

#[derive(Parser)]
#[command(name = "bfvm")]
#[command(version)]
#[command(about = "Bounds-checked tape machine with a step debugger", long_about = None)]
struct Cli {
    /// Program file to run
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Record the run and open the step debugger
    #[arg(short, long)]
    debug: bool,

    /// Input for `,` in debug mode (default: empty)
    #[arg(long, value_name = "FILE", requires = "debug")]
    input: Option<PathBuf>,

    /// What `,` stores at end of input: max (255), zero or unchanged
    #[arg(long, value_name = "MODE", default_value = "max")]
    eof: EofBehavior,

    /// Number of tape cells
    #[arg(long, value_name = "N", default_value_t = TAPE_SIZE, value_parser = parse_at_least_one)]
    tape_size: usize,

    /// Maximum loop nesting depth
    #[arg(long, value_name = "N", default_value_t = MAX_LOOP_FRAMES, value_parser = parse_at_least_one)]
    max_loop_frames: usize,

    /// Match brackets once before running instead of scanning on each skip
    #[arg(long)]
    precompute: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let bracket_matching = if self.precompute {
            BracketMatching::Precomputed
        } else {
            BracketMatching::Scan
        };
        Config::default()
            .with_tape_size(self.tape_size)
            .with_max_loop_frames(self.max_loop_frames)
            .with_eof(self.eof)
            .with_bracket_matching(bracket_matching)
    }
}

fn parse_at_least_one(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Format an error the way every diagnostic is printed
fn describe(error: &RuntimeError, program: Option<&Program>) -> String {
    match (error.offset(), program) {
        (Some(offset), Some(program)) => {
            let loc = program.location(offset);
            format!("error: {} (line {}, column {})", error, loc.line, loc.column)
        }
        _ => format!("error: {}", error),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors fail with 1
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if cli.debug {
        return run_debugger(&cli);
    }

    let program = match load_program(&cli.file) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", describe(&e, None));
            std::process::exit(1);
        }
    };

    let mut interpreter = Interpreter::new(program, cli.config());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = interpreter.run(&mut stdin.lock(), &mut stdout.lock());

    if let Err(e) = result {
        eprintln!("{}", describe(&e, Some(interpreter.program())));
        std::process::exit(1);
    }

    Ok(())
}

fn run_debugger(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Loading {}...", cli.file.display());
    let program = match load_program(&cli.file) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", describe(&e, None));
            std::process::exit(1);
        }
    };

    let input = match &cli.input {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!(
                    "error: could not read input file `{}` ({})",
                    path.display(),
                    e
                );
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    eprintln!(
        "Loaded {} bytes ({} commands).",
        program.len(),
        program.command_count()
    );

    let mut interpreter = Interpreter::new(program, cli.config());

    // Run execution to build history
    eprintln!("Executing program...");
    let run_error = match interpreter.run_recorded(&mut input.as_slice()) {
        Ok(()) => {
            eprintln!("Execution completed successfully.");
            None
        }
        Err(e) => {
            eprintln!("{}", describe(&e, Some(interpreter.program())));
            eprintln!("Entering TUI with partial execution history...");
            Some(e)
        }
    };
    eprintln!("Total snapshots: {}", interpreter.total_snapshots());

    if let Err(e) = interpreter.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, run_error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
