// Integration tests for the tape machine

use bfvm::interpreter::config::{BracketMatching, Config, EofBehavior};
use bfvm::interpreter::engine::Interpreter;
use bfvm::interpreter::errors::RuntimeError;
use bfvm::interpreter::run_program;
use bfvm::program::{Instruction, Program};

/// Run `source` with `config`, returning the machine, its output and the result
fn run_with(
    source: &str,
    config: Config,
    input: &[u8],
) -> (Interpreter, Vec<u8>, Result<(), RuntimeError>) {
    let mut interpreter = Interpreter::new(Program::from(source), config);
    let mut input = input;
    let mut output = Vec::new();
    let result = interpreter.run(&mut input, &mut output);
    (interpreter, output, result)
}

fn run(source: &str, input: &[u8]) -> (Interpreter, Vec<u8>, Result<(), RuntimeError>) {
    run_with(source, Config::default(), input)
}

#[test]
fn test_hello_world() {
    let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    let (_, output, result) = run(source, b"");

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, b"Hello World!\n");
}

#[test]
fn test_increment_then_output() {
    let (_, output, result) = run("++.", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![2]);
}

#[test]
fn test_echo_single_byte() {
    let (_, output, result) = run(",.", b"A");
    assert_eq!(result, Ok(()));
    assert_eq!(output, b"A");
}

#[test]
fn test_cells_wrap_both_ways() {
    let (_, output, _) = run("-.+.", b"");
    assert_eq!(output, vec![255, 0]);

    let source = "+".repeat(256) + ".";
    let (_, output, _) = run(&source, b"");
    assert_eq!(output, vec![0]);
}

#[test]
fn test_add_loop_wraps_modulo_256() {
    let mut interpreter = Interpreter::new(Program::from("[->+<]"), Config::default());
    interpreter.tape_mut().set(0, 200).unwrap();
    interpreter.tape_mut().set(1, 100).unwrap();

    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    interpreter.run(&mut input, &mut output).unwrap();

    assert_eq!(interpreter.tape().get(0), Some(0));
    assert_eq!(interpreter.tape().get(1), Some(44));
    assert_eq!(interpreter.tape().cursor(), 0);
    assert!(interpreter.frames().is_empty());
}

#[test]
fn test_clear_loop_zeroes_every_value() {
    for value in 1..=255u8 {
        let mut interpreter = Interpreter::new(Program::from("[-]"), Config::default());
        interpreter.tape_mut().set(0, value).unwrap();

        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        interpreter.run(&mut input, &mut output).unwrap();

        assert_eq!(interpreter.tape().current(), 0, "start value {}", value);
        assert!(interpreter.frames().is_empty());
    }
}

#[test]
fn test_move_past_last_cell_overflows() {
    let config = Config::default().with_tape_size(4);

    let (interpreter, _, result) = run_with(">>>", config, b"");
    assert_eq!(result, Ok(()));
    assert_eq!(interpreter.tape().cursor(), 3);

    let (interpreter, _, result) = run_with(">>>>", config, b"");
    assert_eq!(
        result,
        Err(RuntimeError::StackOverflow {
            offset: 3,
            cursor: 3,
            capacity: 4,
        })
    );
    assert_eq!(interpreter.ip(), 3);
    assert_eq!(interpreter.tape().cursor(), 3);
}

#[test]
fn test_zero_tape_size_runs_on_one_cell() {
    let config = Config::default().with_tape_size(0);

    let (interpreter, output, result) = run_with("+++.", config, b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![3]);
    assert_eq!(interpreter.tape().capacity(), 1);

    let (_, _, result) = run_with(">", config, b"");
    assert_eq!(
        result,
        Err(RuntimeError::StackOverflow {
            offset: 0,
            cursor: 0,
            capacity: 1,
        })
    );
}

#[test]
fn test_overflow_on_default_tape() {
    let source = ">".repeat(32 * 1024);
    let (interpreter, _, result) = run(&source, b"");
    assert!(matches!(
        result,
        Err(RuntimeError::StackOverflow {
            offset: 32767,
            cursor: 32767,
            capacity: 32768,
        })
    ));
    assert_eq!(interpreter.tape().cursor(), 32767);
}

#[test]
fn test_move_before_first_cell_underflows() {
    let (interpreter, output, result) = run("+.<.", b"");
    assert_eq!(result, Err(RuntimeError::StackUnderflow { offset: 2 }));
    assert_eq!(output, vec![1]);
    assert_eq!(interpreter.ip(), 2);
    assert_eq!(interpreter.steps(), 2);
}

#[test]
fn test_lone_close_bracket_fails_first() {
    let (interpreter, output, result) = run("]", b"");
    assert_eq!(result, Err(RuntimeError::LoopFrameUnderflow { offset: 0 }));
    assert!(output.is_empty());
    assert_eq!(interpreter.steps(), 0);

    // The condition does not matter
    let (_, _, result) = run("+]", b"");
    assert_eq!(result, Err(RuntimeError::LoopFrameUnderflow { offset: 1 }));
}

#[test]
fn test_close_bracket_after_balanced_loop_fails() {
    let (_, _, result) = run("+[-]]", b"");
    assert_eq!(result, Err(RuntimeError::LoopFrameUnderflow { offset: 4 }));
}

#[test]
fn test_zero_condition_skips_loop_body() {
    let (interpreter, output, result) = run("[+.]", b"");
    assert_eq!(result, Ok(()));
    assert!(output.is_empty());
    assert_eq!(interpreter.tape().current(), 0);
    assert_eq!(interpreter.steps(), 1);
}

#[test]
fn test_zero_condition_skips_nested_loops() {
    let (interpreter, output, result) = run("[[-]+.]+.", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![1]);
    assert!(interpreter.frames().is_empty());
}

#[test]
fn test_nested_clear_loops() {
    let (interpreter, _, result) = run("+++[[-]]", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(interpreter.tape().current(), 0);
    assert!(interpreter.frames().is_empty());
    assert!(interpreter.is_finished());
}

#[test]
fn test_close_bracket_reads_current_cell() {
    // The loop exits on the cell the cursor ends up on, not the one it started on
    let (interpreter, _, result) = run("+[>]", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(interpreter.tape().cursor(), 1);
    assert_eq!(interpreter.tape().get(0), Some(1));
    assert!(interpreter.frames().is_empty());
}

#[test]
fn test_unmatched_open_bracket_runs_to_end() {
    // Skipped: nothing after it runs
    let (interpreter, output, result) = run("[+.", b"");
    assert_eq!(result, Ok(()));
    assert!(output.is_empty());
    assert!(interpreter.is_finished());

    // Entered: the frame stays open when the program ends
    let (interpreter, output, result) = run("+[.", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![1]);
    assert_eq!(interpreter.frames().frames(), &[1]);
}

#[test]
fn test_loop_frame_overflow() {
    let config = Config::default().with_max_loop_frames(2);

    let (interpreter, _, result) = run_with("+[[", config, b"");
    assert_eq!(result, Ok(()));
    assert_eq!(interpreter.frames().depth(), 2);

    let (interpreter, _, result) = run_with("+[[[", config, b"");
    assert_eq!(
        result,
        Err(RuntimeError::LoopFrameOverflow {
            offset: 3,
            capacity: 2,
        })
    );
    assert_eq!(interpreter.ip(), 3);
    assert_eq!(interpreter.frames().depth(), 2);
}

#[test]
fn test_default_loop_frame_limit() {
    let source = "+".to_string() + &"[".repeat(1025);
    let (interpreter, _, result) = run(&source, b"");
    assert_eq!(
        result,
        Err(RuntimeError::LoopFrameOverflow {
            offset: 1025,
            capacity: 1024,
        })
    );
    assert_eq!(interpreter.frames().depth(), 1024);
}

#[test]
fn test_eof_stores_255_by_default() {
    let (_, output, _) = run(",.,.,.", b"ab");
    assert_eq!(output, vec![b'a', b'b', 255]);
}

#[test]
fn test_eof_zero_and_unchanged() {
    let zero = Config::default().with_eof(EofBehavior::Zero);
    let (_, output, result) = run_with(",[.,]", zero, b"hi");
    assert_eq!(result, Ok(()));
    assert_eq!(output, b"hi");

    let unchanged = Config::default().with_eof(EofBehavior::Unchanged);
    let (_, output, _) = run_with("+++,.", unchanged, b"");
    assert_eq!(output, vec![3]);
}

#[test]
fn test_comments_are_ignored() {
    let (interpreter, output, result) = run("hello + world .\n", b"");
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![1]);
    // No-ops still count as executed
    assert_eq!(interpreter.steps(), 16);
}

#[test]
fn test_nul_ends_program() {
    let mut input: &[u8] = b"";
    let mut output = Vec::new();
    run_program(&b"+.\0+."[..], &mut input, &mut output).unwrap();
    assert_eq!(output, vec![1]);
}

#[test]
fn test_empty_program_halts_immediately() {
    let (interpreter, output, result) = run("", b"");
    assert_eq!(result, Ok(()));
    assert!(output.is_empty());
    assert!(interpreter.is_finished());
    assert_eq!(interpreter.steps(), 0);
}

#[test]
fn test_single_stepping() {
    let mut interpreter = Interpreter::new(Program::from("+[-]"), Config::default());
    let mut input: &[u8] = b"";
    let mut output = Vec::new();

    let mut executed = Vec::new();
    while let Some(instruction) = interpreter.step(&mut input, &mut output).unwrap() {
        executed.push(instruction);
    }

    assert_eq!(
        executed,
        vec![
            Instruction::Increment,
            Instruction::LoopStart,
            Instruction::Decrement,
            Instruction::LoopEnd,
        ]
    );
    assert!(interpreter.is_finished());
}

#[test]
fn test_precomputed_brackets_match_scanning() {
    let programs = [
        "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.",
        "[[-]+.]+.",
        "[+[+]+.",
        "+[>+<-]>[.[-]]<[",
        "+[-]]",
        ",[.,]",
        "]",
    ];
    let scan = Config::default().with_eof(EofBehavior::Zero);
    let precomputed = scan.with_bracket_matching(BracketMatching::Precomputed);

    for source in programs {
        let (a, out_a, res_a) = run_with(source, scan, b"xyz");
        let (b, out_b, res_b) = run_with(source, precomputed, b"xyz");

        assert_eq!(res_a, res_b, "result differs for {:?}", source);
        assert_eq!(out_a, out_b, "output differs for {:?}", source);
        assert_eq!(a.ip(), b.ip(), "ip differs for {:?}", source);
        assert_eq!(a.tape(), b.tape(), "tape differs for {:?}", source);
        assert_eq!(a.steps(), b.steps(), "steps differ for {:?}", source);
    }
}

#[test]
fn test_error_locations() {
    let (interpreter, _, result) = run("+\n+\n  <<", b"");
    let err = result.unwrap_err();
    assert_eq!(err, RuntimeError::StackUnderflow { offset: 6 });

    let loc = interpreter.program().location(err.offset().unwrap());
    assert_eq!((loc.line, loc.column), (3, 3));
    assert_eq!(interpreter.current_location(), loc);
}

#[test]
fn test_error_messages() {
    let err = RuntimeError::StackUnderflow { offset: 7 };
    assert_eq!(err.to_string(), "stack underflow detected at offset 7");

    let err = RuntimeError::LoopFrameUnderflow { offset: 0 };
    assert!(err.to_string().contains("unmatched `]`"));
}
