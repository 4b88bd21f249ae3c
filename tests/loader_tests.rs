// Program files on disk

use std::io::Write;

use bfvm::interpreter::config::{Config, EofBehavior};
use bfvm::interpreter::errors::{IoOperation, RuntimeError};
use bfvm::interpreter::loader::{load_program, run_file, run_file_with_config};
use tempfile::NamedTempFile;

fn program_file(source: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(source).expect("Failed to write program");
    file.flush().expect("Failed to flush program");
    file
}

#[test]
fn test_load_program_reads_whole_file() {
    let file = program_file(b"+[-]\n.");
    let program = load_program(file.path()).expect("Load failed");
    assert_eq!(program.as_bytes(), b"+[-]\n.");
    assert_eq!(program.command_count(), 5);
}

#[test]
fn test_load_empty_file() {
    let file = program_file(b"");
    let program = load_program(file.path()).expect("Load failed");
    assert!(program.is_empty());
}

#[test]
fn test_missing_file_fails_at_stat() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing.b");

    let err = load_program(&path).unwrap_err();
    match &err {
        RuntimeError::Io {
            operation, target, ..
        } => {
            assert_eq!(*operation, IoOperation::Stat);
            assert!(target.ends_with("missing.b"));
        }
        other => panic!("expected an I/O error, got {:?}", other),
    }
    assert_eq!(err.offset(), None);
    assert!(err.to_string().starts_with("failed to stat"));
}

#[test]
fn test_oversized_file_fails_to_allocate() {
    // Sparse, so it takes no disk space
    let file = NamedTempFile::new().expect("Failed to create temp file");
    file.as_file()
        .set_len(1 << 40)
        .expect("Failed to extend temp file");

    let err = load_program(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Io {
            operation: IoOperation::Allocate,
            ..
        }
    ));
    assert!(err.to_string().starts_with("failed to allocate memory"));
}

#[test]
fn test_directory_is_not_a_program() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = load_program(dir.path()).unwrap_err();
    assert!(matches!(err, RuntimeError::Io { .. }));
}

#[test]
fn test_run_file_writes_output() {
    let file = program_file(b"++++++++[>++++++++<-]>+.+.");
    let mut input: &[u8] = b"";
    let mut output = Vec::new();

    run_file(file.path(), &mut input, &mut output).expect("Run failed");
    assert_eq!(output, b"AB");
}

#[test]
fn test_run_file_reports_runtime_errors() {
    let file = program_file(b"+.]");
    let mut input: &[u8] = b"";
    let mut output = Vec::new();

    let result = run_file(file.path(), &mut input, &mut output);
    assert_eq!(result, Err(RuntimeError::LoopFrameUnderflow { offset: 2 }));
    // Output before the failure was already written
    assert_eq!(output, vec![1]);
}

#[test]
fn test_run_file_with_config() {
    let file = program_file(b",.");
    let config = Config::default().with_eof(EofBehavior::Zero);
    let mut input: &[u8] = b"";
    let mut output = Vec::new();

    run_file_with_config(file.path(), config, &mut input, &mut output).expect("Run failed");
    assert_eq!(output, vec![0]);
}
