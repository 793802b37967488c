use clap::Parser;
use linedupe::cli::Cli;
use linedupe::error::ExitCode;
use linedupe::run_app;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn run(root: &Path, extra: &[&str]) -> anyhow::Result<ExitCode> {
    let input_dir = root.join("input");
    let output_dir = root.join("output");
    let mut args = vec![
        "linedupe".to_string(),
        "-q".to_string(),
        "--input-dir".to_string(),
        input_dir.to_string_lossy().to_string(),
        "--output-dir".to_string(),
        output_dir.to_string_lossy().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    run_app(Cli::parse_from(args))
}

fn write_input(root: &Path, name: &str, content: &str) -> PathBuf {
    let input_dir = root.join("input");
    fs::create_dir_all(&input_dir).unwrap();
    let path = input_dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn output(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join("output").join(name)).unwrap()
}

#[test]
fn test_default_file_is_processed() {
    let dir = tempdir().unwrap();
    write_input(
        dir.path(),
        "_chat.txt",
        "Hello\nworld\n\nHello\nworld\n\nBye\n",
    );

    let code = run(dir.path(), &[]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(
        output(dir.path(), "_chat_deduplicated.txt"),
        "Hello\nworld\n\nBye\n"
    );
    let report = output(dir.path(), "_chat_duplicates_report.txt");
    assert!(report.starts_with("=== DUPLICATE 3-LINE GROUPS REPORT ==="));
    assert!(report.contains("Total duplicate groups removed: 1"));
}

#[test]
fn test_named_file_and_group_size() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "my_chat.txt", "a\nb\na\nb\nc\n");

    let code = run(dir.path(), &["my_chat.txt", "-k", "2"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(output(dir.path(), "my_chat_deduplicated.txt"), "a\nb\nc\n");
    assert!(dir
        .path()
        .join("output")
        .join("my_chat_duplicates_report.txt")
        .is_file());
}

#[test]
fn test_no_duplicates_exit_code_and_identical_output() {
    let dir = tempdir().unwrap();
    let content = "one\ntwo\nthree\nfour\nfive\nsix\n";
    write_input(dir.path(), "_chat.txt", content);

    let code = run(dir.path(), &[]).unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(output(dir.path(), "_chat_deduplicated.txt"), content);
    let report = output(dir.path(), "_chat_duplicates_report.txt");
    assert!(report.contains("Total unique groups that had duplicates: 0"));
    assert!(!report.contains("--- DUPLICATE GROUP #"));
}

#[test]
fn test_crlf_is_preserved() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "win.txt", "a\r\nb\r\na\r\nb\r\n");

    run(dir.path(), &["win.txt", "-k", "2"]).unwrap();

    assert_eq!(output(dir.path(), "win_deduplicated.txt"), "a\r\nb\r\n");
}

#[test]
fn test_timestamps_ignored_in_strip_mode() {
    let dir = tempdir().unwrap();
    write_input(
        dir.path(),
        "_chat.txt",
        "[1/2/2024, 10:00:00] Ann: hi\n[1/2/2024, 10:05:00] Ann: hi\n",
    );

    let code = run(dir.path(), &["-k", "1"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(
        output(dir.path(), "_chat_deduplicated.txt"),
        "[1/2/2024, 10:00:00] Ann: hi\n"
    );
}

#[test]
fn test_drop_mode_keeps_timestamped_groups() {
    let dir = tempdir().unwrap();
    let content = "[1/2/2024, 10:00:00] Ann: hi\n[1/2/2024, 10:05:00] Ann: bye\n";
    write_input(dir.path(), "_chat.txt", content);

    let code = run(dir.path(), &["-k", "1", "--timestamp-mode", "drop"]).unwrap();

    // every group normalizes to nothing, so nothing is compared
    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(output(dir.path(), "_chat_deduplicated.txt"), content);
}

#[test]
fn test_output_dir_is_created() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "_chat.txt", "x\n");
    assert!(!dir.path().join("output").exists());

    run(dir.path(), &[]).unwrap();

    assert!(dir.path().join("output").is_dir());
}

#[test]
fn test_missing_input_creates_folders_and_fails() {
    let dir = tempdir().unwrap();

    let err = run(dir.path(), &["absent.txt"]).unwrap_err();

    assert!(err.to_string().contains("absent.txt"));
    assert!(dir.path().join("input").is_dir());
    assert!(dir.path().join("output").is_dir());
    assert!(!dir
        .path()
        .join("output")
        .join("absent_deduplicated.txt")
        .exists());
}

#[test]
fn test_blake3_gives_same_output() {
    let dir = tempdir().unwrap();
    write_input(dir.path(), "_chat.txt", "p\nq\nr\np\nq\nr\n");

    run(dir.path(), &["--hash", "blake3"]).unwrap();

    assert_eq!(output(dir.path(), "_chat_deduplicated.txt"), "p\nq\nr\n");
}

#[test]
fn test_rerun_on_output_is_stable() {
    let dir = tempdir().unwrap();
    write_input(
        dir.path(),
        "_chat.txt",
        "a\nb\nc\na\nb\nc\nd\ne\nf\nd\ne\nf\n",
    );
    run(dir.path(), &[]).unwrap();
    let first = output(dir.path(), "_chat_deduplicated.txt");

    write_input(dir.path(), "again.txt", &first);
    let code = run(dir.path(), &["again.txt"]).unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert_eq!(output(dir.path(), "again_deduplicated.txt"), first);
}
