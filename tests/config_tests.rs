//! Integration tests for the configuration stack: defaults, TOML files,
//! `LINEDUPE_` environment variables, and command-line overrides.

use clap::Parser;
use linedupe::cli::Cli;
use linedupe::config::Config;
use linedupe::dedup::{HashAlgorithm, TimestampMode};
use linedupe::error::DedupError;
use linedupe::report::ReportFormat;
use linedupe::run_app;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all LINEDUPE_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("LINEDUPE_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_from_toml_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
group_size = 4
hash = "blake3"
timestamp_mode = "drop"
report_format = "json"
input_dir = "exports"
progress = false
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.group_size, 4);
    assert_eq!(config.hash, HashAlgorithm::Blake3);
    assert_eq!(config.timestamp_mode, TimestampMode::Drop);
    assert_eq!(config.report_format, ReportFormat::Json);
    assert_eq!(config.input_dir, PathBuf::from("exports"));
    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert!(!config.progress);
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "group_size = 4\nreport_format = \"json\"\n").unwrap();

    std::env::set_var("LINEDUPE_GROUP_SIZE", "6");
    let config = Config::load(Some(&path));
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.group_size, 6);
    assert_eq!(config.report_format, ReportFormat::Json);
}

#[test]
fn test_cli_overrides_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    std::env::set_var("LINEDUPE_GROUP_SIZE", "6");
    std::env::set_var("LINEDUPE_HASH", "blake3");
    let config = Config::figment(None).extract::<Config>();
    clear_env();

    let mut config = config.unwrap();
    config.apply_cli(&Cli::parse_from(["linedupe", "-k", "2"]));

    assert_eq!(config.group_size, 2);
    assert_eq!(config.hash, HashAlgorithm::Blake3);
}

#[test]
fn test_missing_explicit_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let result = Config::load(Some(std::path::Path::new("/non/existent/linedupe.toml")));
    assert!(matches!(result, Err(DedupError::ConfigNotFound(_))));
}

#[test]
fn test_invalid_value_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "hash = \"md5\"\n").unwrap();

    assert!(matches!(
        Config::load(Some(&path)),
        Err(DedupError::Config(_))
    ));
}

#[test]
fn test_load_from_path_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let config = Config::load_from_path(std::path::Path::new("/non/existent/linedupe.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_unknown_keys_do_not_fail_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "group_sise = 9\ngroup_size = 2\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.group_size, 2);
}

#[test]
fn test_run_uses_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("log.txt"), "a\nb\na\nb\n").unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "group_size = 2\ndefault_file = \"log.txt\"\ninput_dir = {:?}\noutput_dir = {:?}\n",
            input_dir.to_string_lossy(),
            output_dir.to_string_lossy()
        ),
    )
    .unwrap();

    let cli = Cli::parse_from([
        "linedupe".to_string(),
        "-q".to_string(),
        "--config".to_string(),
        config_path.to_string_lossy().to_string(),
    ]);
    run_app(cli).unwrap();

    assert_eq!(
        fs::read_to_string(output_dir.join("log_deduplicated.txt")).unwrap(),
        "a\nb\n"
    );
}
