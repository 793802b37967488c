//! Application entry point shared by the binary and integration tests.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use yansi::Paint;

use crate::cli::Cli;
use crate::config::Config;
use crate::dedup::{DedupOutcome, GroupDeduplicator};
use crate::error::{DedupError, ExitCode};
use crate::io::{self, RunPaths};
use crate::logging::init_logging;
use crate::progress::Progress;
use crate::report;

/// Run one deduplication from parsed CLI arguments.
///
/// Reads the input file, writes the deduplicated copy and the report into
/// the output folder, and prints a summary unless `--quiet` is set.
///
/// # Returns
///
/// `ExitCode::Success` when duplicate groups were removed,
/// `ExitCode::NoDuplicates` when the output equals the input.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the input is missing or
/// not UTF-8, or an output file cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let deduplicator = GroupDeduplicator::new(config.to_dedup_config())?
        .with_progress_callback(Arc::new(Progress::new(!config.progress)));

    let filename = cli
        .filename
        .clone()
        .unwrap_or_else(|| config.default_file.clone());
    let paths = RunPaths::resolve(
        &filename,
        &config.input_dir,
        &config.output_dir,
        config.report_format,
    );

    io::ensure_dir(&config.input_dir)?;
    io::ensure_dir(&config.output_dir)?;

    if !paths.input.is_file() {
        if !cli.quiet {
            print_usage_hints(&config.input_dir);
        }
        return Err(DedupError::NotFound {
            name: filename,
            dir: config.input_dir.clone(),
        }
        .into());
    }

    log::info!("Processing file: {}", paths.input.display());
    log::debug!("Output file: {}", paths.deduplicated.display());
    log::debug!("Report file: {}", paths.report.display());

    let lines = io::read_lines(&paths.input)?;
    let outcome = deduplicator.dedup(&lines);

    io::write_lines(&paths.deduplicated, &outcome.kept)?;
    let rendered = report::render(config.report_format, &outcome)?;
    io::write_report(&paths.report, &rendered)?;

    if !cli.quiet {
        print_summary(&paths, &outcome);
    }

    Ok(if outcome.stats.has_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    })
}

fn print_usage_hints(input_dir: &Path) {
    eprintln!("Usage: linedupe [FILENAME]");
    eprintln!("Example: linedupe my_chat.txt");
    eprintln!(
        "Make sure your file is in the '{}' folder!",
        input_dir.display()
    );
}

fn print_summary(paths: &RunPaths, outcome: &DedupOutcome) {
    let stats = &outcome.stats;
    let input_size = std::fs::metadata(&paths.input)
        .map(|m| ByteSize::b(m.len()).to_string())
        .unwrap_or_else(|_| "unknown size".to_string());

    println!("{}", "Done!".green().bold());
    println!(
        "   Original lines: {} ({})",
        stats.total_lines, input_size
    );
    println!("   Lines kept: {}", stats.kept_lines);
    println!("   Lines removed: {}", stats.removed_lines());
    println!(
        "   Duplicate {}-line groups removed: {}",
        stats.group_size,
        if stats.has_duplicates() {
            stats.duplicate_groups_removed.yellow().bold().to_string()
        } else {
            stats.duplicate_groups_removed.to_string()
        }
    );
    println!(
        "   Deduplicated file saved to: {}",
        paths.deduplicated.display().cyan()
    );
    println!(
        "   Duplicates report saved to: {}",
        paths.report.display().cyan()
    );
}
