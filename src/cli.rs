//! Command-line interface definitions for LineDupe.
//!
//! All settings flags are optional so that unset flags leave the value from
//! the config file or environment in place.
//!
//! # Example
//!
//! ```bash
//! # Deduplicate input/_chat.txt into output/
//! linedupe
//!
//! # Deduplicate input/my_chat.txt with groups of 4 lines
//! linedupe my_chat.txt -k 4
//!
//! # JSON report, verbose logging
//! linedupe -v my_chat.txt --report-format json
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::dedup::{HashAlgorithm, TimestampMode};
use crate::report::ReportFormat;

/// Remove repeated groups of consecutive lines from chat exports and logs.
///
/// The input is split into groups of K lines. A group whose text (ignoring
/// timestamps, decorative emoji, and spacing) already appeared earlier is
/// removed, and every removal is listed in a duplicates report.
#[derive(Debug, Parser)]
#[command(name = "linedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file name, looked up in the input folder (default: _chat.txt)
    #[arg(value_name = "FILENAME")]
    pub filename: Option<String>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Folder containing the input file (default: input)
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Folder for the deduplicated file and report (default: output)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of consecutive lines compared as one group (default: 3)
    #[arg(short = 'k', long, value_name = "N", value_parser = parse_group_size)]
    pub group_size: Option<usize>,

    /// Digest used to fingerprint groups
    #[arg(long, value_enum)]
    pub hash: Option<HashAlgorithm>,

    /// Strip leading timestamps before comparing, or drop timestamped lines entirely
    #[arg(long, value_enum)]
    pub timestamp_mode: Option<TimestampMode>,

    /// Regex matching the leading timestamp of a line
    #[arg(long, value_name = "REGEX")]
    pub timestamp_pattern: Option<String>,

    /// Report format
    #[arg(short = 'f', long, value_enum)]
    pub report_format: Option<ReportFormat>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Parse a group size, rejecting zero.
///
/// # Examples
///
/// ```
/// use linedupe::cli::parse_group_size;
///
/// assert_eq!(parse_group_size("3").unwrap(), 3);
/// assert!(parse_group_size("0").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a positive integer.
pub fn parse_group_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid group size: '{s}'"))?;
    if size == 0 {
        return Err("Group size must be at least 1".to_string());
    }
    Ok(size)
}
