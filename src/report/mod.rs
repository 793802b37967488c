//! Report formatters for dedup results.
//!
//! This module provides different formats for the duplicates report:
//! - Plain text for reading (the default)
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! Every format lists fingerprints in the same order: most appearances
//! first, ties broken by the order in which the original group was first
//! seen.
//!
//! # Example
//!
//! ```
//! use linedupe::dedup::GroupDeduplicator;
//! use linedupe::report::{self, ReportFormat};
//!
//! let lines: Vec<String> = ["a", "b", "c", "a", "b", "c"].iter().map(|s| s.to_string()).collect();
//! let outcome = GroupDeduplicator::with_defaults().dedup(&lines);
//!
//! let text = report::render(ReportFormat::Text, &outcome).unwrap();
//! assert!(text.contains("Total duplicate groups removed: 1"));
//! ```

pub mod csv;
pub mod json;
pub mod text;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dedup::{DedupOutcome, DuplicateLedger, Fingerprint, Group, SeenTable};
use crate::error::DedupError;

// Re-export main types
pub use self::csv::CsvReport;
pub use self::json::JsonReport;
pub use self::text::TextReport;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for scripting
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl ReportFormat {
    /// File extension for reports in this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// A fingerprint with its kept group and removed copies.
#[derive(Debug, Clone, Copy)]
pub struct RankedGroup<'a> {
    /// Shared fingerprint
    pub fingerprint: &'a Fingerprint,
    /// The kept first occurrence
    pub original: &'a Group,
    /// Removed later occurrences, in input order
    pub duplicates: &'a [Group],
}

impl RankedGroup<'_> {
    /// Total appearances, original included.
    #[must_use]
    pub fn occurrences(&self) -> usize {
        self.duplicates.len() + 1
    }
}

/// Fingerprints that had duplicates, most repeated first.
///
/// Ties keep first-seen order (the sort is stable).
#[must_use]
pub fn rank<'a>(seen: &'a SeenTable, duplicates: &'a DuplicateLedger) -> Vec<RankedGroup<'a>> {
    let mut ranked: Vec<RankedGroup<'a>> = seen
        .iter()
        .filter_map(|(fingerprint, original)| {
            duplicates.get(fingerprint).map(|dups| RankedGroup {
                fingerprint,
                original,
                duplicates: dups,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.occurrences().cmp(&a.occurrences()));
    ranked
}

/// Render the report for `outcome` in `format`.
///
/// # Errors
///
/// Returns `DedupError::Json` or `DedupError::Csv` if serialization fails.
pub fn render(format: ReportFormat, outcome: &DedupOutcome) -> Result<String, DedupError> {
    match format {
        ReportFormat::Text => Ok(TextReport::from_outcome(outcome).to_string()),
        ReportFormat::Json => Ok(JsonReport::from_outcome(outcome).to_json_pretty()?),
        ReportFormat::Csv => CsvReport::from_outcome(outcome).to_string(),
    }
}
