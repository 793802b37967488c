//! JSON duplicates report.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "group_size": 3,
//!     "hash_algorithm": "sha256",
//!     "total_lines": 7,
//!     "kept_lines": 4,
//!     "removed_lines": 3,
//!     "duplicate_groups_removed": 1,
//!     "fingerprints_with_duplicates": 1,
//!     "generated_at": "2024-01-01T10:00:00+00:00"
//!   },
//!   "groups": [
//!     {
//!       "fingerprint": "2cf24d...",
//!       "occurrences": 2,
//!       "original": { "group_index": 0, "first_line": 1, "lines": ["Hello", "world", ""] },
//!       "duplicates": [
//!         { "group_index": 1, "first_line": 4, "lines": ["Hello", "world", ""] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `first_line` is 1-based. Lines are written without trailing whitespace.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::dedup::{DedupOutcome, Group, HashAlgorithm};

use super::rank;

/// One occurrence of a group.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOccurrence {
    /// Position of the group in the input (0-based)
    pub group_index: usize,
    /// Line number of the first line (1-based)
    pub first_line: usize,
    /// Lines without trailing whitespace
    pub lines: Vec<String>,
}

impl JsonOccurrence {
    /// Create an occurrence from a group.
    #[must_use]
    pub fn from_group(group: &Group) -> Self {
        Self {
            group_index: group.index,
            first_line: group.line_number(),
            lines: group.display_lines().map(str::to_string).collect(),
        }
    }
}

/// A fingerprint with all of its occurrences.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Fingerprint as hexadecimal string (64 characters)
    pub fingerprint: String,
    /// Total appearances, original included
    pub occurrences: usize,
    /// The kept occurrence
    pub original: JsonOccurrence,
    /// The removed occurrences
    pub duplicates: Vec<JsonOccurrence>,
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Lines per group
    pub group_size: usize,
    /// Fingerprint digest
    pub hash_algorithm: HashAlgorithm,
    /// Lines in the input
    pub total_lines: usize,
    /// Groups in the input
    pub total_groups: usize,
    /// Lines kept in the output
    pub kept_lines: usize,
    /// Lines removed from the output
    pub removed_lines: usize,
    /// Groups kept because they had nothing to compare
    pub passthrough_groups: usize,
    /// Distinct fingerprints
    pub unique_fingerprints: usize,
    /// Fingerprints that appeared more than once
    pub fingerprints_with_duplicates: usize,
    /// Groups removed as duplicates
    pub duplicate_groups_removed: usize,
    /// Report creation time (RFC 3339)
    pub generated_at: String,
}

/// Complete JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Summary statistics
    pub summary: JsonSummary,
    /// Duplicated fingerprints, most repeated first
    pub groups: Vec<JsonDuplicateGroup>,
}

impl JsonReport {
    /// Build the JSON report for a finished pass.
    #[must_use]
    pub fn from_outcome(outcome: &DedupOutcome) -> Self {
        let stats = &outcome.stats;
        let summary = JsonSummary {
            group_size: stats.group_size,
            hash_algorithm: stats.hash_algorithm,
            total_lines: stats.total_lines,
            total_groups: stats.total_groups,
            kept_lines: stats.kept_lines,
            removed_lines: stats.removed_lines(),
            passthrough_groups: stats.passthrough_groups,
            unique_fingerprints: stats.unique_fingerprints,
            fingerprints_with_duplicates: stats.fingerprints_with_duplicates,
            duplicate_groups_removed: stats.duplicate_groups_removed,
            generated_at: Utc::now().to_rfc3339(),
        };

        let groups = rank(&outcome.seen, &outcome.duplicates)
            .into_iter()
            .map(|ranked| JsonDuplicateGroup {
                fingerprint: ranked.fingerprint.to_hex(),
                occurrences: ranked.occurrences(),
                original: JsonOccurrence::from_group(ranked.original),
                duplicates: ranked
                    .duplicates
                    .iter()
                    .map(JsonOccurrence::from_group)
                    .collect(),
            })
            .collect();

        Self { summary, groups }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}
