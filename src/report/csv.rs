//! CSV duplicates report.
//!
//! One row is generated for each occurrence of a duplicated group.
//!
//! # Columns
//!
//! - `group_id`: Rank of the fingerprint in the report (1-based)
//! - `fingerprint`: Group fingerprint (hexadecimal)
//! - `role`: `original` for the kept group, `duplicate` for removed copies
//! - `occurrence`: 0 for the original, then 1, 2, ... for each duplicate
//! - `first_line`: Line number of the group's first line (1-based)
//! - `content`: Group lines without trailing whitespace, joined by `\n`

use std::io;

use serde::Serialize;

use crate::dedup::{DedupOutcome, DuplicateLedger, Group, SeenTable};
use crate::error::DedupError;

use super::rank;

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    fingerprint: &'a str,
    role: &'static str,
    occurrence: usize,
    first_line: usize,
    content: String,
}

/// CSV report formatter.
pub struct CsvReport<'a> {
    seen: &'a SeenTable,
    duplicates: &'a DuplicateLedger,
}

impl<'a> CsvReport<'a> {
    /// Create a CSV report over the tables of a dedup pass.
    #[must_use]
    pub fn new(seen: &'a SeenTable, duplicates: &'a DuplicateLedger) -> Self {
        Self { seen, duplicates }
    }

    /// Create a CSV report for a finished pass.
    #[must_use]
    pub fn from_outcome(outcome: &'a DedupOutcome) -> Self {
        Self::new(&outcome.seen, &outcome.duplicates)
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::Csv` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), DedupError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (idx, ranked) in rank(self.seen, self.duplicates).iter().enumerate() {
            let group_id = idx + 1;
            let fingerprint = ranked.fingerprint.to_hex();

            csv_writer.serialize(row(group_id, &fingerprint, "original", 0, ranked.original))?;
            for (occurrence, duplicate) in ranked.duplicates.iter().enumerate() {
                csv_writer.serialize(row(
                    group_id,
                    &fingerprint,
                    "duplicate",
                    occurrence + 1,
                    duplicate,
                ))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| DedupError::Csv(csv::Error::from(e)))?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `DedupError::Csv` if serialization fails.
    pub fn to_string(&self) -> Result<String, DedupError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

fn row<'a>(
    group_id: usize,
    fingerprint: &'a str,
    role: &'static str,
    occurrence: usize,
    group: &Group,
) -> CsvRow<'a> {
    CsvRow {
        group_id,
        fingerprint,
        role,
        occurrence,
        first_line: group.line_number(),
        content: group.display_lines().collect::<Vec<_>>().join("\n"),
    }
}
