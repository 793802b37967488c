//! Plain-text duplicates report.
//!
//! ```text
//! === DUPLICATE 3-LINE GROUPS REPORT ===
//!
//! Total unique groups that had duplicates: 1
//! Total duplicate groups removed: 2
//!
//! --- DUPLICATE GROUP #1 (appeared 3 times) ---
//! ORIGINAL (kept):
//!   Hello
//!   world
//!
//! DUPLICATES (removed 2 copies):
//!
//! Duplicate #1:
//!   Hello
//!   world
//!
//! Duplicate #2:
//!   Hello
//!   world
//!
//! ============================================================
//! ```

use std::fmt;
use std::io;

use crate::dedup::{DedupOutcome, DuplicateLedger, Group, SeenTable};

use super::rank;

const RULE_WIDTH: usize = 60;

/// Text report formatter.
pub struct TextReport<'a> {
    seen: &'a SeenTable,
    duplicates: &'a DuplicateLedger,
    group_size: usize,
}

impl<'a> TextReport<'a> {
    /// Create a text report over the tables of a dedup pass.
    #[must_use]
    pub fn new(seen: &'a SeenTable, duplicates: &'a DuplicateLedger, group_size: usize) -> Self {
        Self {
            seen,
            duplicates,
            group_size,
        }
    }

    /// Create a text report for a finished pass.
    #[must_use]
    pub fn from_outcome(outcome: &'a DedupOutcome) -> Self {
        Self::new(&outcome.seen, &outcome.duplicates, outcome.stats.group_size)
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== DUPLICATE {}-LINE GROUPS REPORT ===\n",
            self.group_size
        )?;
        writeln!(
            f,
            "Total unique groups that had duplicates: {}",
            self.duplicates.len()
        )?;
        writeln!(
            f,
            "Total duplicate groups removed: {}\n",
            self.duplicates.total_duplicates()
        )?;

        for (idx, ranked) in rank(self.seen, self.duplicates).iter().enumerate() {
            writeln!(
                f,
                "--- DUPLICATE GROUP #{} (appeared {} times) ---",
                idx + 1,
                ranked.occurrences()
            )?;
            writeln!(f, "ORIGINAL (kept):")?;
            write_lines(f, ranked.original)?;

            writeln!(
                f,
                "\nDUPLICATES (removed {} copies):",
                ranked.duplicates.len()
            )?;
            for (dup_idx, duplicate) in ranked.duplicates.iter().enumerate() {
                writeln!(f, "\nDuplicate #{}:", dup_idx + 1)?;
                write_lines(f, duplicate)?;
            }

            writeln!(f, "\n{}\n", "=".repeat(RULE_WIDTH))?;
        }
        Ok(())
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, group: &Group) -> fmt::Result {
    for line in group.display_lines() {
        writeln!(f, "  {line}")?;
    }
    Ok(())
}

/// Render the text report.
///
/// # Arguments
///
/// * `seen` - First occurrence of every fingerprint
/// * `duplicates` - Removed occurrences
/// * `group_size` - Lines per group, shown in the header
#[must_use]
pub fn render(seen: &SeenTable, duplicates: &DuplicateLedger, group_size: usize) -> String {
    TextReport::new(seen, duplicates, group_size).to_string()
}
