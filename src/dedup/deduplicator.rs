//! Group deduplication pass.
//!
//! # Overview
//!
//! [`GroupDeduplicator::dedup`] walks the input once, group by group:
//!
//! 1. Normalize the group. An empty normalized group is kept as-is.
//! 2. Fingerprint it. The first group with a fingerprint is kept and
//!    recorded in the [`SeenTable`].
//! 3. Any later group with the same fingerprint is dropped from the output
//!    and recorded in the [`DuplicateLedger`].
//!
//! Only whole groups are removed and the kept lines stay in input order.
//! The pass performs no I/O and cannot fail; configuration errors surface
//! when the deduplicator is built.
//!
//! # Example
//!
//! ```
//! use linedupe::dedup::GroupDeduplicator;
//!
//! let lines: Vec<String> = ["Hello\n", "world\n", "\n", "Hello\n", "world\n", "\n", "Bye\n"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let outcome = GroupDeduplicator::with_defaults().dedup(&lines);
//!
//! assert_eq!(outcome.kept, vec!["Hello\n", "world\n", "\n", "Bye\n"]);
//! assert_eq!(outcome.stats.duplicate_groups_removed, 1);
//! ```

use std::sync::Arc;

use serde::Serialize;

use super::fingerprint::{Fingerprinter, HashAlgorithm};
use super::groups::{partition, DuplicateLedger, SeenTable};
use super::normalizer::{
    Normalizer, TimestampMode, DEFAULT_STRIP_SYMBOLS, DEFAULT_TIMESTAMP_PATTERN,
};
use crate::error::DedupError;
use crate::progress::ProgressCallback;

/// Default number of lines per group.
pub const DEFAULT_GROUP_SIZE: usize = 3;

/// Lines between progress log messages.
const LOG_INTERVAL_LINES: usize = 3000;

/// Settings injected into the deduplicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupConfig {
    /// Lines per group (K)
    pub group_size: usize,
    /// Characters removed before comparison
    pub strip_symbols: String,
    /// Regex for the leading timestamp of a line
    pub timestamp_pattern: String,
    /// How timestamped lines are compared
    pub timestamp_mode: TimestampMode,
    /// Fingerprint digest
    pub hash_algorithm: HashAlgorithm,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            strip_symbols: DEFAULT_STRIP_SYMBOLS.to_string(),
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_string(),
            timestamp_mode: TimestampMode::default(),
            hash_algorithm: HashAlgorithm::default(),
        }
    }
}

impl DedupConfig {
    /// Set the group size.
    #[must_use]
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Set the decorative symbols to strip.
    #[must_use]
    pub fn with_strip_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.strip_symbols = symbols.into();
        self
    }

    /// Set the timestamp pattern.
    #[must_use]
    pub fn with_timestamp_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp_pattern = pattern.into();
        self
    }

    /// Set the timestamp mode.
    #[must_use]
    pub fn with_timestamp_mode(mut self, mode: TimestampMode) -> Self {
        self.timestamp_mode = mode;
        self
    }

    /// Set the fingerprint digest.
    #[must_use]
    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }
}

/// Statistics from a dedup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    /// Lines per group used for the pass
    pub group_size: usize,
    /// Digest used for fingerprints
    pub hash_algorithm: HashAlgorithm,
    /// Lines in the input
    pub total_lines: usize,
    /// Groups in the input
    pub total_groups: usize,
    /// Lines written to the output
    pub kept_lines: usize,
    /// Groups written to the output
    pub kept_groups: usize,
    /// Groups kept because they had nothing to compare
    pub passthrough_groups: usize,
    /// Distinct fingerprints seen
    pub unique_fingerprints: usize,
    /// Fingerprints that appeared more than once
    pub fingerprints_with_duplicates: usize,
    /// Groups dropped as duplicates
    pub duplicate_groups_removed: usize,
}

impl DedupStats {
    /// Lines dropped from the output.
    #[must_use]
    pub fn removed_lines(&self) -> usize {
        self.total_lines - self.kept_lines
    }

    /// Check if any group was removed.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_groups_removed > 0
    }

    /// Percentage of input lines removed.
    #[must_use]
    pub fn removal_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.removed_lines() as f64 / self.total_lines as f64) * 100.0
        }
    }
}

/// Result of a dedup pass.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Kept lines, verbatim and in input order
    pub kept: Vec<String>,
    /// First occurrence of every fingerprint
    pub seen: SeenTable,
    /// Later occurrences, dropped from `kept`
    pub duplicates: DuplicateLedger,
    /// Pass statistics
    pub stats: DedupStats,
}

/// Removes repeated line groups.
#[derive(Clone)]
pub struct GroupDeduplicator {
    group_size: usize,
    normalizer: Normalizer,
    fingerprinter: Fingerprinter,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for GroupDeduplicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupDeduplicator")
            .field("group_size", &self.group_size)
            .field("normalizer", &self.normalizer)
            .field("fingerprinter", &self.fingerprinter)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl GroupDeduplicator {
    /// Build a deduplicator from `config`.
    ///
    /// # Errors
    ///
    /// - `DedupError::InvalidGroupSize` if the group size is zero
    /// - `DedupError::InvalidPattern` if the timestamp pattern does not compile
    pub fn new(config: DedupConfig) -> Result<Self, DedupError> {
        if config.group_size == 0 {
            return Err(DedupError::InvalidGroupSize(config.group_size));
        }
        let normalizer = Normalizer::new(
            &config.timestamp_pattern,
            config.timestamp_mode,
            &config.strip_symbols,
        )?;

        Ok(Self {
            group_size: config.group_size,
            normalizer,
            fingerprinter: Fingerprinter::new(config.hash_algorithm),
            progress_callback: None,
        })
    }

    /// Deduplicator with groups of three, SHA-256, and the default
    /// timestamp pattern and symbol set.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            normalizer: Normalizer::with_defaults(),
            fingerprinter: Fingerprinter::default(),
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Lines per group.
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The normalizer used for comparison.
    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The fingerprinter used for comparison.
    #[must_use]
    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    /// Remove every group whose normalized content already appeared earlier.
    ///
    /// # Arguments
    ///
    /// * `lines` - The input, one element per line, terminators included
    ///
    /// # Returns
    ///
    /// The kept lines together with the tables needed for reporting.
    #[must_use]
    pub fn dedup(&self, lines: &[String]) -> DedupOutcome {
        let mut outcome = DedupOutcome {
            stats: DedupStats {
                group_size: self.group_size,
                hash_algorithm: self.fingerprinter.algorithm(),
                total_lines: lines.len(),
                ..Default::default()
            },
            ..Default::default()
        };

        if let Some(ref callback) = self.progress_callback {
            callback.on_start(lines.len());
        }

        log::info!(
            "Processing {} lines in groups of {}",
            lines.len(),
            self.group_size
        );

        for group in partition(lines, self.group_size) {
            outcome.stats.total_groups += 1;
            let processed = group.first_line + group.len();

            if group.first_line % LOG_INTERVAL_LINES == 0 && group.first_line > 0 {
                log::debug!("Processed {} lines", group.first_line);
            }

            let normalized = self.normalizer.normalize(&group.lines);
            match self.fingerprinter.fingerprint(&normalized) {
                None => {
                    log::trace!(
                        "Group {} (line {}): nothing to compare, keeping",
                        group.index,
                        group.line_number()
                    );
                    outcome.stats.passthrough_groups += 1;
                    outcome.stats.kept_groups += 1;
                    outcome.kept.extend(group.lines);
                }
                Some(fingerprint) if outcome.seen.contains(&fingerprint) => {
                    log::debug!(
                        "Group {} (line {}): duplicate of {}",
                        group.index,
                        group.line_number(),
                        fingerprint.short_hex()
                    );
                    outcome.stats.duplicate_groups_removed += 1;
                    outcome.duplicates.record(fingerprint, group);
                }
                Some(fingerprint) => {
                    outcome.stats.kept_groups += 1;
                    outcome.kept.extend(group.lines.iter().cloned());
                    outcome.seen.insert(fingerprint, group);
                }
            }

            if let Some(ref callback) = self.progress_callback {
                callback.on_progress(processed);
            }
        }

        outcome.stats.kept_lines = outcome.kept.len();
        outcome.stats.unique_fingerprints = outcome.seen.len();
        outcome.stats.fingerprints_with_duplicates = outcome.duplicates.len();

        if let Some(ref callback) = self.progress_callback {
            callback.on_finish();
        }

        log::info!(
            "Dedup complete: {} groups → {} kept, {} duplicates removed ({:.1}% of lines)",
            outcome.stats.total_groups,
            outcome.stats.kept_groups,
            outcome.stats.duplicate_groups_removed,
            outcome.stats.removal_rate()
        );

        outcome
    }
}

impl Default for GroupDeduplicator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
