//! Group normalization for comparison.
//!
//! # Overview
//!
//! Chat exports repeat the same message with different timestamps, emoji
//! decoration, and spacing. The [`Normalizer`] reduces a group to the text
//! that matters for equality:
//!
//! 1. Blank lines are dropped. A group with nothing left is incomparable.
//! 2. Lines starting with a bracketed timestamp such as
//!    `[1/2/2024, 10:00:00 PM]` have the timestamp stripped (or the whole
//!    line dropped, see [`TimestampMode`]).
//! 3. Decorative symbols are removed, whitespace runs collapse to one
//!    space, and the result is trimmed.
//!
//! The normalized form is only used for fingerprinting. It is never written
//! to the deduplicated output.
//!
//! # Example
//!
//! ```
//! use linedupe::dedup::Normalizer;
//!
//! let normalizer = Normalizer::with_defaults();
//! let group = vec![
//!     "[1/1/2024, 10:00:00] Alice: Hi ✨\n".to_string(),
//!     "\n".to_string(),
//! ];
//!
//! let normalized = normalizer.normalize(&group);
//! assert_eq!(normalized.lines(), ["Alice: Hi"]);
//! ```

use std::collections::HashSet;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DedupError;

/// Default timestamp prefix: `[D/M/YYYY, H:MM:SS<anything>]`.
pub const DEFAULT_TIMESTAMP_PATTERN: &str =
    r"^\[\d{1,2}/\d{1,2}/\d{4}, \d{1,2}:\d{2}:\d{2}[^\]]*\]";

/// Default decorative symbols stripped before comparison.
///
/// Each character is removed on its own, so variation selectors and
/// regional indicators are listed through the emoji that carry them.
pub const DEFAULT_STRIP_SYMBOLS: &str = "✅🔹🔸☘️💙✨🇭🇰🌈🔥💅❤️🏷️🆕";

/// What to do with a line that starts with a timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// Remove the timestamp prefix and compare the rest of the line.
    /// Lines holding only a timestamp are dropped.
    #[default]
    Strip,
    /// Drop the whole line from comparison.
    Drop,
}

impl std::fmt::Display for TimestampMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampMode::Strip => write!(f, "strip"),
            TimestampMode::Drop => write!(f, "drop"),
        }
    }
}

/// The comparable form of a group: cleaned lines in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedGroup(Vec<String>);

impl NormalizedGroup {
    /// Cleaned lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Number of cleaned lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty group cannot be compared and is always kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lines joined with `\n`, the input to fingerprinting.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

impl From<Vec<String>> for NormalizedGroup {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

/// Reduces raw groups to their comparable form.
#[derive(Debug, Clone)]
pub struct Normalizer {
    timestamp: Regex,
    timestamp_mode: TimestampMode,
    strip_symbols: HashSet<char>,
}

impl Normalizer {
    /// Create a normalizer.
    ///
    /// # Arguments
    ///
    /// * `timestamp_pattern` - Regex matched against the start of each trimmed line
    /// * `timestamp_mode` - Strip the matched prefix or drop the line
    /// * `strip_symbols` - Characters removed from every line
    ///
    /// # Errors
    ///
    /// Returns `DedupError::InvalidPattern` if the pattern does not compile.
    pub fn new(
        timestamp_pattern: &str,
        timestamp_mode: TimestampMode,
        strip_symbols: &str,
    ) -> Result<Self, DedupError> {
        let timestamp = Regex::new(timestamp_pattern)?;
        Ok(Self {
            timestamp,
            timestamp_mode,
            strip_symbols: strip_symbols.chars().collect(),
        })
    }

    /// Normalizer with the default pattern, mode, and symbol set.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            timestamp: Regex::new(DEFAULT_TIMESTAMP_PATTERN)
                .unwrap_or_else(|e| unreachable!("default timestamp pattern is valid: {e}")),
            timestamp_mode: TimestampMode::default(),
            strip_symbols: DEFAULT_STRIP_SYMBOLS.chars().collect(),
        }
    }

    /// Normalize the raw lines of one group.
    #[must_use]
    pub fn normalize<S: AsRef<str>>(&self, lines: &[S]) -> NormalizedGroup {
        let cleaned = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|text| !text.is_empty())
            .filter_map(|text| self.without_timestamp(text))
            .map(|text| self.clean_line(text))
            .collect();
        NormalizedGroup(cleaned)
    }

    /// Apply the timestamp rule to a trimmed, non-blank line.
    ///
    /// Returns `None` when the line takes no part in comparison.
    fn without_timestamp<'a>(&self, text: &'a str) -> Option<&'a str> {
        let Some(found) = self.timestamp.find(text).filter(|m| m.start() == 0) else {
            return Some(text);
        };
        match self.timestamp_mode {
            TimestampMode::Drop => None,
            TimestampMode::Strip => {
                let rest = text[found.end()..].trim();
                (!rest.is_empty()).then_some(rest)
            }
        }
    }

    /// Remove decorative symbols, collapse whitespace, and trim.
    #[must_use]
    pub fn clean_line(&self, text: &str) -> String {
        let stripped: String = text
            .chars()
            .filter(|c| !self.strip_symbols.contains(c))
            .collect();
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Check if a trimmed line starts with a timestamp.
    #[must_use]
    pub fn is_timestamp_line(&self, text: &str) -> bool {
        self.timestamp
            .find(text.trim())
            .is_some_and(|m| m.start() == 0)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
