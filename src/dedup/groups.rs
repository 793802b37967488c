//! Line groups, fingerprints, and the tables built during a dedup pass.
//!
//! # Overview
//!
//! The input is split into consecutive groups of `K` lines. Every line lands
//! in exactly one group and groups keep input order, so concatenating all
//! groups gives back the input unchanged. The final group may be shorter
//! than `K`.
//!
//! # Example
//!
//! ```
//! use linedupe::dedup::partition;
//!
//! let lines: Vec<String> = ["a\n", "b\n", "c\n", "d\n"].iter().map(|s| s.to_string()).collect();
//! let groups: Vec<_> = partition(&lines, 3).collect();
//!
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].lines.len(), 3);
//! assert_eq!(groups[1].first_line, 3);
//! assert_eq!(groups[1].lines, vec!["d\n".to_string()]);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A contiguous run of up to `K` input lines.
///
/// Lines are stored verbatim, line terminators included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Position of this group in the input (0-based)
    pub index: usize,
    /// Index of the first line of this group in the input (0-based)
    pub first_line: usize,
    /// Original, unnormalized lines
    pub lines: Vec<String>,
}

impl Group {
    /// Create a new group.
    #[must_use]
    pub fn new(index: usize, first_line: usize, lines: Vec<String>) -> Self {
        Self {
            index,
            first_line,
            lines,
        }
    }

    /// Number of lines in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if this group has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 1-based line number of the first line, for display.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.first_line + 1
    }

    /// Lines with trailing whitespace and terminators removed.
    pub fn display_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.trim_end())
    }
}

/// Split `lines` into consecutive groups of `group_size` lines.
///
/// The last group holds the remainder when `lines.len()` is not a multiple
/// of `group_size`. A `group_size` of zero is treated as one.
pub fn partition(lines: &[String], group_size: usize) -> impl Iterator<Item = Group> + '_ {
    let size = group_size.max(1);
    lines
        .chunks(size)
        .enumerate()
        .map(move |(index, chunk)| Group::new(index, index * size, chunk.to_vec()))
}

/// Content digest of a normalized group (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Wrap raw digest bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Digest as a lowercase hexadecimal string (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First 12 hex characters, for log messages.
    #[must_use]
    pub fn short_hex(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// First occurrence of every fingerprint, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SeenTable {
    order: Vec<Fingerprint>,
    groups: HashMap<Fingerprint, Group>,
}

impl SeenTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `group` as the first occurrence of `fingerprint`.
    ///
    /// Returns `false` and leaves the table unchanged if the fingerprint
    /// was already recorded.
    pub fn insert(&mut self, fingerprint: Fingerprint, group: Group) -> bool {
        if self.groups.contains_key(&fingerprint) {
            return false;
        }
        self.order.push(fingerprint);
        self.groups.insert(fingerprint, group);
        true
    }

    /// Check if a fingerprint has been recorded.
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.groups.contains_key(fingerprint)
    }

    /// The first group recorded for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&Group> {
        self.groups.get(fingerprint)
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &Group)> {
        self.order
            .iter()
            .filter_map(move |fp| self.groups.get(fp).map(|group| (fp, group)))
    }
}

/// Every later occurrence of a fingerprint, in input order.
#[derive(Debug, Clone, Default)]
pub struct DuplicateLedger {
    order: Vec<Fingerprint>,
    entries: HashMap<Fingerprint, Vec<Group>>,
}

impl DuplicateLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a duplicate occurrence of `fingerprint`.
    pub fn record(&mut self, fingerprint: Fingerprint, group: Group) {
        let entry = self.entries.entry(fingerprint).or_insert_with(|| {
            self.order.push(fingerprint);
            Vec::new()
        });
        entry.push(group);
    }

    /// Duplicate occurrences recorded for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&[Group]> {
        self.entries.get(fingerprint).map(Vec::as_slice)
    }

    /// Number of fingerprints with at least one duplicate.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no duplicates were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of duplicate groups across all fingerprints.
    #[must_use]
    pub fn total_duplicates(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Entries in order of first duplicate.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &[Group])> {
        self.order.iter().filter_map(move |fp| {
            self.entries
                .get(fp)
                .map(|groups| (fp, groups.as_slice()))
        })
    }
}
