//! Line-group deduplication.
//!
//! This module provides functionality for:
//! - Splitting input into fixed-size line groups
//! - Normalizing groups (timestamps, decorative symbols, whitespace)
//! - Fingerprinting normalized groups
//! - Keeping the first occurrence of each fingerprint

pub mod deduplicator;
pub mod fingerprint;
pub mod groups;
pub mod normalizer;

pub use deduplicator::{
    DedupConfig, DedupOutcome, DedupStats, GroupDeduplicator, DEFAULT_GROUP_SIZE,
};
pub use fingerprint::{Fingerprinter, HashAlgorithm};
pub use groups::{partition, DuplicateLedger, Fingerprint, Group, SeenTable};
pub use normalizer::{
    NormalizedGroup, Normalizer, TimestampMode, DEFAULT_STRIP_SYMBOLS, DEFAULT_TIMESTAMP_PATTERN,
};
