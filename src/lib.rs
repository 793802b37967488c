//! LineDupe - Line-Group Deduplicator
//!
//! Removes repeated groups of consecutive lines from chat exports and logs.
//! Groups are compared by a fingerprint of their normalized text, so copies
//! that differ only in timestamps, decorative emoji, or spacing still count
//! as duplicates. Every removal is listed in a duplicates report.
//!
//! # Example
//!
//! ```
//! use linedupe::dedup::{DedupConfig, GroupDeduplicator};
//!
//! let lines: Vec<String> = ["hello\n", "world\n", "hello\n", "world\n"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let dedup = GroupDeduplicator::new(DedupConfig::default().with_group_size(2)).unwrap();
//! let outcome = dedup.dedup(&lines);
//! assert_eq!(outcome.kept, vec!["hello\n", "world\n"]);
//! assert_eq!(outcome.stats.duplicate_groups_removed, 1);
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod io;
pub mod logging;
pub mod progress;
pub mod report;

mod app;

pub use app::run_app;
