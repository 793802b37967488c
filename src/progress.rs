//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements [`ProgressCallback`]
//! to display a progress bar in the terminal while groups are processed.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the dedup pass.
///
/// Implement this trait to receive progress updates from
/// [`GroupDeduplicator`](crate::dedup::GroupDeduplicator).
pub trait ProgressCallback: Send + Sync {
    /// Called once before the first group.
    ///
    /// # Arguments
    ///
    /// * `total_lines` - Number of input lines
    fn on_start(&self, total_lines: usize);

    /// Called after each group.
    ///
    /// # Arguments
    ///
    /// * `lines_processed` - Input lines consumed so far
    fn on_progress(&self, lines_processed: usize);

    /// Called once after the last group.
    fn on_finish(&self);
}

/// Progress reporter using indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use linedupe::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_start(&self, total_lines: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_lines as u64);
        pb.set_style(Self::style());
        pb.set_message("Deduplicating");
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_progress(&self, lines_processed: usize) {
        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.set_position(lines_processed as u64);
        }
    }

    fn on_finish(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}
