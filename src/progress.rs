//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::borrow::Cow;

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stderr
/// yourself as long as a report is being displayed. Please use logs for debug
/// messages.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare to report on a new operation made of a number of steps
    ///
    /// Nothing is displayed if there are no steps to be taken.
    pub fn add(&self, what: impl Into<Cow<'static, str>>, steps: usize) -> ProgressTracker {
        let bar = ProgressBar::new(steps as u64)
            .with_prefix(what.into())
            .with_style(
                ProgressStyle::with_template("{prefix} {wide_bar} {pos}/{len}")
                    .expect("the style above should be a valid indicatif style"),
            );
        if steps > 0 {
            self.0.add(bar.clone());
        }
        ProgressTracker {
            bar,
            report: self.0.clone(),
        }
    }
}

/// Mechanism to track progress
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific operation
    bar: ProgressBar,

    /// Underlying progress report
    report: MultiProgress,
}
//
impl ProgressTracker {
    /// Show that a certain amount of progress has been made
    ///
    /// Returns truth that the progress bar has reached its maximum value
    pub fn make_progress(&self, progress: u64) -> bool {
        // Track progress
        self.bar.inc(progress);
        let current = self.bar.position();
        let max = self.bar.length().unwrap_or(0);
        assert!(current <= max, "recorded more progress than expected");

        // Hide progress bar once done
        let finished = current == max;
        if finished {
            self.bar.finish_and_clear();
            self.report.remove(&self.bar);
        }
        finished
    }
}
