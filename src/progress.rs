//! Progress reporting utilities using indicatif.
//!
//! [`Progress`] implements [`ProgressCallback`] with a spinner on stderr that
//! counts hashed files during a scan. indicatif hides the spinner on its own
//! when stderr is not a terminal, so piping output stays clean.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for directory scans.
///
/// Implement this trait to receive updates while a
/// [`Scanner`](crate::scanner::Scanner) runs.
pub trait ProgressCallback: Send + Sync {
    /// Called once before the walk begins.
    fn on_scan_start(&self, root: &Path);

    /// Called after each matching file is processed.
    ///
    /// # Arguments
    ///
    /// * `processed` - Number of matching files processed so far (1-based)
    fn on_file(&self, processed: usize);

    /// Called when the scan finishes.
    ///
    /// # Arguments
    ///
    /// * `hashed` - Number of files successfully hashed
    fn on_scan_end(&self, hashed: usize);
}

/// Spinner-based progress reporter.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelsum::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(Self::style());
        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, root: &Path) {
        self.bar.set_message(format!("Hashing {}", root.display()));
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_file(&self, processed: usize) {
        self.bar.set_position(processed as u64);
    }

    fn on_scan_end(&self, hashed: usize) {
        self.bar.finish_and_clear();
        log::debug!("Progress: scan finished, {} file(s) hashed", hashed);
    }
}
