//! Progress reporting for background tasks.
//!
//! Progress is tracked as an integer percentage so that observers are only
//! notified when the visible value changes, no matter how finely the task
//! reports its work.
//!
//! # Example
//!
//! ```
//! use lasso_core::ProgressReporter;
//!
//! let reporter = ProgressReporter::new();
//! reporter.on_progress_changed().connect(|&percent| {
//!     println!("Progress: {percent}%");
//! });
//!
//! reporter.set_fraction(1, 4);
//! assert_eq!(reporter.percent(), 25);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::signal::Signal;

struct ProgressReporterInner {
    percent: AtomicU8,
    progress_changed: Signal<u8>,
}

/// A thread-safe progress reporter.
///
/// Clones share state. `progress_changed` is emitted on the thread that
/// reports progress; connect with a queued connection (or forward into a
/// channel) to consume it elsewhere.
#[derive(Clone)]
pub struct ProgressReporter {
    inner: Arc<ProgressReporterInner>,
}

impl ProgressReporter {
    /// Create a reporter at 0%.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ProgressReporterInner {
                percent: AtomicU8::new(0),
                progress_changed: Signal::new(),
            }),
        }
    }

    /// Current progress in percent (0 to 100).
    pub fn percent(&self) -> u8 {
        self.inner.percent.load(Ordering::Acquire)
    }

    /// Set the progress in percent, clamped to 100.
    ///
    /// Emits `progress_changed` only if the value changes.
    pub fn set_percent(&self, percent: u8) {
        let clamped = percent.min(100);
        let old = self.inner.percent.swap(clamped, Ordering::AcqRel);
        if old != clamped {
            self.inner.progress_changed.emit(clamped);
        }
    }

    /// Set the progress from `done` units of `total`.
    ///
    /// A zero `total` counts as complete.
    pub fn set_fraction(&self, done: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            (done.min(total) as u128 * 100 / total as u128) as u8
        };
        self.set_percent(percent);
    }

    /// Reset to 0%.
    pub fn reset(&self) {
        self.set_percent(0);
    }

    /// Signal emitted whenever the percentage changes.
    pub fn on_progress_changed(&self) -> &Signal<u8> {
        &self.inner.progress_changed
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("percent", &self.percent())
            .finish()
    }
}

static_assertions::assert_impl_all!(ProgressReporter: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ConnectionType;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_progress_clamping() {
        let reporter = ProgressReporter::new();
        reporter.set_percent(150);
        assert_eq!(reporter.percent(), 100);

        reporter.set_fraction(30, 20);
        assert_eq!(reporter.percent(), 100);

        reporter.set_fraction(0, 0);
        assert_eq!(reporter.percent(), 100);
    }

    #[test]
    fn test_signal_only_on_change() {
        let reporter = ProgressReporter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        reporter.on_progress_changed().connect_with_type(
            move |&p| seen_clone.lock().push(p),
            ConnectionType::Direct,
        );

        for done in 0..=1000 {
            reporter.set_fraction(done, 1000);
        }

        let seen = seen.lock();
        assert_eq!(seen.len(), 100);
        assert_eq!(seen.first(), Some(&1));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_reporter_clone_shares_state() {
        let reporter = ProgressReporter::new();
        let other = reporter.clone();
        reporter.set_percent(40);
        assert_eq!(other.percent(), 40);
        other.reset();
        assert_eq!(reporter.percent(), 0);
    }
}
