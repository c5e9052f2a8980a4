//! Configuration for selection models and path searches.

use lasso_core::TaskConfig;

/// Settled nodes between two cancellation checks.
const DEFAULT_CANCEL_CHECK_INTERVAL: usize = 1024;
/// Settled-node budget of a live-wire preview.
const DEFAULT_LIVE_WIRE_BUDGET: usize = 20_000;

/// Tuning for path-search strategies.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Settled nodes between cancellation checks and progress reports.
    pub cancel_check_interval: usize,
    /// Settled nodes a live-wire preview may visit before it gives up and
    /// draws a straight line.
    pub live_wire_budget: usize,
    /// Thread configuration for background searches.
    pub task: TaskConfig,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            cancel_check_interval: DEFAULT_CANCEL_CHECK_INTERVAL,
            live_wire_budget: DEFAULT_LIVE_WIRE_BUDGET,
            task: TaskConfig::with_name("lasso-scissors"),
        }
    }
}

impl SearchOptions {
    /// Set the cancellation check interval. Zero is treated as one.
    pub fn with_cancel_check_interval(mut self, interval: usize) -> Self {
        self.cancel_check_interval = interval.max(1);
        self
    }

    /// Set the live-wire budget.
    pub fn with_live_wire_budget(mut self, budget: usize) -> Self {
        self.live_wire_budget = budget;
        self
    }

    /// Set the background thread configuration.
    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.task = task;
        self
    }
}

/// Options for a [`SelectionModel`](crate::SelectionModel).
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    /// Deliver property changes through the connecting thread's invocation
    /// queue instead of synchronously.
    pub notify_on_ui_thread: bool,
    /// Maximum number of undo snapshots. `None` keeps every snapshot.
    pub history_limit: Option<usize>,
    /// Path-search tuning.
    pub search: SearchOptions,
}

impl ModelOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue property changes for the UI thread.
    pub fn with_notify_on_ui_thread(mut self, queued: bool) -> Self {
        self.notify_on_ui_thread = queued;
        self
    }

    /// Bound the undo history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the path-search tuning.
    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }
}
