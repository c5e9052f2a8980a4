//! Tracing targets used throughout Lasso.
//!
//! Lasso uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. Filter by these targets to follow one subsystem.
//! `lasso-graph` logs under its own `lasso_graph::search` target:
//!
//! ```ignore
//! RUST_LOG=lasso::model=debug,lasso_graph::search=trace
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lasso_core::signal";
    /// Queued invocation delivery target.
    pub const INVOCATION: &str = "lasso_core::invocation";
    /// Background task target.
    pub const TASK: &str = "lasso_core::task";
    /// Selection state machine target.
    pub const MODEL: &str = "lasso::model";
    /// Path-search strategy target.
    pub const SCISSORS: &str = "lasso::scissors";
    /// Region export target.
    pub const EXPORT: &str = "lasso::export";
}
