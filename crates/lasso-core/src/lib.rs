//! Core systems for Lasso.
//!
//! This crate provides the plumbing shared by the selection engine:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Queued Delivery**: Per-thread queues that run slots on their owning thread
//! - **Thread Affinity**: Debug checks for single-owner types
//! - **Progress**: Percent progress reporting from background work
//! - **Background Tasks**: Cancellable jobs on dedicated threads
//!
//! # Signal/Slot Example
//!
//! ```
//! use lasso_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod cancellation;
mod error;
pub mod invocation;
pub mod logging;
pub mod progress;
pub mod signal;
pub mod task;
pub mod thread_check;

pub use cancellation::CancellationToken;
pub use error::TaskError;
pub use invocation::process_queued;
pub use progress::ProgressReporter;
pub use signal::{ConnectionId, ConnectionType, Signal};
pub use task::{BackgroundTask, TaskConfig, TaskContext, TaskEvent};
pub use thread_check::ThreadAffinity;
