//! Cooperative cancellation.
//!
//! ```
//! use lasso_core::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let worker_token = token.clone();
//!
//! let handle = std::thread::spawn(move || {
//!     for i in 0..1_000_000u64 {
//!         if worker_token.is_cancelled() {
//!             return None;
//!         }
//!         std::hint::black_box(i);
//!     }
//!     Some(42)
//! });
//!
//! token.cancel();
//! let _ = handle.join().unwrap();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A token that can be used to request cancellation of a background task.
///
/// Cloned tokens share the same flag. Cancellation cannot be undone; start a
/// new token for a new task.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation.
    ///
    /// Returns `true` if this call performed the transition.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }
}

static_assertions::assert_impl_all!(CancellationToken: Send, Sync);
