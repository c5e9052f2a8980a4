//! Single-owner thread checks.
//!
//! A selection model is driven from one thread. It records that thread in a
//! [`ThreadAffinity`] and checks it at the top of every mutating call, so a
//! model accidentally shared with a worker fails loudly in debug builds.

use std::thread::ThreadId;

/// The thread an object is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: std::thread::current().id(),
        }
    }

    /// Whether the calling thread is the owner.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.owner
    }

    /// Make the calling thread the owner, after the object was moved.
    pub fn rebind(&mut self) {
        *self = Self::current();
    }

    /// Panic unless called from the owning thread.
    #[track_caller]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            panic!(
                "owned by thread {:?} but used from thread {:?}",
                self.owner,
                std::thread::current().id()
            );
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds only.
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }
}
