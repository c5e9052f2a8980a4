//! Queued invocation delivery for cross-thread signal emission.
//!
//! # How It Works
//!
//! 1. When a signal is emitted with a `Queued` connection, or an `Auto`
//!    connection from a thread other than the connecting one, the slot call is
//!    wrapped in a closure and posted here under the connecting thread's id.
//!
//! 2. The owning (UI) thread periodically calls [`process_queued`], which runs
//!    every invocation posted for that thread in posting order.
//!
//! Invocations posted for a thread are never run on another thread.

use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;
use std::thread::ThreadId;

use parking_lot::Mutex;

use crate::logging::targets;

/// Global invocation queue.
static INVOCATION_QUEUE: OnceLock<InvocationQueue> = OnceLock::new();

/// A type-erased queued invocation that can be executed later.
pub struct QueuedInvocation {
    invoke: Box<dyn FnOnce() + Send>,
}

impl QueuedInvocation {
    /// Create a new queued invocation.
    pub fn new<F>(invoke: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
        }
    }

    /// Execute the invocation.
    pub fn execute(self) {
        (self.invoke)();
    }
}

impl std::fmt::Debug for QueuedInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedInvocation").finish_non_exhaustive()
    }
}

/// Per-thread FIFO queues of pending slot invocations.
pub struct InvocationQueue {
    queues: Mutex<HashMap<ThreadId, VecDeque<QueuedInvocation>>>,
}

impl InvocationQueue {
    fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Post an invocation to be run by `thread`.
    pub fn post(&self, thread: ThreadId, invocation: QueuedInvocation) {
        self.queues
            .lock()
            .entry(thread)
            .or_default()
            .push_back(invocation);
    }

    /// Take every invocation queued for `thread`.
    fn take_all(&self, thread: ThreadId) -> VecDeque<QueuedInvocation> {
        self.queues.lock().remove(&thread).unwrap_or_default()
    }

    /// Number of invocations waiting for `thread`.
    pub fn pending_count(&self, thread: ThreadId) -> usize {
        self.queues.lock().get(&thread).map_or(0, VecDeque::len)
    }
}

/// Get the global invocation queue.
pub fn invocation_queue() -> &'static InvocationQueue {
    INVOCATION_QUEUE.get_or_init(InvocationQueue::new)
}

/// Run every invocation queued for the current thread.
///
/// Invocations posted while this runs (for example by a slot that emits
/// another queued signal) are run in the same call. Returns the number of
/// invocations executed.
pub fn process_queued() -> usize {
    let thread = std::thread::current().id();
    let mut executed = 0;
    loop {
        let batch = invocation_queue().take_all(thread);
        if batch.is_empty() {
            break;
        }
        for invocation in batch {
            invocation.execute();
            executed += 1;
        }
    }
    if executed > 0 {
        tracing::trace!(target: targets::INVOCATION, executed, "processed queued invocations");
    }
    executed
}

/// Number of invocations waiting for the current thread.
pub fn pending_for_current_thread() -> usize {
    invocation_queue().pending_count(std::thread::current().id())
}
