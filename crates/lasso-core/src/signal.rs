//! Change notification.
//!
//! A [`Signal`] holds a set of slots (callbacks). Emitting the signal hands
//! the value to every slot, either right away or through the invocation queue
//! of the thread that connected the slot, depending on its
//! [`ConnectionType`].
//!
//! Queued slots run when their thread calls
//! [`process_queued`](crate::invocation::process_queued). This is how changes
//! made on a worker thread reach listeners that must run on the UI thread.
//!
//! # Example
//!
//! ```
//! use lasso_core::Signal;
//!
//! let percent_changed = Signal::<u8>::new();
//! let id = percent_changed.connect(|percent| println!("{percent}%"));
//!
//! percent_changed.emit(40);
//! percent_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::thread::ThreadId;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::invocation::{QueuedInvocation, invocation_queue};
use crate::logging::targets;

new_key_type! {
    /// Identifies one connected slot; pass it to [`Signal::disconnect`].
    pub struct ConnectionId;
}

/// When a slot runs relative to the emission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionType {
    /// Inside `emit`, on the emitting thread.
    Direct,
    /// Later, on the connecting thread, when it drains its queue.
    Queued,
    /// `Direct` if emitted on the connecting thread, `Queued` otherwise.
    #[default]
    Auto,
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Connection<Args> {
    slot: Slot<Args>,
    kind: ConnectionType,
    /// Thread that connected the slot; queued invocations are posted here.
    owner: ThreadId,
}

/// A typed notification source with any number of slots.
///
/// `Signal<Args>` is `Send + Sync`; `Args` is cloned once per queued slot.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect `slot` with [`ConnectionType::Auto`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_with_type(slot, ConnectionType::Auto)
    }

    /// Connect `slot` with an explicit connection type.
    ///
    /// ```
    /// use lasso_core::{ConnectionType, Signal};
    ///
    /// let finished = Signal::<bool>::new();
    /// finished.connect_with_type(|ok| println!("now: {ok}"), ConnectionType::Direct);
    /// finished.connect_with_type(|ok| println!("on drain: {ok}"), ConnectionType::Queued);
    ///
    /// finished.emit(true);
    /// lasso_core::process_queued();
    /// ```
    pub fn connect_with_type<F>(&self, slot: F, kind: ConnectionType) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Connection {
            slot: Arc::new(slot),
            kind,
            owner: std::thread::current().id(),
        })
    }

    /// Remove one slot. Returns `false` if it was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Deliver `args` to every slot.
    ///
    /// The slot list is copied out of the lock first, so slots may connect or
    /// disconnect while being called.
    #[tracing::instrument(skip_all, target = "lasso_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let here = std::thread::current().id();
        let pending: Vec<(Slot<Args>, ConnectionType, ThreadId)> = self
            .slots
            .lock()
            .values()
            .map(|c| (Arc::clone(&c.slot), c.kind, c.owner))
            .collect();
        tracing::trace!(target: targets::SIGNAL, slots = pending.len(), "emit");

        for (slot, kind, owner) in pending {
            let queued = match kind {
                ConnectionType::Direct => false,
                ConnectionType::Queued => true,
                ConnectionType::Auto => owner != here,
            };
            if queued {
                let args = args.clone();
                invocation_queue().post(owner, QueuedInvocation::new(move || slot(&args)));
            } else {
                slot(&args);
            }
        }
    }
}

static_assertions::assert_impl_all!(Signal<u8>: Send, Sync);

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}
