//! Property-change notifications.
//!
//! Observers subscribe to one [`PropertyName`] at a time and receive a
//! [`PropertyChange`] carrying the new value. Selection payloads are copies,
//! so an observer can never mutate the model through a notification.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use lasso::{ModelOptions, Point, PropertyChange, PropertyName, SelectionModel};
//!
//! let mut model = SelectionModel::point_to_point(ModelOptions::default());
//! let changes = Arc::new(AtomicUsize::new(0));
//! let seen = changes.clone();
//! model.connect(PropertyName::State, move |change| {
//!     assert!(matches!(change, PropertyChange::State(_)));
//!     seen.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! model.start(Point::new(0, 0)).unwrap();
//! assert_eq!(changes.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;

use lasso_core::{ConnectionId, ConnectionType, Signal};

use crate::geometry::PolyLine;
use crate::state::SelectionState;

/// The observable properties of a selection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    /// The lifecycle state changed.
    State,
    /// Search progress changed.
    Progress,
    /// The committed selection changed.
    Selection,
}

impl PropertyName {
    /// Every property.
    pub const ALL: [PropertyName; 3] = [Self::State, Self::Progress, Self::Selection];

    /// Stable lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Progress => "progress",
            Self::Selection => "selection",
        }
    }

    /// Look a property up by [`as_str`](Self::as_str) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property change with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    /// New lifecycle state.
    State(SelectionState),
    /// Search progress in percent.
    Progress(u8),
    /// The full new selection.
    Selection(Vec<PolyLine>),
}

impl PropertyChange {
    /// The property this change belongs to.
    pub fn property(&self) -> PropertyName {
        match self {
            Self::State(_) => PropertyName::State,
            Self::Progress(_) => PropertyName::Progress,
            Self::Selection(_) => PropertyName::Selection,
        }
    }
}

/// Handle returned by [`PropertyChangeSupport::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyConnection {
    property: PropertyName,
    id: ConnectionId,
}

impl PropertyConnection {
    /// The property the listener is attached to.
    pub fn property(&self) -> PropertyName {
        self.property
    }
}

/// One signal per observable property.
pub struct PropertyChangeSupport {
    state: Signal<PropertyChange>,
    progress: Signal<PropertyChange>,
    selection: Signal<PropertyChange>,
    connection_type: ConnectionType,
}

impl PropertyChangeSupport {
    /// Create the bus.
    ///
    /// With `queued`, listeners run when the thread that connected them calls
    /// [`lasso_core::process_queued`]; otherwise they run inside the
    /// operation that fired the change.
    pub fn new(queued: bool) -> Self {
        Self {
            state: Signal::new(),
            progress: Signal::new(),
            selection: Signal::new(),
            connection_type: if queued {
                ConnectionType::Queued
            } else {
                ConnectionType::Direct
            },
        }
    }

    fn signal(&self, property: PropertyName) -> &Signal<PropertyChange> {
        match property {
            PropertyName::State => &self.state,
            PropertyName::Progress => &self.progress,
            PropertyName::Selection => &self.selection,
        }
    }

    /// How listeners are invoked.
    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    /// Attach `listener` to `property`.
    pub fn connect<F>(&self, property: PropertyName, listener: F) -> PropertyConnection
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        let id = self
            .signal(property)
            .connect_with_type(listener, self.connection_type);
        PropertyConnection { property, id }
    }

    /// Detach a listener. Returns `false` if it was already detached.
    pub fn disconnect(&self, connection: PropertyConnection) -> bool {
        self.signal(connection.property).disconnect(connection.id)
    }

    /// Number of listeners on `property`.
    pub fn listener_count(&self, property: PropertyName) -> usize {
        self.signal(property).connection_count()
    }

    /// Deliver `change` to the listeners of its property.
    pub fn fire(&self, change: PropertyChange) {
        self.signal(change.property()).emit(change);
    }
}

impl fmt::Debug for PropertyChangeSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyChangeSupport")
            .field("state", &self.state.connection_count())
            .field("progress", &self.progress.connection_count())
            .field("selection", &self.selection.connection_count())
            .field("connection_type", &self.connection_type)
            .finish()
    }
}

static_assertions::assert_impl_all!(PropertyChangeSupport: Send, Sync);
