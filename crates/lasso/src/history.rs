//! Undo history of committed selections.

use std::collections::VecDeque;

use crate::geometry::{Point, PolyLine};
use crate::state::SelectionState;

/// A committed selection, as it was before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Segments at the time of the snapshot.
    pub selection: Vec<PolyLine>,
    /// Loop anchor at the time of the snapshot.
    pub start: Option<Point>,
    /// Committed state at the time of the snapshot.
    pub state: SelectionState,
}

/// A stack of snapshots, optionally bounded.
///
/// When a bound is set the oldest snapshot is dropped to make room.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    limit: Option<usize>,
}

impl History {
    /// An empty history holding at most `limit` snapshots.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    /// Push a snapshot.
    pub fn record(&mut self, snapshot: Snapshot) {
        debug_assert!(snapshot.state.is_committed());
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.snapshots.len() >= limit {
                self.snapshots.pop_front();
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    /// The most recent snapshot.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(x: i32) -> Snapshot {
        Snapshot {
            selection: Vec::new(),
            start: Some(Point::new(x, 0)),
            state: SelectionState::Selecting,
        }
    }

    #[test]
    fn test_lifo() {
        let mut history = History::new(None);
        history.record(snapshot(1));
        history.record(snapshot(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek(), Some(&snapshot(2)));
        assert_eq!(history.pop(), Some(snapshot(2)));
        assert_eq!(history.pop(), Some(snapshot(1)));
        assert_eq!(history.pop(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(Some(2));
        for x in 0..5 {
            history.record(snapshot(x));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(snapshot(4)));
        assert_eq!(history.pop(), Some(snapshot(3)));
    }

    #[test]
    fn test_zero_limit_records_nothing() {
        let mut history = History::new(Some(0));
        history.record(snapshot(0));
        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(0));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.record(snapshot(0));
        history.clear();
        assert_eq!(history.pop(), None);
    }
}
