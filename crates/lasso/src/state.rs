//! Selection lifecycle states and their display labels.

use std::fmt;

/// Lifecycle of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    NoSelection,
    /// A boundary is being drawn and is still open.
    Selecting,
    /// The boundary is closed.
    Selected,
    /// A path search for the next segment is running.
    Processing,
}

impl SelectionState {
    /// Whether the state can be restored by undo.
    ///
    /// `Processing` is transient and never recorded.
    pub fn is_committed(self) -> bool {
        !matches!(self, Self::Processing)
    }

    /// Upper-case status label shown in user interfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoSelection => "NO_SELECTION",
            Self::Selecting => "SELECTING",
            Self::Selected => "SELECTED",
            Self::Processing => "PROCESSING",
        }
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(SelectionState::default(), SelectionState::NoSelection);
        assert_eq!(SelectionState::Processing.to_string(), "PROCESSING");
        assert!(SelectionState::Selected.is_committed());
        assert!(!SelectionState::Processing.is_committed());
    }
}
