//! Error types for the selection model.

use lasso_core::TaskError;
use lasso_graph::SearchError;

use crate::state::SelectionState;

/// Result type alias for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors returned by [`SelectionModel`](crate::SelectionModel) operations.
///
/// A failed operation leaves the model exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The operation is not allowed in the current state.
    #[error("Cannot {operation} while in state {state}")]
    InvalidState {
        operation: &'static str,
        state: SelectionState,
    },

    /// A point index outside the selection.
    #[error("Point index {index} out of range for a selection of {len} segments")]
    InvalidIndex { index: usize, len: usize },

    /// The operation needs an image and none is set.
    #[error("No image is set")]
    NoImage,

    /// The selection encloses no pixel of the image.
    #[error("Selection does not cover any pixel of the image")]
    EmptyRegion,

    /// Encoding or writing the exported region failed.
    #[error("Failed to export selection: {0}")]
    ExportFailure(#[from] image::ImageError),

    /// The path search failed.
    #[error("Path search failed: {0}")]
    Search(#[from] SearchError),

    /// The path search could not be started.
    #[error("Failed to start path search: {0}")]
    Task(#[from] TaskError),
}

impl SelectionError {
    /// Create an invalid-state error.
    pub fn invalid_state(operation: &'static str, state: SelectionState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Whether this error is an [`InvalidState`](Self::InvalidState).
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SelectionError::invalid_state("add a point", SelectionState::Selected);
        assert_eq!(err.to_string(), "Cannot add a point while in state SELECTED");
        assert!(err.is_invalid_state());

        let err = SelectionError::InvalidIndex { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Point index 5 out of range for a selection of 3 segments"
        );
        assert!(!err.is_invalid_state());
    }

    #[test]
    fn test_search_error_source() {
        use std::error::Error as _;

        let err = SelectionError::from(SearchError::Unreachable { target: 7 });
        assert!(err.source().is_some());
    }
}
