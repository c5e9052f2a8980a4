//! Error types for queues and path searches.

use std::fmt;

/// Errors raised by [`MinQueue`](crate::MinQueue) queries on an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds no elements.
    Empty,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Queue is empty"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Errors raised by [`ShortestPaths`](crate::ShortestPaths).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The search observer requested cancellation.
    Aborted,
    /// The frontier emptied before the target was reached.
    Unreachable {
        /// The vertex that could not be reached.
        target: usize,
    },
    /// A vertex id lies outside the graph.
    VertexOutOfRange {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted => write!(f, "Search was aborted"),
            Self::Unreachable { target } => write!(f, "Vertex {target} is unreachable"),
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(
                f,
                "Vertex {vertex} is out of range for a graph of {vertex_count} vertices"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
