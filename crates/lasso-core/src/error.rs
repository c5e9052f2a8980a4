//! Error types for Lasso core systems.

use std::fmt;

/// Errors raised when starting a background task.
#[derive(Debug)]
pub enum TaskError {
    /// The operating system refused to create the task thread.
    Spawn(std::io::Error),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "Failed to spawn task thread: {err}"),
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
        }
    }
}
