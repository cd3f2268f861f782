use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

/// Recoverable errors surfaced by the host list
#[derive(Debug, Error)]
pub enum ListError {
    #[error("you must select an item")]
    NoSelection,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A connect command that did not exit cleanly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    /// Exact command line that was executed
    pub command: String,
    /// Captured diagnostics, or the process error when nothing was captured
    pub message: String,
}

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command: {}\nError:   {}", self.command, self.message)
    }
}

impl std::error::Error for ProcessFailure {}
