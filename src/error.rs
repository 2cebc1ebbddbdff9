//! Construction-time error reporting.
//!
//! Every error here is raised while building a configuration from its
//! external representation, before any search begins. Search exhaustion is
//! not an error: `Solver::solve` reports it as an empty path.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A puzzle definition that could not be turned into a valid configuration.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The puzzle file could not be opened or read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The puzzle file is not well-formed JSON.
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The definition parsed but describes an inconsistent puzzle.
    #[error("invalid {context}: {reason}")]
    Invalid { context: String, reason: String },
}

impl PuzzleError {
    pub(crate) fn invalid(context: impl Into<String>, reason: impl Into<String>) -> Self {
        PuzzleError::Invalid {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
