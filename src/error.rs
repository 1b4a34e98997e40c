//! Error types for sass-graph.

use std::path::PathBuf;
use thiserror::Error;

use crate::parser::SyntaxError;

/// Errors raised while building a stylesheet graph.
///
/// Unresolvable imports and unknown traversal starts are not errors; they
/// are absorbed into empty results.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The single-file entry point was not given an existing regular file.
    #[error("invalid file: {}", .0.display())]
    InvalidFile(PathBuf),

    /// The directory entry point was not given an existing directory.
    #[error("invalid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// A stylesheet contains a malformed import directive.
    #[error("{}: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },

    /// Reading a file or its metadata failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exclusion pattern is not a valid regular expression.
    #[error("invalid exclude pattern: {0}")]
    InvalidExclude(#[from] regex::Error),

    /// A config file could not be read or parsed.
    #[error("config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the two construction-input errors (wrong path kind or missing path).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidFile(_) | GraphError::InvalidDirectory(_)
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;
