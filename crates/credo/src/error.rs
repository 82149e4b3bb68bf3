//! Error types for the credo command-line tool.

use std::path::PathBuf;

use credo_core::{ParseError, RevisionError};
use thiserror::Error;

/// Error type for CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Statement file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Statement argument could not be tokenized
    #[error("invalid statement argument: {0}")]
    Parse(#[from] ParseError),

    /// Engine rejected the input or hit a broken invariant
    #[error("revision error: {0}")]
    Revision(#[from] RevisionError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using the CLI Error.
pub type Result<T> = std::result::Result<T, Error>;
