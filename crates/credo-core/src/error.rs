//! Error types for the revision engines

use thiserror::Error;

use crate::parser::ParseError;

/// Errors raised by the revision engines.
///
/// Expected rejections (a contradicted expansion, a revision from a reporter
/// that is not credible enough) are reported as `false`, never as errors.
/// These variants cover invalid input and broken internal invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevisionError {
    /// Node identifier was empty or whitespace
    #[error("node identifier must not be blank")]
    EmptyNode,

    /// A reconstructed cycle hop is not backed by any statement
    #[error("cycle hop {from} -> {to} has no backing statement")]
    BrokenCycle { from: String, to: String },

    /// Tried to remove a statement the knowledge base does not hold
    #[error("statement not present: {0}")]
    MissingStatement(String),

    /// Matrix support values must be finite and strictly positive
    #[error("invalid support value: {0}")]
    InvalidSupport(f64),

    /// Matrix index outside the current dimension
    #[error("index {index} out of range for matrix of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Matrix rows of unequal length
    #[error("matrix is not square: row {row} has {len} columns, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Node has no id in the matrix engine
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Statement text could not be tokenized
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for revision operations
pub type Result<T> = std::result::Result<T, RevisionError>;
