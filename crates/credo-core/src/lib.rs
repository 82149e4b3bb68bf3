//! Credo Core Engine
//!
//! Belief revision over credibility statements. A statement `(a, b, r)`
//! says "`a` is less credible than `b`", as reported by `r`. Reporters are
//! nodes of the same graph, so the statements also order the reporters
//! that made them.
//!
//! Two engines share the vocabulary:
//!
//! - [`KnowledgeBase`]: exact revision over a statement multigraph, ranking
//!   reporters by reachability (expansion, contraction, prioritized and
//!   non-prioritized revision, reliability, merge with cycle resolution)
//! - [`MatrixEngine`]: weighted revision over dense widest-path matrices
//!
//! # Example
//!
//! ```rust
//! use credo_core::{KnowledgeBase, Node, Statement};
//!
//! let mut kb = KnowledgeBase::from_text(
//!     "(B,F1,F2),(F1,F2,F3),(F2,F3,B),(A1,A2,F1),(A1,A3,F1),(A2,A4,B),(A2,A4,F3),(A3,A4,F2)",
//! )
//! .unwrap();
//!
//! let (a1, a4) = (Node::new("A1").unwrap(), Node::new("A4").unwrap());
//! assert_eq!(kb.all_simple_paths(&a1, &a4).len(), 3);
//!
//! // B is less credible than the reporters backing A1 < A4
//! assert!(!kb.non_prioritized_revision(Statement::new("A4", "A1", "B").unwrap()).unwrap());
//! // F3 outranks them
//! assert!(kb.non_prioritized_revision(Statement::new("A4", "A1", "F3").unwrap()).unwrap());
//! ```

pub mod error;
pub mod graph;
pub mod matrix;
pub mod parser;
pub mod shared;
pub mod statement;

// Re-export main types at crate root
pub use error::{Result, RevisionError};
pub use graph::{
    get_extremes, Accuracy, CredibilityOrder, ExportView, Extreme, KnowledgeBase, Path,
    TrackRecord,
};
pub use matrix::{closure, Matrix, MatrixConfig, MatrixEngine, Revision, RevisionSummary};
pub use parser::{parse_statements, parse_weighted, ParseError};
pub use shared::SharedKnowledgeBase;
pub use statement::{Node, Statement, WeightedStatement, IMPLICIT_REPORTER};
