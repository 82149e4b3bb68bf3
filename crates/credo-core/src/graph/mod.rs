//! Statement-graph knowledge base
//!
//! `KnowledgeBase` holds credibility statements as the edges of a directed
//! multigraph and revises them exactly, by reachability:
//!
//! - **Expansion**: add a statement unless the reverse claim is supported
//! - **Contraction**: remove the weakest statements on every supporting path
//! - **Prioritized revision**: contract the contradiction, then expand
//! - **Non-prioritized revision**: revise only when the new reporter outranks
//!   every reporter backing the contradiction
//! - **Merge**: union two knowledge bases and break every resulting cycle
//!
//! Reporters are nodes of the same graph, so "reporter P is more credible
//! than reporter Q" is itself answered by a path `Q → P`.
//!
//! # Example
//!
//! ```rust
//! use credo_core::{KnowledgeBase, Statement};
//!
//! let mut kb = KnowledgeBase::from_text("(A1,A2,F1),(A2,A4,B),(B,F1,F2)").unwrap();
//! assert!(!kb.expansion(Statement::new("A4", "A1", "F1").unwrap()));
//! assert!(kb.prioritized_revision(Statement::new("A4", "A1", "F1").unwrap()).unwrap());
//! ```

mod cycles;
mod order;
mod paths;
mod revision;

pub use order::{get_extremes, Accuracy, CredibilityOrder, Extreme, TrackRecord};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RevisionError};
use crate::parser::parse_statements;
use crate::statement::{Node, Statement};

/// An ordered, non-empty sequence of statements forming a directed walk.
pub type Path = Vec<Statement>;

/// Knowledge base of credibility statements.
///
/// Statements are stored once per triple in a per-source ordered set, so
/// iteration order is deterministic. The vertex set is every node that ever
/// appeared as a source, target or reporter; removing statements keeps
/// vertices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    vertices: BTreeSet<Node>,
    outgoing: BTreeMap<Node, BTreeSet<Statement>>,
}

/// Read-only snapshot of a knowledge base for rendering/export collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportView {
    pub vertices: Vec<Node>,
    pub statements: Vec<Statement>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge base from an initial statement set.
    ///
    /// The set is assumed consistent and inserted without checks.
    pub fn from_statements(statements: impl IntoIterator<Item = Statement>) -> Self {
        let mut kb = Self::new();
        for statement in statements {
            kb.insert(statement);
        }
        kb
    }

    /// Parse `(a,b,c)` / `(a,b)` text into a knowledge base.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::from_statements(parse_statements(text)?))
    }

    /// Deep, independent copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// All vertices, in order.
    pub fn vertices(&self) -> impl Iterator<Item = &Node> {
        self.vertices.iter()
    }

    /// All statements, ordered by source, then target, then reporter.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.outgoing.values().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn statement_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }

    /// True when no statement is held. Vertices outlive the statements
    /// that introduced them, so an empty base may still list vertices.
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.outgoing
            .get(&statement.source)
            .is_some_and(|set| set.contains(statement))
    }

    pub fn contains_vertex(&self, node: &Node) -> bool {
        self.vertices.contains(node)
    }

    /// Statements leaving `node`.
    pub fn outgoing<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Statement> + 'a {
        self.outgoing.get(node).into_iter().flatten()
    }

    /// Parallel statements `from → to`, one per reporter.
    pub fn statements_between<'a>(
        &'a self,
        from: &Node,
        to: &'a Node,
    ) -> impl Iterator<Item = &'a Statement> + 'a {
        self.outgoing(from).filter(move |s| &s.target == to)
    }

    /// Snapshot of vertices and statements.
    pub fn export(&self) -> ExportView {
        ExportView {
            vertices: self.vertices.iter().cloned().collect(),
            statements: self.statements().cloned().collect(),
        }
    }

    /// Insert without consistency checks. Returns false if already present.
    pub(crate) fn insert(&mut self, statement: Statement) -> bool {
        self.vertices.insert(statement.source.clone());
        self.vertices.insert(statement.target.clone());
        self.vertices.insert(statement.reporter.clone());
        self.outgoing
            .entry(statement.source.clone())
            .or_default()
            .insert(statement)
    }

    /// Remove a statement. Returns false if it was not present.
    pub(crate) fn remove(&mut self, statement: &Statement) -> bool {
        let Some(set) = self.outgoing.get_mut(&statement.source) else {
            return false;
        };
        let removed = set.remove(statement);
        if set.is_empty() {
            self.outgoing.remove(&statement.source);
        }
        removed
    }

    /// Remove every statement in `statements`, all of which must be present.
    pub(crate) fn remove_all<'s>(
        &mut self,
        statements: impl IntoIterator<Item = &'s Statement>,
    ) -> Result<usize> {
        let mut removed = 0;
        for statement in statements {
            if !self.remove(statement) {
                return Err(RevisionError::MissingStatement(statement.to_string()));
            }
            removed += 1;
        }
        Ok(removed)
    }
}

impl FromIterator<Statement> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::from_statements(iter)
    }
}
