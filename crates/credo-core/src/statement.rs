//! Credibility statements and the node identifiers they relate
//!
//! A statement `(source, target, reporter)` reads "reporter asserts that
//! source is less credible than target". Entities and reporters share one
//! identifier space, so a reporter can itself appear as the source or target
//! of other statements.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RevisionError};

/// Reporter assigned to statements written as bare `(source,target)` pairs.
pub const IMPLICIT_REPORTER: &str = "_";

/// Interned node identifier.
///
/// Cloning is a reference-count bump. Ordering and hashing follow the text,
/// so a `Node` can be looked up by `&str` in ordered and hashed collections.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Node(Arc<str>);

impl Node {
    /// Create a node, rejecting blank identifiers.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(RevisionError::EmptyNode);
        }
        Ok(Self(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Node {
    type Error = RevisionError;

    fn try_from(value: String) -> Result<Self> {
        Node::new(value)
    }
}

impl From<Node> for String {
    fn from(node: Node) -> Self {
        node.0.to_string()
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A credibility statement: `reporter` asserts `source < target`.
///
/// Equality is structural over the whole triple. Statements are the edges of
/// the knowledge-base multigraph; the same pair may be asserted by several
/// reporters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Less credible side
    pub source: Node,

    /// More credible side
    pub target: Node,

    /// Who asserts the comparison
    pub reporter: Node,
}

impl Statement {
    /// Build a statement from raw identifiers.
    pub fn new(
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        reporter: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            source: Node::new(source)?,
            target: Node::new(target)?,
            reporter: Node::new(reporter)?,
        })
    }

    /// Build a statement from already validated nodes.
    pub fn from_nodes(source: Node, target: Node, reporter: Node) -> Self {
        Self {
            source,
            target,
            reporter,
        }
    }

    /// True for `(a, a, _)`, which contradicts itself.
    pub fn is_reflexive(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.source, self.target, self.reporter)
    }
}

/// An aggregated, weighted comparison `source < target` for the matrix engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedStatement {
    pub source: Node,
    pub target: Node,
    /// Aggregate support, finite and strictly positive
    pub support: f64,
}

impl WeightedStatement {
    pub fn new(source: impl AsRef<str>, target: impl AsRef<str>, support: f64) -> Result<Self> {
        Ok(Self {
            source: Node::new(source)?,
            target: Node::new(target)?,
            support: validate_support(support)?,
        })
    }
}

impl fmt::Display for WeightedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} < {}, {:.2}]", self.source, self.target, self.support)
    }
}

pub(crate) fn validate_support(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RevisionError::InvalidSupport(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_nodes_rejected() {
        assert_eq!(Node::new(""), Err(RevisionError::EmptyNode));
        assert_eq!(Node::new("  \t"), Err(RevisionError::EmptyNode));
        assert!(Statement::new("A", " ", "R").is_err());
    }

    #[test]
    fn statement_equality_is_structural() {
        let a = Statement::new("A", "B", "R").unwrap();
        let b = Statement::new("A", "B", "R").unwrap();
        let c = Statement::new("A", "B", "Q").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_matches_input_syntax() {
        let s = Statement::new("A1", "A2", "F1").unwrap();
        assert_eq!(s.to_string(), "(A1,A2,F1)");
    }

    #[test]
    fn node_serde_as_plain_string() {
        let node = Node::new("F3").unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), r#""F3""#);

        let back: Node = serde_json::from_str(r#""F3""#).unwrap();
        assert_eq!(back, node);

        assert!(serde_json::from_str::<Node>(r#""""#).is_err());
    }

    #[test]
    fn weighted_support_must_be_positive() {
        assert!(WeightedStatement::new("a", "b", 0.5).is_ok());
        assert!(matches!(
            WeightedStatement::new("a", "b", 0.0),
            Err(RevisionError::InvalidSupport(_))
        ));
        assert!(WeightedStatement::new("a", "b", f64::NAN).is_err());
        assert!(WeightedStatement::new("a", "b", f64::INFINITY).is_err());
    }
}
