//! MatrixEngine - weighted revision over dense strongest-path matrices

use std::cmp::Ordering;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{closure, Matrix};
use crate::error::{Result, RevisionError};
use crate::statement::{validate_support, Node, WeightedStatement};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Rows allocated up front; matrices grow on demand past this.
    pub initial_size: usize,
}

impl MatrixConfig {
    /// Upper bound on `initial_size`; larger requests are clamped.
    pub const MAX_INITIAL_SIZE: usize = 4096;
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self { initial_size: 10 }
    }
}

/// Outcome of a non-prioritized weighted revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// Nothing contradicted the statement
    Expanded,
    /// The contradicting claim was weaker and got contracted first
    Revised,
    /// The contradicting claim was at least as strong
    Skipped,
}

/// Counts of each outcome over a batch of revisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSummary {
    pub expanded: usize,
    pub revised: usize,
    pub skipped: usize,
}

impl RevisionSummary {
    fn record(&mut self, outcome: Revision) {
        match outcome {
            Revision::Expanded => self.expanded += 1,
            Revision::Revised => self.revised += 1,
            Revision::Skipped => self.skipped += 1,
        }
    }
}

/// Weighted revision engine over an adjacency matrix and its strongest-path
/// closure.
///
/// Both matrices are kept consistent after every operation:
/// `strongest_paths() == closure(adjacency())`. Nodes are interned to dense
/// row indices in insertion order.
#[derive(Debug, Clone)]
pub struct MatrixEngine {
    adjacency: Matrix,
    widest: Matrix,
    ids: AHashMap<Node, usize>,
    nodes: Vec<Node>,
}

impl Default for MatrixEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixEngine {
    pub fn new() -> Self {
        Self::with_config(MatrixConfig::default())
    }

    pub fn with_config(config: MatrixConfig) -> Self {
        let size = config.initial_size.min(MatrixConfig::MAX_INITIAL_SIZE);
        Self {
            adjacency: Matrix::zeros(size),
            widest: Matrix::zeros(size),
            ids: AHashMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Engine over an existing adjacency matrix; row `i` is named `"i"`.
    pub fn from_adjacency(adjacency: Matrix) -> Result<Self> {
        let mut ids = AHashMap::with_capacity(adjacency.size());
        let mut nodes = Vec::with_capacity(adjacency.size());
        for index in 0..adjacency.size() {
            let node = Node::new(index.to_string())?;
            ids.insert(node.clone(), index);
            nodes.push(node);
        }
        let widest = closure(&adjacency);
        Ok(Self {
            adjacency,
            widest,
            ids,
            nodes,
        })
    }

    pub fn adjacency(&self) -> &Matrix {
        &self.adjacency
    }

    pub fn strongest_paths(&self) -> &Matrix {
        &self.widest
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Interned nodes, in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn id_of(&self, node: &Node) -> Option<usize> {
        self.ids.get(node).copied()
    }

    /// Dense id for `node`, assigning the next one (and growing both
    /// matrices) on first sight.
    pub fn intern(&mut self, node: &Node) -> usize {
        if let Some(&id) = self.ids.get(node) {
            return id;
        }
        let id = self.nodes.len();
        if id >= self.adjacency.size() {
            let size = (self.adjacency.size() * 2).max(id + 1);
            trace!(from = self.adjacency.size(), to = size, "growing matrices");
            self.adjacency.grow(size);
            self.widest.grow(size);
        }
        self.ids.insert(node.clone(), id);
        self.nodes.push(node.clone());
        id
    }

    /// Add `value` support for "`i` is less credible than `j`".
    ///
    /// Returns `false` without touching either matrix when any support for
    /// `j → i` exists, or when `i == j`. Supports for the same pair
    /// accumulate.
    pub fn expand(&mut self, i: usize, j: usize, value: f64) -> Result<bool> {
        let value = validate_support(value)?;
        self.check(i)?;
        self.check(j)?;
        if i == j {
            debug!(i, "rejected reflexive expansion");
            return Ok(false);
        }
        if self.widest[(j, i)] > 0.0 {
            debug!(i, j, against = self.widest[(j, i)], "rejected contradicted expansion");
            return Ok(false);
        }

        self.adjacency[(i, j)] += value;
        let edge = self.adjacency[(i, j)];

        // Column i and row j are untouched by the patch while (j, i) is zero,
        // so patching in place reads only settled values.
        let n = self.node_count();
        for p in 0..n {
            let left = if p == i { f64::INFINITY } else { self.widest[(p, i)] };
            if left <= 0.0 {
                continue;
            }
            for q in 0..n {
                let right = if q == j { f64::INFINITY } else { self.widest[(j, q)] };
                let candidate = left.min(edge).min(right);
                if candidate > self.widest[(p, q)] {
                    self.widest[(p, q)] = candidate;
                }
            }
        }
        debug!(i, j, value, total = edge, "expanded");
        Ok(true)
    }

    /// Remove support for "`i` is less credible than `j`".
    ///
    /// Zeroes every adjacency entry between `i` and `j` that is no stronger
    /// than the current `i → j` support, then recomputes the closure.
    /// Returns the number of entries zeroed.
    pub fn contract(&mut self, i: usize, j: usize) -> Result<usize> {
        self.check(i)?;
        self.check(j)?;
        let support = self.widest[(i, j)];
        if support <= 0.0 {
            return Ok(0);
        }

        let n = self.node_count();
        let mut zeroed = 0;
        for p in 0..n {
            for q in 0..n {
                let weight = self.adjacency[(p, q)];
                if weight <= 0.0 || weight > support {
                    continue;
                }
                let after_i = p == i || self.widest[(i, p)] >= weight;
                let before_j = q == j || self.widest[(q, j)] >= weight;
                if after_i && before_j {
                    self.adjacency[(p, q)] = 0.0;
                    zeroed += 1;
                }
            }
        }
        self.widest = closure(&self.adjacency);
        debug!(i, j, support, zeroed, "contracted");
        Ok(zeroed)
    }

    /// Apply one weighted statement under the non-prioritized policy.
    ///
    /// Expands when uncontradicted. When the opposite claim has support, the
    /// statement wins only if its own support is strictly greater: the
    /// opposite claim is contracted and the statement expanded.
    pub fn revise(&mut self, statement: &WeightedStatement) -> Result<Revision> {
        let i = self.intern(&statement.source);
        let j = self.intern(&statement.target);
        let against = self.widest[(j, i)];

        let outcome = if against <= 0.0 {
            if self.expand(i, j, statement.support)? {
                Revision::Expanded
            } else {
                Revision::Skipped
            }
        } else if statement.support > against {
            self.contract(j, i)?;
            if self.expand(i, j, statement.support)? {
                Revision::Revised
            } else {
                Revision::Skipped
            }
        } else {
            Revision::Skipped
        };
        debug!(%statement, against, ?outcome, "revised");
        Ok(outcome)
    }

    /// Revise with every statement, strongest support first.
    pub fn revise_all(
        &mut self,
        statements: impl IntoIterator<Item = WeightedStatement>,
    ) -> Result<RevisionSummary> {
        let mut ordered: Vec<_> = statements.into_iter().collect();
        ordered.sort_by(|a, b| b.support.total_cmp(&a.support));

        let mut summary = RevisionSummary::default();
        for statement in &ordered {
            summary.record(self.revise(statement)?);
        }
        Ok(summary)
    }

    /// Strongest-path support for "`x` is less credible than `y`".
    pub fn strongest(&self, x: &Node, y: &Node) -> Result<f64> {
        Ok(self.widest[(self.lookup(x)?, self.lookup(y)?)])
    }

    /// Compare two nodes by opposing strongest-path support.
    ///
    /// `Less` when `x` is less credible than `y`. `None` when neither
    /// direction has any support.
    pub fn compare(&self, x: &Node, y: &Node) -> Result<Option<Ordering>> {
        let (i, j) = (self.lookup(x)?, self.lookup(y)?);
        Ok(self.compare_ids(i, j))
    }

    /// Every node with the number of nodes it beats, weakest first.
    pub fn ranking(&self) -> Vec<(Node, usize)> {
        let n = self.node_count();
        let mut ranked: Vec<(Node, usize)> = (0..n)
            .map(|x| {
                let wins = (0..n)
                    .filter(|&y| self.compare_ids(x, y) == Some(Ordering::Greater))
                    .count();
                (self.nodes[x].clone(), wins)
            })
            .collect();
        ranked.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    fn compare_ids(&self, i: usize, j: usize) -> Option<Ordering> {
        if i == j {
            return Some(Ordering::Equal);
        }
        let (up, down) = (self.widest[(i, j)], self.widest[(j, i)]);
        if up <= 0.0 && down <= 0.0 {
            return None;
        }
        down.partial_cmp(&up)
    }

    fn lookup(&self, node: &Node) -> Result<usize> {
        self.id_of(node)
            .ok_or_else(|| RevisionError::UnknownNode(node.to_string()))
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.node_count() {
            Ok(())
        } else {
            Err(RevisionError::IndexOutOfRange {
                index,
                size: self.node_count(),
            })
        }
    }
}
