//! Path oracle: reachability, simple-path enumeration and the derived
//! credibility comparison.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::trace;

use super::{KnowledgeBase, Path};
use crate::statement::{Node, Statement};

impl KnowledgeBase {
    /// True when a directed path of length >= 1 leads from `from` to `to`.
    ///
    /// `path_exists(a, a)` holds only when `a` lies on a cycle.
    pub fn path_exists(&self, from: &Node, to: &Node) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<&Node> = self.successors(from).collect();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if visited.insert(node) {
                stack.extend(self.successors(node));
            }
        }
        false
    }

    /// Every node reachable from `from` by a path of length >= 1.
    pub fn reachable_from(&self, from: &Node) -> BTreeSet<Node> {
        let mut visited: BTreeSet<&Node> = BTreeSet::new();
        let mut stack: Vec<&Node> = self.successors(from).collect();
        while let Some(node) = stack.pop() {
            if visited.insert(node) {
                stack.extend(self.successors(node));
            }
        }
        visited.into_iter().cloned().collect()
    }

    /// Every simple path from `from` to `to`, one per choice of parallel
    /// statement at each hop.
    ///
    /// No vertex repeats within a path, so the result is finite even on a
    /// cyclic graph. Empty when `from == to` or when `to` is unreachable.
    pub fn all_simple_paths(&self, from: &Node, to: &Node) -> Vec<Path> {
        let mut paths = Vec::new();
        if from == to {
            return paths;
        }
        // One frame per vertex on the current path; `current[i]` is the
        // statement that entered the vertex of frame `i + 1`.
        let mut on_path = BTreeSet::from([from]);
        let mut current: Vec<&Statement> = Vec::new();
        let mut frames = vec![self.outgoing(from)];
        while let Some(frame) = frames.last_mut() {
            let Some(statement) = frame.next() else {
                frames.pop();
                if let Some(entered) = current.pop() {
                    on_path.remove(&entered.target);
                }
                continue;
            };
            if &statement.target == to {
                let mut path: Path = current.iter().map(|s| (*s).clone()).collect();
                path.push(statement.clone());
                paths.push(path);
            } else if on_path.insert(&statement.target) {
                current.push(statement);
                frames.push(self.outgoing(&statement.target));
            }
        }
        trace!(%from, %to, count = paths.len(), "enumerated simple paths");
        paths
    }

    /// Credibility comparison derived from reachability.
    ///
    /// `Less` when only `a → b` exists, `Greater` when only `b → a` exists,
    /// `Equal` when `a == b`, `None` (incomparable) when neither or both
    /// exist.
    pub fn compare(&self, a: &Node, b: &Node) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        match (self.path_exists(a, b), self.path_exists(b, a)) {
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            _ => None,
        }
    }

    fn successors<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Node> + 'a {
        self.outgoing(node).map(|s| &s.target)
    }
}
