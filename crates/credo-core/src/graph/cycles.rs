//! Cycle enumeration and knowledge-base merge.

use std::collections::BTreeSet;

use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, trace};

use super::order::{get_extremes, Extreme};
use super::{KnowledgeBase, Path};
use crate::error::{Result, RevisionError};
use crate::statement::Node;

impl KnowledgeBase {
    /// Every elementary cycle, as closed statement walks.
    ///
    /// A vertex cycle with parallel statements on its hops yields one walk
    /// per combination of statements. Each walk starts at the smallest vertex
    /// of its cycle.
    pub fn find_cycles(&self) -> Result<Vec<Path>> {
        let mut cycles = Vec::new();
        for vertex_cycle in self.vertex_cycles() {
            cycles.extend(self.expand_hops(&vertex_cycle)?);
        }
        trace!(count = cycles.len(), "enumerated cycles");
        Ok(cycles)
    }

    /// Union `other` into this knowledge base, then break every cycle.
    ///
    /// Each cycle loses its least credible statements, judged by the reporter
    /// order of this knowledge base as it was before the merge. Returns the
    /// number of statements removed.
    pub fn merge(&mut self, other: &KnowledgeBase) -> Result<usize> {
        let before = self.copy();
        self.vertices.extend(other.vertices.iter().cloned());
        for statement in other.statements() {
            self.insert(statement.clone());
        }

        let mut removed = 0;
        for cycle in self.find_cycles()? {
            for statement in get_extremes(&cycle, Extreme::Min, &before) {
                if self.remove(&statement) {
                    removed += 1;
                }
            }
        }
        debug!(removed, statements = self.statement_count(), "merged");
        Ok(removed)
    }

    /// Closed vertex sequences `[v0, .., v0]`, each rooted at its smallest
    /// vertex.
    ///
    /// Roots are taken in ascending order. After a root is done, only the
    /// vertices above it stay in play, and the next root is the lowest vertex
    /// of a strongly connected component that still holds a cycle.
    fn vertex_cycles(&self) -> Vec<Vec<&Node>> {
        let mut cycles = Vec::new();
        let mut floor = None;
        while let Some((root, component)) = self.lowest_cyclic_component(floor) {
            self.close_cycles(root, &component, &mut cycles);
            floor = Some(root);
        }
        cycles
    }

    /// Among vertices strictly above `floor`, the strongly connected
    /// component with a cycle whose smallest vertex is lowest.
    fn lowest_cyclic_component<'a>(
        &'a self,
        floor: Option<&'a Node>,
    ) -> Option<(&'a Node, BTreeSet<&'a Node>)> {
        let in_play = |node: &Node| floor.map_or(true, |floor| node > floor);
        let mut graph: DiGraphMap<&Node, ()> = DiGraphMap::new();
        for statement in self.statements() {
            if in_play(&statement.source) && in_play(&statement.target) {
                graph.add_edge(&statement.source, &statement.target, ());
            }
        }
        let lowest = kosaraju_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || scc.iter().any(|&node| graph.contains_edge(node, node)))
            .filter_map(|scc| {
                let component: BTreeSet<&Node> = scc.into_iter().collect();
                component.first().copied().map(|root| (root, component))
            })
            .min_by(|a, b| a.0.cmp(b.0));
        lowest
    }

    /// Every elementary cycle through `root` that stays inside `component`.
    fn close_cycles<'a>(
        &'a self,
        root: &'a Node,
        component: &BTreeSet<&'a Node>,
        cycles: &mut Vec<Vec<&'a Node>>,
    ) {
        let next_hops = |node: &Node| -> std::collections::btree_set::IntoIter<&'a Node> {
            self.outgoing(node)
                .map(|s| &s.target)
                .filter(|target| component.contains(target))
                .collect::<BTreeSet<_>>()
                .into_iter()
        };
        // `walk[i]` is the vertex whose remaining hops sit in `frames[i]`.
        let mut walk = vec![root];
        let mut on_walk = BTreeSet::from([root]);
        let mut frames = vec![next_hops(root)];
        while let Some(frame) = frames.last_mut() {
            let Some(next) = frame.next() else {
                frames.pop();
                if let Some(left) = walk.pop() {
                    on_walk.remove(left);
                }
                continue;
            };
            if next == root {
                let mut cycle = walk.clone();
                cycle.push(root);
                cycles.push(cycle);
            } else if on_walk.insert(next) {
                walk.push(next);
                frames.push(next_hops(next));
            }
        }
    }

    /// Cartesian product of the parallel statements on each hop, last hop
    /// varying fastest.
    fn expand_hops(&self, cycle: &[&Node]) -> Result<Vec<Path>> {
        let mut hops = Vec::with_capacity(cycle.len().saturating_sub(1));
        for hop in cycle.windows(2) {
            let (from, to) = (hop[0], hop[1]);
            let parallel: Vec<_> = self.statements_between(from, to).collect();
            if parallel.is_empty() {
                return Err(RevisionError::BrokenCycle {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            hops.push(parallel);
        }
        if hops.is_empty() {
            return Ok(Vec::new());
        }

        let mut walks = Vec::new();
        let mut choice = vec![0; hops.len()];
        loop {
            walks.push(
                hops.iter()
                    .zip(&choice)
                    .map(|(parallel, &i)| parallel[i].clone())
                    .collect(),
            );
            let mut digit = hops.len();
            loop {
                if digit == 0 {
                    return Ok(walks);
                }
                digit -= 1;
                choice[digit] += 1;
                if choice[digit] < hops[digit].len() {
                    break;
                }
                choice[digit] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Statement;
    use pretty_assertions::assert_eq;

    fn example() -> KnowledgeBase {
        KnowledgeBase::from_text(
            "(B,F1,F2),(F1,F2,F3),(F2,F3,B),(A1,A2,F1),(A1,A3,F1),(A2,A4,B),(A2,A4,F3),(A3,A4,F2)",
        )
        .unwrap()
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        assert!(example().find_cycles().unwrap().is_empty());
        assert!(KnowledgeBase::new().find_cycles().unwrap().is_empty());
    }

    #[test]
    fn parallel_edges_multiply_cycles() {
        let kb = KnowledgeBase::from_text("(A,B,X),(A,B,Y),(B,C,Z),(B,C,W),(C,A,W)").unwrap();
        let cycles = kb.find_cycles().unwrap();
        assert_eq!(cycles.len(), 4);
        for cycle in &cycles {
            assert_eq!(cycle.len(), 3);
            assert_eq!(cycle[0].source.as_str(), "A");
            assert_eq!(cycle[2].target.as_str(), "A");
        }
        let distinct: BTreeSet<_> = cycles.into_iter().collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn each_cycle_reported_once() {
        let kb = KnowledgeBase::from_text("(a,b,x),(b,a,x),(b,c,x),(c,a,x)").unwrap();
        let cycles = kb.find_cycles().unwrap();
        let lengths: Vec<_> = cycles.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![2, 3]);
    }

    fn chain(length: usize) -> Vec<Statement> {
        (0..length)
            .map(|i| Statement::new(format!("n{i}"), format!("n{}", i + 1), "r").unwrap())
            .collect()
    }

    #[test]
    fn long_chain_has_no_cycles() {
        let kb = KnowledgeBase::from_statements(chain(50_000));
        assert!(kb.find_cycles().unwrap().is_empty());
    }

    #[test]
    fn long_ring_is_one_cycle() {
        let mut ring = chain(49_999);
        ring.push(Statement::new("n49999", "n0", "r").unwrap());
        let kb = KnowledgeBase::from_statements(ring);

        let cycles = kb.find_cycles().unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 50_000);
        assert_eq!(cycles[0][0].source.as_str(), "n0");
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let kb = KnowledgeBase::from_text("(a,a,x),(a,b,x),(b,c,x),(c,b,y)").unwrap();
        let cycles = kb.find_cycles().unwrap();
        let starts: Vec<_> = cycles.iter().map(|c| (c[0].source.as_str(), c.len())).collect();
        assert_eq!(starts, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn merge_breaks_new_cycles() {
        let mut kb = example();
        let other = KnowledgeBase::from_statements([Statement::new("A4", "A1", "F3").unwrap()]);

        let removed = kb.merge(&other).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(kb.statement_count(), 6);
        assert!(kb.find_cycles().unwrap().is_empty());

        let mut revised = example();
        assert!(revised
            .non_prioritized_revision(Statement::new("A4", "A1", "F3").unwrap())
            .unwrap());
        assert_eq!(kb, revised);
    }

    #[test]
    fn merge_of_consistent_bases_is_union() {
        let mut kb = KnowledgeBase::from_text("(a,b,x)").unwrap();
        let other = KnowledgeBase::from_text("(b,c,y)").unwrap();
        assert_eq!(kb.merge(&other).unwrap(), 0);
        assert_eq!(kb.statement_count(), 2);
        assert!(kb.contains_vertex(&Node::new("y").unwrap()));
    }
}
