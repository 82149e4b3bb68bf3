//! Revision operators over the statement graph.
//!
//! Every operator has a variant suffixed `_with` that ranks reporters by an
//! external [`CredibilityOrder`] instead of the knowledge base itself.

use std::collections::BTreeSet;

use tracing::debug;

use super::order::{get_extremes, CredibilityOrder, Extreme};
use super::KnowledgeBase;
use crate::error::Result;
use crate::statement::{Node, Statement};

impl KnowledgeBase {
    /// Add `statement` unless it would contradict the graph.
    ///
    /// Rejected when a path `target → source` already exists, or when the
    /// statement is reflexive. Re-inserting a present statement succeeds
    /// without changing anything.
    pub fn expansion(&mut self, statement: Statement) -> bool {
        if statement.is_reflexive() {
            debug!(%statement, "rejected reflexive statement");
            return false;
        }
        if self.path_exists(&statement.target, &statement.source) {
            debug!(%statement, "rejected contradicted statement");
            return false;
        }
        if self.insert(statement) {
            debug!(statements = self.statement_count(), "expanded");
        }
        true
    }

    /// Union over all simple paths `source → target` of each path's
    /// `extreme` statements.
    pub fn extremes_on_paths<O>(
        &self,
        source: &Node,
        target: &Node,
        extreme: Extreme,
        order: &O,
    ) -> BTreeSet<Statement>
    where
        O: CredibilityOrder + ?Sized,
    {
        self.all_simple_paths(source, target)
            .iter()
            .flat_map(|path| get_extremes(path, extreme, order))
            .collect()
    }

    /// Remove the least credible statements of every path `source → target`.
    ///
    /// Returns the number of statements removed. Afterwards no such path
    /// exists.
    pub fn contraction(&mut self, source: &Node, target: &Node) -> Result<usize> {
        let doomed = self.extremes_on_paths(source, target, Extreme::Min, &*self);
        self.contract(source, target, &doomed)
    }

    pub fn contraction_with<O>(&mut self, source: &Node, target: &Node, order: &O) -> Result<usize>
    where
        O: CredibilityOrder + ?Sized,
    {
        let doomed = self.extremes_on_paths(source, target, Extreme::Min, order);
        self.contract(source, target, &doomed)
    }

    /// Accept `statement` unconditionally: first contract the reverse
    /// claim, then expand.
    pub fn prioritized_revision(&mut self, statement: Statement) -> Result<bool> {
        self.contraction(&statement.target, &statement.source)?;
        Ok(self.expansion(statement))
    }

    pub fn prioritized_revision_with<O>(&mut self, statement: Statement, order: &O) -> Result<bool>
    where
        O: CredibilityOrder + ?Sized,
    {
        self.contraction_with(&statement.target, &statement.source, order)?;
        Ok(self.expansion(statement))
    }

    /// Reporters standing behind the claim `source → target`.
    ///
    /// These are the most credible reporters among the least credible
    /// statements of each supporting path. Empty when no path exists.
    pub fn reliability(&self, source: &Node, target: &Node) -> BTreeSet<Node> {
        self.reliability_with(source, target, self)
    }

    pub fn reliability_with<O>(&self, source: &Node, target: &Node, order: &O) -> BTreeSet<Node>
    where
        O: CredibilityOrder + ?Sized,
    {
        let weakest = self.extremes_on_paths(source, target, Extreme::Min, order);
        get_extremes(&weakest, Extreme::Max, order)
            .into_iter()
            .map(|s| s.reporter)
            .collect()
    }

    /// Accept `statement` only if its reporter outranks everyone backing the
    /// contradiction.
    ///
    /// Without a contradicting path this is a plain expansion. Otherwise the
    /// revision goes through only when every reporter in
    /// `reliability(target, source)` has a path to the new reporter; on
    /// refusal the knowledge base is unchanged.
    pub fn non_prioritized_revision(&mut self, statement: Statement) -> Result<bool> {
        if !self.path_exists(&statement.target, &statement.source) {
            return Ok(self.expansion(statement));
        }
        let backing = self.reliability(&statement.target, &statement.source);
        if self.outranks_all(&statement, &backing, &*self) {
            self.prioritized_revision(statement)
        } else {
            debug!(%statement, ?backing, "refused revision from less credible reporter");
            Ok(false)
        }
    }

    pub fn non_prioritized_revision_with<O>(&mut self, statement: Statement, order: &O) -> Result<bool>
    where
        O: CredibilityOrder + ?Sized,
    {
        if !self.path_exists(&statement.target, &statement.source) {
            return Ok(self.expansion(statement));
        }
        let backing = self.reliability_with(&statement.target, &statement.source, order);
        if self.outranks_all(&statement, &backing, order) {
            self.prioritized_revision_with(statement, order)
        } else {
            debug!(%statement, ?backing, "refused revision from less credible reporter");
            Ok(false)
        }
    }

    fn outranks_all<O>(&self, statement: &Statement, backing: &BTreeSet<Node>, order: &O) -> bool
    where
        O: CredibilityOrder + ?Sized,
    {
        backing
            .iter()
            .all(|reporter| order.is_less_credible(reporter, &statement.reporter))
    }

    fn contract(&mut self, source: &Node, target: &Node, doomed: &BTreeSet<Statement>) -> Result<usize> {
        let removed = self.remove_all(doomed)?;
        debug!(%source, %target, removed, "contracted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TrackRecord;
    use pretty_assertions::assert_eq;

    fn node(name: &str) -> Node {
        Node::new(name).unwrap()
    }

    fn st(s: &str, t: &str, r: &str) -> Statement {
        Statement::new(s, t, r).unwrap()
    }

    fn set(text: &str) -> BTreeSet<Statement> {
        crate::parser::parse_statements(text).unwrap().into_iter().collect()
    }

    fn example() -> KnowledgeBase {
        KnowledgeBase::from_text(
            "(B,F1,F2),(F1,F2,F3),(F2,F3,B),(A1,A2,F1),(A1,A3,F1),(A2,A4,B),(A2,A4,F3),(A3,A4,F2)",
        )
        .unwrap()
    }

    #[test]
    fn expansion_accepts_uncontradicted() {
        let mut kb = example();
        assert!(kb.expansion(st("A4", "F3", "B")));
        assert_eq!(kb.statement_count(), 9);
    }

    #[test]
    fn expansion_rejects_contradiction() {
        let mut kb = example();
        let before = kb.copy();
        assert!(!kb.expansion(st("A4", "A1", "F3")));
        assert_eq!(kb, before);
    }

    #[test]
    fn expansion_rejects_reflexive() {
        let mut kb = example();
        assert!(!kb.expansion(st("A1", "A1", "F3")));
        assert_eq!(kb.statement_count(), 8);
    }

    #[test]
    fn expansion_of_present_statement_is_noop() {
        let mut kb = example();
        assert!(kb.expansion(st("A1", "A2", "F1")));
        assert_eq!(kb.statement_count(), 8);
    }

    #[test]
    fn min_and_max_extremes_on_paths() {
        let kb = example();
        let (a1, a4) = (node("A1"), node("A4"));
        assert_eq!(
            kb.extremes_on_paths(&a1, &a4, Extreme::Min, &kb),
            set("(A1,A2,F1),(A1,A3,F1),(A2,A4,B)")
        );
        assert_eq!(
            kb.extremes_on_paths(&a1, &a4, Extreme::Max, &kb),
            set("(A1,A2,F1),(A2,A4,F3),(A3,A4,F2)")
        );
    }

    #[test]
    fn min_extremes_with_numeric_entities() {
        let kb = KnowledgeBase::from_text(
            "(4,5,A),(1,5,A),(2,5,A),(3,5,A),(4,5,A),(A,B,1),(A,C,5),(B,D,4),(C,D,3)",
        )
        .unwrap();
        assert_eq!(
            kb.extremes_on_paths(&node("A"), &node("D"), Extreme::Min, &kb),
            set("(A,B,1),(B,D,4),(C,D,3)")
        );
    }

    #[test]
    fn reliability_of_supported_claim() {
        let kb = example();
        assert_eq!(kb.reliability(&node("A1"), &node("A4")), BTreeSet::from([node("F1")]));
        assert!(kb.reliability(&node("A4"), &node("A1")).is_empty());
    }

    #[test]
    fn contraction_cuts_every_path() {
        let mut kb = example();
        let removed = kb.contraction(&node("A1"), &node("A4")).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(kb.statement_count(), 5);
        assert!(!kb.path_exists(&node("A1"), &node("A4")));
    }

    #[test]
    fn contraction_without_path_is_noop() {
        let mut kb = example();
        assert_eq!(kb.contraction(&node("A4"), &node("A1")).unwrap(), 0);
        assert_eq!(kb.statement_count(), 8);
    }

    #[test]
    fn prioritized_revision_reverses_claim() {
        let mut kb = example();
        assert!(kb.prioritized_revision(st("A4", "A1", "F3")).unwrap());
        assert!(kb.contains(&st("A4", "A1", "F3")));
        assert!(!kb.path_exists(&node("A1"), &node("A4")));
        assert_eq!(kb.all_simple_paths(&node("A2"), &node("A1")).len(), 1);
        assert_eq!(kb.statement_count(), 6);
    }

    #[test]
    fn prioritized_revision_without_contradiction_expands() {
        let mut kb = example();
        assert!(kb.prioritized_revision(st("A1", "A4", "F3")).unwrap());
        assert_eq!(kb.all_simple_paths(&node("A1"), &node("A4")).len(), 4);
        assert_eq!(kb.statement_count(), 9);
    }

    #[test]
    fn non_prioritized_revision_refuses_weaker_reporter() {
        let mut kb = example();
        let before = kb.copy();
        assert!(!kb.non_prioritized_revision(st("A4", "A1", "B")).unwrap());
        assert_eq!(kb, before);
    }

    #[test]
    fn non_prioritized_revision_accepts_stronger_reporter() {
        let mut kb = example();
        assert!(kb.non_prioritized_revision(st("A4", "A1", "F3")).unwrap());
        let result: BTreeSet<Statement> = kb.statements().cloned().collect();
        assert_eq!(
            result,
            set("(A2,A4,F3),(A3,A4,F2),(A4,A1,F3),(B,F1,F2),(F1,F2,F3),(F2,F3,B)")
        );
    }

    #[test]
    fn non_prioritized_revision_without_contradiction_expands() {
        let mut kb = example();
        assert!(kb.non_prioritized_revision(st("A4", "F3", "B")).unwrap());
        assert_eq!(kb.statement_count(), 9);
    }

    #[test]
    fn non_prioritized_revision_on_denser_graph() {
        let mut kb = KnowledgeBase::from_text(
            "(H,I,F),(H,L,D),(H,J,G),(I,L,G),(J,L,E),(J,L,F),(J,K,D),(J,K,E),(K,L,D),\
             (D,E,G),(D,F,E),(E,G,F),(F,G,D)",
        )
        .unwrap();
        assert!(kb.non_prioritized_revision(st("L", "H", "G")).unwrap());
        let result: BTreeSet<Statement> = kb.statements().cloned().collect();
        assert_eq!(
            result,
            set("(F,G,D),(J,K,E),(D,F,E),(E,G,F),(H,J,G),(I,L,G),(D,E,G),(L,H,G)")
        );
    }

    #[test]
    fn external_order_drives_contraction() {
        let mut record = TrackRecord::new();
        record.record_correct(&node("P"));
        record.record_incorrect(&node("Q"));

        let mut kb = KnowledgeBase::from_text("(a,b,P),(b,c,Q)").unwrap();
        assert_eq!(kb.contraction_with(&node("a"), &node("c"), &record).unwrap(), 1);
        assert!(kb.contains(&st("a", "b", "P")));
        assert!(!kb.contains(&st("b", "c", "Q")));
    }

    #[test]
    fn external_order_drives_non_prioritized_revision() {
        let mut record = TrackRecord::new();
        record.record_correct(&node("Q"));
        record.record_incorrect(&node("R"));

        let mut kb = KnowledgeBase::from_text("(a,b,P)").unwrap();
        assert_eq!(kb.reliability_with(&node("a"), &node("b"), &record), BTreeSet::from([node("P")]));
        assert!(!kb.non_prioritized_revision_with(st("b", "a", "R"), &record).unwrap());
        assert!(kb.non_prioritized_revision_with(st("b", "a", "Q"), &record).unwrap());
        assert!(kb.contains(&st("b", "a", "Q")));
        assert!(!kb.contains(&st("a", "b", "P")));
    }
}
