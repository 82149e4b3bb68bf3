//! Reporter credibility orders and extreme-statement selection.
//!
//! A [`CredibilityOrder`] answers one question: is reporter `lower` strictly
//! less credible than reporter `higher`? The knowledge base itself is the
//! default order (a path `lower → higher`); [`TrackRecord`] orders reporters
//! by how often their past reports turned out correct.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::KnowledgeBase;
use crate::statement::{Node, Statement};

/// Which end of the reporter order to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extreme {
    Min,
    Max,
}

/// Partial order over reporters.
pub trait CredibilityOrder {
    /// True when `lower` is less credible than `higher`.
    fn is_less_credible(&self, lower: &Node, higher: &Node) -> bool;
}

impl CredibilityOrder for KnowledgeBase {
    fn is_less_credible(&self, lower: &Node, higher: &Node) -> bool {
        self.path_exists(lower, higher)
    }
}

/// Statements whose reporter is not strictly beaten in the `extreme`
/// direction by another reporter in the same collection.
///
/// For `Min`, a statement is dropped when some other reporter in the
/// collection is strictly less credible than its reporter; `Max` is the
/// mirror. Mutually comparable reporters (both directions hold) beat no one,
/// so a non-empty collection always yields a non-empty result.
pub fn get_extremes<'s, O>(
    statements: impl IntoIterator<Item = &'s Statement>,
    extreme: Extreme,
    order: &O,
) -> BTreeSet<Statement>
where
    O: CredibilityOrder + ?Sized,
{
    let candidates: BTreeSet<&Statement> = statements.into_iter().collect();
    let reporters: BTreeSet<&Node> = candidates.iter().map(|s| &s.reporter).collect();

    let beaten: BTreeSet<&Node> = reporters
        .iter()
        .copied()
        .filter(|reporter| {
            reporters
                .iter()
                .any(|other| other != reporter && beats(order, extreme, other, reporter))
        })
        .collect();

    trace!(?extreme, reporters = reporters.len(), beaten = beaten.len(), "selected extremes");

    candidates
        .into_iter()
        .filter(|s| !beaten.contains(&s.reporter))
        .cloned()
        .collect()
}

fn beats<O>(order: &O, extreme: Extreme, challenger: &Node, reporter: &Node) -> bool
where
    O: CredibilityOrder + ?Sized,
{
    let (lower, higher) = match extreme {
        Extreme::Min => (challenger, reporter),
        Extreme::Max => (reporter, challenger),
    };
    order.is_less_credible(lower, higher) && !order.is_less_credible(higher, lower)
}

/// Correct and incorrect report counts for one reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accuracy {
    pub correct: u32,
    pub incorrect: u32,
}

impl Accuracy {
    /// Correct minus incorrect.
    pub fn balance(&self) -> i64 {
        i64::from(self.correct) - i64::from(self.incorrect)
    }
}

/// Reporter order by past accuracy.
///
/// Reporters never seen have a balance of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    records: BTreeMap<Node, Accuracy>,
}

impl TrackRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_correct(&mut self, reporter: &Node) {
        self.records.entry(reporter.clone()).or_default().correct += 1;
    }

    pub fn record_incorrect(&mut self, reporter: &Node) {
        self.records.entry(reporter.clone()).or_default().incorrect += 1;
    }

    pub fn accuracy(&self, reporter: &Node) -> Accuracy {
        self.records.get(reporter).copied().unwrap_or_default()
    }

    /// Reporters with at least one recorded outcome, most accurate first.
    pub fn ranking(&self) -> Vec<(Node, Accuracy)> {
        let mut ranked: Vec<_> = self
            .records
            .iter()
            .map(|(node, accuracy)| (node.clone(), *accuracy))
            .collect();
        ranked.sort_by(|a, b| b.1.balance().cmp(&a.1.balance()).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

impl CredibilityOrder for TrackRecord {
    fn is_less_credible(&self, lower: &Node, higher: &Node) -> bool {
        self.accuracy(lower).balance() < self.accuracy(higher).balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(name: &str) -> Node {
        Node::new(name).unwrap()
    }

    fn statements(text: &str) -> Vec<Statement> {
        crate::parser::parse_statements(text).unwrap()
    }

    #[test]
    fn extremes_over_reporter_chain() {
        let order = KnowledgeBase::from_text("(A,D,Y),(B,D,Y),(E,A,Y),(E,B,Y),(E,C,Y)").unwrap();
        let collection = statements("(1,2,A),(3,4,B),(5,6,C),(7,8,D),(9,0,E)");

        let max = get_extremes(&collection, Extreme::Max, &order);
        assert_eq!(max, statements("(5,6,C),(7,8,D)").into_iter().collect());

        let min = get_extremes(&collection, Extreme::Min, &order);
        assert_eq!(min, statements("(9,0,E)").into_iter().collect());
    }

    #[test]
    fn incomparable_reporters_are_all_extreme() {
        let order = KnowledgeBase::new();
        let collection = statements("(a,b,X),(b,c,Y)");
        assert_eq!(get_extremes(&collection, Extreme::Min, &order).len(), 2);
        assert_eq!(get_extremes(&collection, Extreme::Max, &order).len(), 2);
    }

    #[test]
    fn mutually_reachable_reporters_are_kept() {
        let order = KnowledgeBase::from_text("(X,Y,r),(Y,X,r)").unwrap();
        let collection = statements("(a,b,X),(b,c,Y)");
        assert_eq!(get_extremes(&collection, Extreme::Min, &order).len(), 2);
    }

    #[test]
    fn empty_collection_has_no_extremes() {
        let order = KnowledgeBase::new();
        let nothing: Vec<Statement> = Vec::new();
        assert!(get_extremes(&nothing, Extreme::Min, &order).is_empty());
    }

    #[test]
    fn statements_of_one_reporter_share_fate() {
        let order = KnowledgeBase::from_text("(P,Q,z)").unwrap();
        let collection = statements("(a,b,P),(b,c,P),(c,d,Q)");
        let min = get_extremes(&collection, Extreme::Min, &order);
        assert_eq!(min, statements("(a,b,P),(b,c,P)").into_iter().collect());
    }

    #[test]
    fn track_record_orders_by_balance() {
        let mut record = TrackRecord::new();
        let (alice, bob, carol) = (node("alice"), node("bob"), node("carol"));
        record.record_correct(&alice);
        record.record_correct(&alice);
        record.record_incorrect(&bob);

        assert!(record.is_less_credible(&bob, &alice));
        assert!(record.is_less_credible(&bob, &carol));
        assert!(record.is_less_credible(&carol, &alice));
        assert!(!record.is_less_credible(&alice, &alice));
        assert_eq!(record.accuracy(&carol), Accuracy::default());
        assert_eq!(record.accuracy(&alice).balance(), 2);

        let ranked: Vec<_> = record.ranking().into_iter().map(|(n, _)| n).collect();
        assert_eq!(ranked, vec![alice, bob]);
    }

    #[test]
    fn track_record_selects_extremes() {
        let mut record = TrackRecord::new();
        record.record_correct(&node("P"));
        record.record_incorrect(&node("Q"));
        let collection = statements("(a,b,P),(b,c,Q)");

        let min = get_extremes(&collection, Extreme::Min, &record);
        assert_eq!(min, statements("(b,c,Q)").into_iter().collect());
        let max = get_extremes(&collection, Extreme::Max, &record);
        assert_eq!(max, statements("(a,b,P)").into_iter().collect());
    }
}
