//! Rule engine: applies filter and intern rules to produce match hypotheses.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::error::{SmeError, SmeResult};
use crate::model::{Graph, Item, Mh};

use super::rule::RuleSet;

fn all_items(graph: &Graph) -> Vec<Item> {
    graph
        .entities()
        .map(Item::Entity)
        .chain(graph.expressions().map(Item::Expr))
        .collect()
}

/// Run the ruleset over `base` and `target`, producing the initial match
/// hypothesis set (§4.B).
///
/// Filters run over the full cartesian product of base and target items;
/// their non-null results seed a fixpoint worklist that the intern rules
/// drain until no new MHs appear. Termination is guaranteed because the MH
/// universe is bounded by `|expr(base)|×|expr(target)| + |ent(base)|×|ent(target)|`
/// and results accumulate in a `HashSet`.
pub fn run(base: &Graph, target: &Graph, ruleset: &RuleSet) -> SmeResult<HashSet<Mh>> {
    let span = tracing::info_span!("rules");
    let _enter = span.enter();

    let base_items = all_items(base);
    let target_items = all_items(target);

    let mut hypotheses: HashSet<Mh> = HashSet::new();
    for &b in &base_items {
        for &t in &target_items {
            for rule in &ruleset.filters {
                match rule.apply(base, b, target, t) {
                    Ok(Some(mh)) => {
                        hypotheses.insert(mh);
                    }
                    Ok(None) => {}
                    Err(detail) => {
                        return Err(SmeError::RuleFailure {
                            rule: rule.name.to_string(),
                            detail,
                        });
                    }
                }
            }
        }
    }
    debug!(count = hypotheses.len(), "filter rules produced initial hypotheses");

    let mut worklist: VecDeque<Mh> = hypotheses.iter().copied().collect();
    while let Some(mh) = worklist.pop_front() {
        for rule in &ruleset.interns {
            let derived = rule.apply(base, target, mh).map_err(|detail| SmeError::RuleFailure {
                rule: rule.name.to_string(),
                detail,
            })?;
            for d in derived {
                if hypotheses.insert(d) {
                    worklist.push_back(d);
                }
            }
        }
    }

    info!(count = hypotheses.len(), "rule engine reached fixpoint");
    Ok(hypotheses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PredicateKind;
    use crate::rules::default_ruleset;

    #[test]
    fn empty_base_yields_no_hypotheses() {
        let base = crate::model::GraphBuilder::new().build();
        let mut tb = crate::model::GraphBuilder::new();
        tb.declare_predicate("is-a", 2, PredicateKind::Relation);
        let target = tb.build();
        let hs = run(&base, &target, &default_ruleset()).unwrap();
        assert!(hs.is_empty());
    }

    #[test]
    fn disjoint_predicates_yield_no_hypotheses() {
        let mut bb = crate::model::GraphBuilder::new();
        let e1 = bb.add_entity(vec![]);
        let e2 = bb.add_entity(vec![]);
        let p = bb.declare_predicate("foo", 2, PredicateKind::Relation);
        bb.add_root_expression(p, vec![Item::Entity(e1), Item::Entity(e2)]).unwrap();
        let base = bb.build();

        let mut tb = crate::model::GraphBuilder::new();
        let e3 = tb.add_entity(vec![]);
        let e4 = tb.add_entity(vec![]);
        let q = tb.declare_predicate("bar", 2, PredicateKind::Relation);
        tb.add_root_expression(q, vec![Item::Entity(e3), Item::Entity(e4)]).unwrap();
        let target = tb.build();

        let hs = run(&base, &target, &default_ruleset()).unwrap();
        assert!(hs.is_empty());
    }
}
