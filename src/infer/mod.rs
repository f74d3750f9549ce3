//! Inference Engine (optional): extracts unmatched base structure reachable
//! from a GMap's alignment and transfers it onto the target (§4.H).

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::gmap::GMap;
use crate::model::{ExprId, Graph, Item};

/// A transferred expression: either an item already present in `pairs`, or a
/// freshly synthesized node built from a transferred functor and args. This
/// is a standalone tree, not an arena index — the target graph is immutable,
/// so a successful transfer cannot allocate new expressions into it.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferredExpr {
    Existing(Item),
    New(crate::model::PredicateId, Vec<TransferredExpr>),
}

/// `unmatched = expressions(base) \ {base(m) | m ∈ mhs(g)}` (§4.H step 1).
pub fn unmatched_base(gmap: &GMap, base: &Graph) -> HashSet<ExprId> {
    let matched_bases: HashSet<ExprId> = gmap
        .mhs
        .iter()
        .filter_map(|m| match m.base {
            Item::Expr(x) => Some(x),
            Item::Entity(_) => None,
        })
        .collect();
    base.expressions().filter(|e| !matched_bases.contains(e)).collect()
}

/// `ancestors = { e ∈ unmatched | e is an ancestor of some matched base expression }`
/// (§4.H step 2). "Matched" here is read over matched base *items*: the
/// worked example in §8.6 infers `greater(heat, cold)` when only its entity
/// arguments (`heat`, `cold`), not the relation itself, are matched.
pub fn ancestors_of_unmatched(gmap: &GMap, base: &Graph) -> HashSet<ExprId> {
    let unmatched = unmatched_base(gmap, base);
    let matched_items: HashSet<Item> = gmap.mhs.iter().map(|m| m.base).collect();
    unmatched
        .into_iter()
        .filter(|&e| matched_items.iter().any(|&item| base.is_ancestor(Item::Expr(e), item)))
        .collect()
}

/// `inferences(g) = descendants(ancestors) \ matched_bases` (§4.H step 3),
/// read reflexively: each ancestor expression is itself part of what gets
/// transferred, alongside its unmatched expression descendants.
pub fn inferences(gmap: &GMap, base: &Graph) -> HashSet<ExprId> {
    let matched_bases: HashSet<ExprId> = gmap
        .mhs
        .iter()
        .filter_map(|m| match m.base {
            Item::Expr(x) => Some(x),
            Item::Entity(_) => None,
        })
        .collect();

    let mut result = HashSet::new();
    for ancestor in ancestors_of_unmatched(gmap, base) {
        result.insert(ancestor);
        for descendant in base.descendants(Item::Expr(ancestor)) {
            if let Item::Expr(x) = descendant {
                result.insert(x);
            }
        }
    }
    result.retain(|x| !matched_bases.contains(x));
    result
}

/// Recursively rewrite `item` through `pairs`; `Err(())` signals an attempt
/// to synthesize an entity, which aborts transfer for the whole GMap — no
/// skolem-entity construction (§4.H, non-goal carried from §1).
fn transfer_item(item: Item, pairs: &HashMap<Item, Item>, base: &Graph) -> Result<TransferredExpr, ()> {
    if let Some(&mapped) = pairs.get(&item) {
        return Ok(TransferredExpr::Existing(mapped));
    }
    match item {
        Item::Entity(_) => Err(()),
        Item::Expr(x) => {
            let functor = base.functor(x);
            let args = base
                .args(x)
                .iter()
                .map(|&arg| transfer_item(arg, pairs, base))
                .collect::<Result<Vec<_>, ()>>()?;
            Ok(TransferredExpr::New(functor, args))
        }
    }
}

/// Run the inference engine on one GMap, returning a fresh copy with
/// `inferences` always set and `transferred` set only on success.
pub fn infer_gmap(gmap: &GMap, base: &Graph) -> GMap {
    let span = tracing::info_span!("infer");
    let _enter = span.enter();

    let mut out = gmap.clone();
    let infer_set = inferences(gmap, base);
    out.inferences = Some(infer_set.clone());

    let pairs: HashMap<Item, Item> = gmap.mhs.iter().map(|m| (m.base, m.target)).collect();
    let mut transferred = Vec::with_capacity(infer_set.len());
    for x in infer_set {
        match transfer_item(Item::Expr(x), &pairs, base) {
            Ok(t) => transferred.push((x, t)),
            Err(()) => {
                debug!(expr = %x, "inference transfer aborted: cannot synthesize entity");
                return out;
            }
        }
    }
    out.transferred = Some(transferred);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, Mh, PredicateKind};
    use crate::rules::{default_ruleset, engine::run};
    use crate::structure::build as build_structure;
    use std::collections::HashSet as HS;

    /// Base: `greater(heat, cold)`, with only the entities matched in the
    /// target (the relation itself is unmatched) — the §8.6 worked example.
    fn heat_cold_base_with_entity_mapping() -> (Graph, GMap) {
        let mut bb = GraphBuilder::new();
        let heat = bb.add_entity(vec![]);
        let cold = bb.add_entity(vec![]);
        let greater = bb.declare_predicate("greater", 2, PredicateKind::Relation);
        bb.add_root_expression(greater, vec![Item::Entity(heat), Item::Entity(cold)])
            .unwrap();
        let base = bb.build();

        let mut tb = GraphBuilder::new();
        let fast = tb.add_entity(vec![]);
        let slow = tb.add_entity(vec![]);
        let _target = tb.build();

        let m_heat = Mh::new(Item::Entity(heat), Item::Entity(fast)).unwrap();
        let m_cold = Mh::new(Item::Entity(cold), Item::Entity(slow)).unwrap();
        let gmap = GMap::new(
            HS::from([m_heat, m_cold]),
            HS::from([m_heat, m_cold]),
            HS::from([m_heat, m_cold]),
            HS::new(),
        );
        (base, gmap)
    }

    #[test]
    fn transfers_unmatched_relation_over_matched_entities() {
        let (base, gmap) = heat_cold_base_with_entity_mapping();
        let result = infer_gmap(&gmap, &base);
        assert!(result.transferred.is_some());
        let transferred = result.transferred.unwrap();
        assert_eq!(transferred.len(), 1);
        let (_, t) = &transferred[0];
        match t {
            TransferredExpr::New(_, args) => {
                assert_eq!(args.len(), 2);
                for a in args {
                    assert!(matches!(a, TransferredExpr::Existing(Item::Entity(_))));
                }
            }
            _ => panic!("expected a newly synthesized expression"),
        }
    }

    #[test]
    fn aborts_when_an_entity_is_unmatched() {
        let mut bb = GraphBuilder::new();
        let heat = bb.add_entity(vec![]);
        let cold = bb.add_entity(vec![]);
        let greater = bb.declare_predicate("greater", 2, PredicateKind::Relation);
        bb.add_root_expression(greater, vec![Item::Entity(heat), Item::Entity(cold)])
            .unwrap();
        let base = bb.build();

        // Only `heat` is matched; `cold` has no pair, so transfer must abort.
        let mut tb = GraphBuilder::new();
        let fast = tb.add_entity(vec![]);
        let _target = tb.build();

        let m_heat = Mh::new(Item::Entity(heat), Item::Entity(fast)).unwrap();
        let gmap = GMap::new(HS::from([m_heat]), HS::from([m_heat]), HS::from([m_heat]), HS::new());

        let result = infer_gmap(&gmap, &base);
        assert!(result.transferred.is_none());
        assert!(result.inferences.is_some());
    }

    #[test]
    fn round_trip_structure_sanity() {
        // Sanity check that build_structure + infer compose without panicking
        // on a graph with no unmatched structure at all.
        let mut bb = GraphBuilder::new();
        let heat = bb.add_entity(vec![]);
        let cold = bb.add_entity(vec![]);
        let greater = bb.declare_predicate("greater", 2, PredicateKind::Relation);
        bb.add_root_expression(greater, vec![Item::Entity(heat), Item::Entity(cold)])
            .unwrap();
        let base = bb.build();
        let mut tb = GraphBuilder::new();
        let fast = tb.add_entity(vec![]);
        let slow = tb.add_entity(vec![]);
        let greater_t = tb.declare_predicate("greater", 2, PredicateKind::Relation);
        tb.add_root_expression(greater_t, vec![Item::Entity(fast), Item::Entity(slow)])
            .unwrap();
        let target = tb.build();
        let hyps = run(&base, &target, &default_ruleset()).unwrap();
        let structure = build_structure(&base, &target, &hyps);
        let gmaps = crate::gmap::build_gmaps(&structure);
        let result = infer_gmap(&gmaps[0], &base);
        assert!(result.inferences.unwrap().is_empty());
    }
}
