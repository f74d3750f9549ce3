//! GMap Builder: finds roots, constructs initial GMaps, tests consistency
//! (§4.D).

use std::collections::HashSet;

use tracing::debug;

use crate::model::Mh;
use crate::structure::MhStructure;

use super::GMap;

/// An MH is a root iff it is not in `children(m)` for any other MH.
pub fn find_roots(structure: &MhStructure) -> HashSet<Mh> {
    structure.mhs().copied().filter(|mh| structure.is_root(mh)).collect()
}

/// For each root, emit a consistent GMap, or split into the root's children
/// as candidate roots when the root itself is inconsistent.
pub fn build_gmaps(structure: &MhStructure) -> Vec<GMap> {
    let span = tracing::info_span!("gmap_build");
    let _enter = span.enter();

    let mut out = Vec::new();
    for root in find_roots(structure) {
        collect_consistent(root, structure, &mut out);
    }
    debug!(count = out.len(), "gmap builder produced consistent GMaps");
    out
}

fn collect_consistent(mh: Mh, structure: &MhStructure, out: &mut Vec<GMap>) {
    let record = structure.record(&mh);
    if record.is_consistent() {
        out.push(make_gmap(mh, structure));
    } else {
        for &child in &record.children {
            collect_consistent(child, structure, out);
        }
    }
}

/// Expand the subtree rooted at `root` by following `children` until emap
/// MHs (leaves) are reached, and copy `{emaps, nogood}` from `root`'s record.
fn make_gmap(root: Mh, structure: &MhStructure) -> GMap {
    let mut mhs = HashSet::new();
    let mut stack = vec![root];
    while let Some(mh) = stack.pop() {
        if mhs.insert(mh) {
            for &child in &structure.record(&mh).children {
                stack.push(child);
            }
        }
    }
    let record = structure.record(&root);
    GMap::new(
        HashSet::from([root]),
        mhs,
        record.emaps.clone(),
        record.nogood.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, Item, PredicateKind};
    use crate::rules::{default_ruleset, engine::run};
    use crate::structure::build;

    #[test]
    fn consistent_root_yields_one_gmap() {
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
        let structure = build(&base, &target, &hyps);
        let gmaps = build_gmaps(&structure);

        assert_eq!(gmaps.len(), 1);
        assert!(gmaps[0].is_consistent());
        // root MH + 2 emap children
        assert_eq!(gmaps[0].mhs.len(), 3);
    }
}
