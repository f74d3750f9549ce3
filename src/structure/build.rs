//! Hypothesis Structurer: local annotation (phase 1) then upward propagation
//! (phase 2) (§4.C).

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{Graph, Item, Mh};

use super::record::MhRecord;

/// The annotated structure produced by [`build`]: one [`MhRecord`] per MH.
#[derive(Debug, Default, Clone)]
pub struct MhStructure {
    records: HashMap<Mh, MhRecord>,
    /// Every MH that appears as someone else's child — precomputed so root
    /// lookup in the GMap builder (§4.D) is O(1) instead of scanning all
    /// records per candidate.
    childful: HashSet<Mh>,
}

impl MhStructure {
    pub fn record(&self, mh: &Mh) -> &MhRecord {
        &self.records[mh]
    }

    pub fn get(&self, mh: &Mh) -> Option<&MhRecord> {
        self.records.get(mh)
    }

    pub fn mhs(&self) -> impl Iterator<Item = &Mh> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// An MH is a root iff it is not in `children(m)` for any other MH (§4.D).
    pub fn is_root(&self, mh: &Mh) -> bool {
        !self.childful.contains(mh)
    }
}

fn child_mhs(
    base: &Graph,
    target: &Graph,
    mh: Mh,
    by_base: &HashMap<Item, HashSet<Mh>>,
    by_target: &HashMap<Item, HashSet<Mh>>,
) -> HashSet<Mh> {
    if mh.is_emap() {
        return HashSet::new();
    }
    let (Item::Expr(bx), Item::Expr(tx)) = (mh.base, mh.target) else {
        return HashSet::new();
    };
    let b_args = base.args(bx);
    let t_args = target.args(tx);
    if b_args.len() != t_args.len() {
        return HashSet::new();
    }
    let mut out = HashSet::new();
    for (bi, ti) in b_args.iter().zip(t_args.iter()) {
        if let (Some(bs), Some(ts)) = (by_base.get(bi), by_target.get(ti)) {
            out.extend(bs.intersection(ts).copied());
        }
    }
    out
}

/// Phase 1 + phase 2: annotate every hypothesis, then propagate `emaps` and
/// `nogood` upward from children to parents.
pub fn build(base: &Graph, target: &Graph, hypotheses: &HashSet<Mh>) -> MhStructure {
    let span = tracing::info_span!("structure");
    let _enter = span.enter();

    let mut by_base: HashMap<Item, HashSet<Mh>> = HashMap::new();
    let mut by_target: HashMap<Item, HashSet<Mh>> = HashMap::new();
    for &mh in hypotheses {
        by_base.entry(mh.base).or_default().insert(mh);
        by_target.entry(mh.target).or_default().insert(mh);
    }

    let mut records: HashMap<Mh, MhRecord> = HashMap::with_capacity(hypotheses.len());
    let mut childful: HashSet<Mh> = HashSet::new();
    for &mh in hypotheses {
        let mut record = MhRecord::default();
        if mh.is_emap() {
            record.emaps.insert(mh);
        }
        let mut nogood = by_base.get(&mh.base).cloned().unwrap_or_default();
        nogood.extend(by_target.get(&mh.target).cloned().unwrap_or_default());
        nogood.remove(&mh);
        record.nogood = nogood;
        record.children = child_mhs(base, target, mh, &by_base, &by_target);
        childful.extend(record.children.iter().copied());
        records.insert(mh, record);
    }

    for &mh in hypotheses {
        propagate(mh, &mut records);
    }

    debug!(count = records.len(), "structurer annotated hypotheses");
    MhStructure { records, childful }
}

/// Post-order propagation. Memoized: once `emaps(m)` is non-empty, `m` is
/// treated as processed and the recursion returns immediately (§4.C). An
/// explicit stack is not needed here: match-hypothesis subtrees in practice
/// are shallow relative to the MH count, and recursion depth is bounded by
/// expression nesting depth in the source graphs (acyclic by construction).
fn propagate(mh: Mh, records: &mut HashMap<Mh, MhRecord>) {
    if !records[&mh].emaps.is_empty() {
        return;
    }
    let children: Vec<Mh> = records[&mh].children.iter().copied().collect();
    for &child in &children {
        propagate(child, records);
    }
    let mut emaps = HashSet::new();
    let mut nogood = records[&mh].nogood.clone();
    for child in &children {
        if let Some(rec) = records.get(child) {
            emaps.extend(rec.emaps.iter().copied());
            nogood.extend(rec.nogood.iter().copied());
        }
    }
    let record = records.get_mut(&mh).expect("record exists for every hypothesis");
    record.emaps = emaps;
    record.nogood = nogood;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphBuilder, PredicateKind};
    use crate::rules::{default_ruleset, engine::run};

    #[test]
    fn every_mh_is_root_or_descendant() {
        let mut bb = GraphBuilder::new();
        let heat = bb.add_entity(vec![]);
        let cold = bb.add_entity(vec![]);
        let greater = bb.declare_predicate("greater", 2, PredicateKind::Relation);
        let gt = bb
            .add_root_expression(greater, vec![Item::Entity(heat), Item::Entity(cold)])
            .unwrap();
        let base = bb.build();

        let mut tb = GraphBuilder::new();
        let fast = tb.add_entity(vec![]);
        let slow = tb.add_entity(vec![]);
        let greater_t = tb.declare_predicate("greater", 2, PredicateKind::Relation);
        let gt_t = tb
            .add_root_expression(greater_t, vec![Item::Entity(fast), Item::Entity(slow)])
            .unwrap();
        let target = tb.build();

        let hyps = run(&base, &target, &default_ruleset()).unwrap();
        let structure = build(&base, &target, &hyps);

        let root_mh = Mh::new(Item::Expr(gt), Item::Expr(gt_t)).unwrap();
        assert!(structure.is_root(&root_mh));
        for mh in structure.mhs() {
            assert!(structure.is_root(mh) || structure.record(&root_mh).children.contains(mh));
        }
        assert!(structure.record(&root_mh).is_consistent());
    }

    /// Build a graph with one `rel/width` root over `width` chains of `depth`
    /// nested unary `wrap` expressions atop a leaf entity.
    fn chain_graph(depth: u32, width: u32) -> crate::model::Graph {
        let mut b = GraphBuilder::new();
        let wrap = b.declare_predicate("wrap", 1, PredicateKind::Function);
        let rel = b.declare_predicate("rel", width as usize, PredicateKind::Relation);
        let mut top_args = Vec::with_capacity(width as usize);
        for _ in 0..width {
            let mut item = Item::Entity(b.add_entity(vec![]));
            for _ in 0..depth {
                let id = b.add_expression(wrap, vec![item]).unwrap();
                item = Item::Expr(id);
            }
            top_args.push(item);
        }
        b.add_root_expression(rel, top_args).unwrap();
        b.build()
    }

    /// `true` iff `mh` is `root` itself or reachable from `root` by following
    /// `children` transitively.
    fn is_descendant(root: Mh, mh: Mh, structure: &MhStructure) -> bool {
        let mut stack = vec![root];
        let mut seen = HashSet::new();
        while let Some(m) = stack.pop() {
            if m == mh {
                return true;
            }
            if seen.insert(m) {
                stack.extend(structure.record(&m).children.iter().copied());
            }
        }
        false
    }

    proptest::proptest! {
        /// §8 invariant 3: every MH is either a root or a descendant of some
        /// root, across a range of nesting depths and relation widths.
        #[test]
        fn every_mh_is_root_or_descendant_prop(depth in 1u32..4, width in 1u32..3) {
            let base = chain_graph(depth, width);
            let target = chain_graph(depth, width);
            let hyps = run(&base, &target, &default_ruleset()).unwrap();
            let structure = build(&base, &target, &hyps);
            let roots: Vec<Mh> = structure.mhs().copied().filter(|m| structure.is_root(m)).collect();

            for &mh in structure.mhs() {
                let covered = structure.is_root(&mh) || roots.iter().any(|&r| is_descendant(r, mh, &structure));
                proptest::prop_assert!(covered);
            }
        }
    }
}
