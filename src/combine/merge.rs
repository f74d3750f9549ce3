//! Merger: union each maximal consistent subset into a single GMap (§4.F).

use std::collections::HashSet;

use crate::gmap::GMap;

/// Merge a subset of mutually consistent GMaps into one. Roots, MHs, emaps,
/// and nogoods are all unioned across the subset — `mhs(merge(S)) = ⋃ mhs(g)`
/// (§3, §8 invariant 7).
pub fn merge_subset(subset: &[&GMap]) -> GMap {
    let mut roots = HashSet::new();
    let mut mhs = HashSet::new();
    let mut emaps = HashSet::new();
    let mut nogood = HashSet::new();
    for gmap in subset {
        roots.extend(gmap.roots.iter().copied());
        mhs.extend(gmap.mhs.iter().copied());
        emaps.extend(gmap.emaps.iter().copied());
        nogood.extend(gmap.nogood.iter().copied());
    }
    GMap::new(roots, mhs, emaps, nogood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, Item, Mh};
    use std::collections::HashSet as HS;

    fn entity_mh(b: usize, t: usize) -> Mh {
        Mh::new(Item::Entity(EntityId::from_index(b)), Item::Entity(EntityId::from_index(t))).unwrap()
    }

    #[test]
    fn merge_unions_mh_sets() {
        let m1 = entity_mh(0, 0);
        let m2 = entity_mh(1, 1);
        let g1 = GMap::new(HS::from([m1]), HS::from([m1]), HS::from([m1]), HS::new());
        let g2 = GMap::new(HS::from([m2]), HS::from([m2]), HS::from([m2]), HS::new());
        let merged = merge_subset(&[&g1, &g2]);
        assert_eq!(merged.mhs, HS::from([m1, m2]));
        assert_eq!(merged.roots, HS::from([m1, m2]));
    }
}
