//! Per-MH structural record: `emaps`, `nogood`, `children` (§3, §4.C).

use std::collections::HashSet;

use crate::model::Mh;

#[derive(Debug, Clone, Default)]
pub struct MhRecord {
    pub emaps: HashSet<Mh>,
    pub nogood: HashSet<Mh>,
    pub children: HashSet<Mh>,
}

impl MhRecord {
    /// A record is consistent iff `emaps ∩ nogood = ∅` (§3).
    pub fn is_consistent(&self) -> bool {
        self.emaps.is_disjoint(&self.nogood)
    }
}
