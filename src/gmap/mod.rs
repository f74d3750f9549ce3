//! GMap: a maximal subtree-rooted collection of MHs (§3, §4.D).

pub mod builder;

use std::collections::HashSet;

use crate::infer::TransferredExpr;
use crate::model::{ExprId, Item, Mh};

pub use builder::build_gmaps;

/// A maximal subtree-rooted collection: a set of MHs plus structural metadata.
///
/// `score`, `emap_matches`, and `mapping` are populated by the Scorer (§4.G);
/// `inferences`/`transferred` are populated by the optional Inference Engine
/// (§4.H) and remain `None` until that stage runs, or when transfer aborts.
#[derive(Debug, Clone)]
pub struct GMap {
    pub roots: HashSet<Mh>,
    pub mhs: HashSet<Mh>,
    pub emaps: HashSet<Mh>,
    pub nogood: HashSet<Mh>,
    pub score: u64,
    pub emap_matches: u64,
    pub mapping: Vec<(Item, Item)>,
    pub inferences: Option<HashSet<ExprId>>,
    pub transferred: Option<Vec<(ExprId, TransferredExpr)>>,
}

impl GMap {
    pub(crate) fn new(roots: HashSet<Mh>, mhs: HashSet<Mh>, emaps: HashSet<Mh>, nogood: HashSet<Mh>) -> Self {
        Self {
            roots,
            mhs,
            emaps,
            nogood,
            score: 0,
            emap_matches: 0,
            mapping: Vec::new(),
            inferences: None,
            transferred: None,
        }
    }

    /// A GMap is consistent iff `emaps ∩ nogood = ∅` (§3).
    pub fn is_consistent(&self) -> bool {
        self.emaps.is_disjoint(&self.nogood)
    }

    /// Two GMaps are mutually consistent iff neither's MHs intersect the
    /// other's `nogood` (§3).
    pub fn mutually_consistent(&self, other: &GMap) -> bool {
        self.mhs.is_disjoint(&other.nogood) && other.mhs.is_disjoint(&self.nogood)
    }
}
