//! Scorer: structural "trickle-down" SES plus entity-content match count
//! (§4.G).

use std::collections::HashSet;

use tracing::debug;

use crate::gmap::GMap;
use crate::model::{Graph, Item};
use crate::structure::MhStructure;

/// The one process-wide configurable datum from §5, threaded explicitly
/// rather than held as mutable global state.
#[derive(Debug, Clone, Default)]
pub struct ScoreConfig {
    pub unmatched_attributes: HashSet<String>,
}

/// Depth-weighted trickle-down recursion: `ses(m, d) = d` if `m` has no
/// children, else `d + Σ_c ses(c, d+1)`.
pub fn ses(mh: crate::model::Mh, depth: u64, structure: &MhStructure) -> u64 {
    let children = &structure.record(&mh).children;
    if children.is_empty() {
        depth
    } else {
        depth + children.iter().map(|&c| ses(c, depth + 1, structure)).sum::<u64>()
    }
}

/// `score(g) = |mhs(g)| + Σ_{r ∈ roots(g)} ses(r, 0)`.
pub fn score(gmap: &GMap, structure: &MhStructure) -> u64 {
    gmap.mhs.len() as u64 + gmap.roots.iter().map(|&r| ses(r, 0, structure)).sum::<u64>()
}

/// Number of emap MHs whose two entities are content-equal (§3, with
/// `unmatched_attributes` dropped before comparison).
pub fn emap_matches(gmap: &GMap, base: &Graph, target: &Graph, config: &ScoreConfig) -> u64 {
    gmap.emaps
        .iter()
        .filter(|mh| match (mh.base, mh.target) {
            (Item::Entity(b), Item::Entity(t)) => {
                base.entity(b).content_eq(target.entity(t), &config.unmatched_attributes)
            }
            _ => false,
        })
        .count() as u64
}

/// Score a GMap, returning a fresh copy with `score`, `emap_matches`, and
/// `mapping` populated — stage outputs are immutable, so this never mutates
/// `gmap` in place (§3 "Lifecycles").
pub fn score_gmap(gmap: &GMap, structure: &MhStructure, base: &Graph, target: &Graph, config: &ScoreConfig) -> GMap {
    let span = tracing::info_span!("score");
    let _enter = span.enter();

    let mut scored = gmap.clone();
    scored.score = score(gmap, structure);
    scored.emap_matches = emap_matches(gmap, base, target, config);
    scored.mapping = gmap.mhs.iter().map(|m| (m.base, m.target)).collect();
    debug!(score = scored.score, emap_matches = scored.emap_matches, "scored gmap");
    scored
}
