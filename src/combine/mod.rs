//! Combiner: enumerates every maximal internally consistent subset of GMaps
//! (§4.E). Merger: unions each such subset into one GMap (§4.F).

pub mod bron_kerbosch;
pub mod merge;

use std::collections::HashSet;

use tracing::debug;

use crate::gmap::GMap;

pub use bron_kerbosch::Cancel;
pub use merge::merge_subset;

/// A subset `S` of GMaps is internally consistent iff for every `g_a, g_b ∈ S`,
/// `mhs(g_a) ∩ nogood(g_b) = ∅` (symmetric by construction of `nogood`).
/// Enumerate every subset that is maximal by set inclusion.
pub fn maximal_consistent_subsets<'a>(gmaps: &'a [GMap], cancel: Cancel) -> Vec<Vec<&'a GMap>> {
    let span = tracing::info_span!("combine");
    let _enter = span.enter();

    if gmaps.is_empty() {
        return Vec::new();
    }

    let n = gmaps.len();
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if gmaps[i].mutually_consistent(&gmaps[j]) {
                adjacency[i].insert(j);
                adjacency[j].insert(i);
            }
        }
    }

    let cliques = bron_kerbosch::maximal_cliques(&adjacency, cancel);
    debug!(gmaps = n, subsets = cliques.len(), "combiner enumerated maximal subsets");
    cliques
        .into_iter()
        .map(|clique| clique.into_iter().map(|i| &gmaps[i]).collect())
        .collect()
}
