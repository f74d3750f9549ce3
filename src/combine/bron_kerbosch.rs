//! Maximal independent sets of the conflict graph, via Bron–Kerbosch with
//! pivoting over the complementary mutual-consistency graph (§4.E, §9
//! "Combiner complexity").
//!
//! The reference formulation enumerates all `2^n` subsets of GMaps and
//! filters for internal consistency; this is exponential in the number of
//! GMaps even though the useful output (maximal cliques) is typically far
//! smaller. Bron–Kerbosch enumerates exactly the maximal cliques without
//! visiting every subset, and still returns every maximal internally
//! consistent subset exactly once, preserving the §4.E contract.

use std::collections::HashSet;

/// Cooperative cancellation signal, checked periodically during the
/// recursion — the combiner is the pipeline's only super-linear stage (§5).
pub type Cancel<'a> = &'a dyn Fn() -> bool;

/// Enumerate every maximal clique of `adjacency` (an undirected graph given
/// as per-vertex neighbor sets over `0..adjacency.len()`).
pub fn maximal_cliques(adjacency: &[HashSet<usize>], cancel: Cancel) -> Vec<Vec<usize>> {
    if adjacency.is_empty() {
        return Vec::new();
    }
    let mut cliques = Vec::new();
    let all: HashSet<usize> = (0..adjacency.len()).collect();
    bron_kerbosch(HashSet::new(), all, HashSet::new(), adjacency, &mut cliques, cancel);
    cliques
}

fn bron_kerbosch(
    r: HashSet<usize>,
    mut p: HashSet<usize>,
    mut x: HashSet<usize>,
    adjacency: &[HashSet<usize>],
    out: &mut Vec<Vec<usize>>,
    cancel: Cancel,
) {
    if cancel() {
        return;
    }
    if p.is_empty() && x.is_empty() {
        let mut clique: Vec<usize> = r.into_iter().collect();
        clique.sort_unstable();
        out.push(clique);
        return;
    }

    // Pivot on the P∪X vertex with the most neighbors in P, so the loop only
    // recurses on P minus that pivot's neighborhood.
    let pivot = p
        .iter()
        .chain(x.iter())
        .max_by_key(|&&u| adjacency[u].intersection(&p).count())
        .copied();
    let candidates: Vec<usize> = match pivot {
        Some(u) => p.iter().copied().filter(|v| !adjacency[u].contains(v)).collect(),
        None => p.iter().copied().collect(),
    };

    for v in candidates {
        let mut r2 = r.clone();
        r2.insert(v);
        let p2: HashSet<usize> = p.intersection(&adjacency[v]).copied().collect();
        let x2: HashSet<usize> = x.intersection(&adjacency[v]).copied().collect();
        bron_kerbosch(r2, p2, x2, adjacency, out, cancel);
        p.remove(&v);
        x.insert(v);
    }
}
