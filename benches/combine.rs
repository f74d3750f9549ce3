//! Benchmark of the combiner's worst-case path: a conflict graph where every
//! GMap conflicts with every other but one, forcing Bron–Kerbosch to walk a
//! wide pivot set (§9 "Combiner complexity").

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashSet;

use sme_engine::combine::bron_kerbosch::maximal_cliques;

fn ring_adjacency(n: usize) -> Vec<HashSet<usize>> {
    let mut adj = vec![HashSet::new(); n];
    for i in 0..n {
        let j = (i + 1) % n;
        adj[i].insert(j);
        adj[j].insert(i);
    }
    adj
}

fn bench_ring(c: &mut Criterion) {
    let adj = ring_adjacency(64);
    c.bench_function("maximal_cliques_ring_64", |bench| {
        bench.iter(|| black_box(maximal_cliques(&adj, &|| false)))
    });
}

fn bench_complete(c: &mut Criterion) {
    let n = 32;
    let mut adj = vec![HashSet::new(); n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                adj[i].insert(j);
            }
        }
    }
    c.bench_function("maximal_cliques_complete_32", |bench| {
        bench.iter(|| black_box(maximal_cliques(&adj, &|| false)))
    });
}

criterion_group!(benches, bench_ring, bench_complete);
criterion_main!(benches);
