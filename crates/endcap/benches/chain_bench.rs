//! Criterion benchmarks for the per-sample work: candidate search, chain
//! exploration and the radius/thickness build.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use endcap::prelude::*;

fn sample(granularity: usize) -> Configuration {
    let params = SearchParams {
        step: 2.0,
        side_granularity: granularity,
        ..SearchParams::default()
    };
    let mut cfg = Configuration::new(params).unwrap();
    let first = cfg.l1()[0];
    cfg.set_species_edges(0, first, 62.0).unwrap();
    cfg.set_species_edges(1, 53.0, 63.0).unwrap();
    let last = cfg.l2()[2];
    cfg.set_species_edges(2, 55.0, last).unwrap();
    cfg
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for &g in &[1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("next_ring_candidates", g), &g, |b, &g| {
            let cfg = sample(g);
            b.iter(|| next_ring_candidates(&cfg, 1))
        });
        group.bench_with_input(BenchmarkId::new("explore_chains", g), &g, |b, &g| {
            b.iter_batched(
                || (sample(g), Vec::new()),
                |(mut cfg, mut out)| explore_chains(&mut cfg, 2.0, &mut out),
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("build_radius", |b| {
        let mut cfg = sample(4);
        cfg.assign_ring(1, 1, 56).unwrap();
        b.iter(|| cfg.build_radius(2.0))
    });
    group.finish();
}

criterion_group!(benches, bench_chain);
criterion_main!(benches);
