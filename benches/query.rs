//! Criterion benchmarks for index training and query dispatch.
//!
//! Run with:
//!   cargo bench --bench query

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phindex::Index;

/// Deterministic synthetic corpus: `n` distinct 256-bit hashes derived
/// from a counter, so results are reproducible without an external
/// corpus file.
fn synthetic_corpus(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[0..8].copy_from_slice(&(i as u64).to_be_bytes());
            hex::encode(bytes)
        })
        .collect()
}

fn bench_train(c: &mut Criterion) {
    let mut group = c.benchmark_group("train");
    for &n in &[1_000usize, 10_000, 100_000] {
        let hashes = synthetic_corpus(n);
        group.bench_with_input(BenchmarkId::new("train", n), &hashes, |b, hashes| {
            b.iter(|| {
                let mut index = Index::from_preset_pdq();
                index.update(hashes.iter(), "bench").unwrap();
                index.train();
            });
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for &n in &[1_000usize, 10_000, 100_000] {
        let hashes = synthetic_corpus(n);
        let mut index = Index::from_preset_pdq();
        index.update(hashes.iter(), "bench").unwrap();
        index.train();
        let probe = hashes[0].clone();

        group.bench_with_input(BenchmarkId::new("mih", n), &probe, |b, probe| {
            b.iter(|| index.query(probe, 32).unwrap().count());
        });
        group.bench_with_input(BenchmarkId::new("linear", n), &probe, |b, probe| {
            b.iter(|| index.query(probe, 33).unwrap().count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_train, bench_query);
criterion_main!(benches);
