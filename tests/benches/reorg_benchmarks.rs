//! # Chain Reorg Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Ancestor search, fork depth 1000 | < 5ms |
//! | Ancestor search, prefix of 1000 | < 2ms |
//! | Full evaluate (search + classify + size) | < 5ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qc_18_chain_reorg::test_utils::ChainBuilder;
use qc_18_chain_reorg::{
    find_common_ancestor, is_reorg, reorg_diff, ReorgConfig, ReorgService, TipSetIterator,
};
use std::sync::Arc;

fn bench_fork_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-ancestor-search");

    for depth in [10u64, 100, 1000] {
        let mut builder = ChainBuilder::new();
        let common = builder.grow(&builder.genesis(), 100);
        let old = builder.grow(&common, depth);
        let new = builder.grow(&common, depth + 3);
        let store = builder.store();

        group.bench_with_input(BenchmarkId::new("fork", depth), &depth, |b, _| {
            b.iter(|| {
                let mut old_iter = TipSetIterator::new(store, old.clone());
                let mut new_iter = TipSetIterator::new(store, new.clone());
                black_box(find_common_ancestor(&mut old_iter, &mut new_iter).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("prefix", depth), &depth, |b, _| {
            b.iter(|| {
                let mut old_iter = TipSetIterator::new(store, common.clone());
                let mut new_iter = TipSetIterator::new(store, old.clone());
                black_box(find_common_ancestor(&mut old_iter, &mut new_iter).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut builder = ChainBuilder::new();
    let common = builder.grow(&builder.genesis(), 50);
    let old = builder.grow(&common, 1000);
    let new = builder.grow(&common, 1001);
    let service = ReorgService::new(Arc::new(builder.into_store()), ReorgConfig::default());

    c.bench_function("qc-18-evaluate-between", |b| {
        b.iter(|| black_box(service.evaluate_between(&old, &new).unwrap()))
    });

    c.bench_function("qc-18-classify-and-size", |b| {
        b.iter(|| {
            black_box(is_reorg(&old, &new, &common));
            black_box(reorg_diff(&old, &new, &common).unwrap())
        })
    });
}

criterion_group!(benches, bench_fork_search, bench_evaluate);
criterion_main!(benches);
