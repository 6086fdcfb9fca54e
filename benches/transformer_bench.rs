//! Benchmark for monad transformers and erased dispatch.
//!
//! Measures SeqT pipelines over a few outer monads, the checked windowing
//! operations, and the cost of going through `AnyM` instead of the carrier.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kindred::anym::AnyM;
use kindred::carrier::{IdentityKind, OptionKind, Seq, VecKind};
use kindred::kind::Kind;
use kindred::transformer::{OptionT, SeqT};
use kindred::typeclass::{Functor, Identity, Monad};
use std::hint::black_box;

fn batches(count: usize, size: usize) -> Vec<Vec<u64>> {
    (0..count)
        .map(|batch| (0..size).map(|index| (batch * size + index) as u64).collect())
        .collect()
}

// =============================================================================
// SeqT Benchmarks
// =============================================================================

fn benchmark_seq_t_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("seq_t_pipeline");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("vec_outer", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let transformed = SeqT::from_vecs(VecKind, Kind::from(batches(4, size)))
                    .map(|n| n * 3)
                    .filter(|n| n % 2 == 0)
                    .flat_map_inner(|n| Seq::from_vec(vec![n, n + 1]))
                    .to_vecs();
                black_box(transformed.narrow())
            });
        });

        group.bench_with_input(BenchmarkId::new("identity_outer", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let values: Vec<u64> = (0..size as u64).collect();
                let transformed = SeqT::from_vecs(IdentityKind, Kind::from(Identity(values)))
                    .map(|n| n * 3)
                    .filter(|n| n % 2 == 0)
                    .to_vecs();
                black_box(transformed.narrow())
            });
        });
    }

    group.finish();
}

fn benchmark_seq_t_windowing(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("seq_t_windowing");

    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("sliding", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let windows = SeqT::from_vecs(VecKind, Kind::from(batches(4, size)))
                    .sliding(3)
                    .map(SeqT::to_vecs);
                black_box(windows.map(Kind::narrow))
            });
        });

        group.bench_with_input(BenchmarkId::new("sorted", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let sorted = SeqT::from_vecs(VecKind, Kind::from(batches(4, size)))
                    .shuffle_seeded(7)
                    .and_then(SeqT::sorted)
                    .map(SeqT::to_vecs);
                black_box(sorted.map(Kind::narrow))
            });
        });
    }

    group.finish();
}

// =============================================================================
// OptionT Benchmarks
// =============================================================================

fn benchmark_option_t_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("option_t_chain");

    for depth in [10, 100] {
        group.bench_with_input(BenchmarkId::new("option_outer", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut chain = OptionT::unit(OptionKind, 0_u64);
                for _ in 0..depth {
                    chain = chain.flat_map(|n| OptionT::unit(OptionKind, n + 1));
                }
                black_box(chain.run().narrow())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Erased Dispatch Benchmarks
// =============================================================================

fn benchmark_anym_overhead(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("anym_overhead");
    let values: Vec<u64> = (0..1000).collect();

    group.bench_function("typed_vec", |bencher| {
        bencher.iter(|| {
            let mapped = VecKind.map(|n: u64| n + 1, Kind::from(values.clone()));
            let bound = VecKind.flat_map(|n: u64| Kind::from(vec![n, n]), mapped);
            black_box(bound.narrow())
        });
    });

    group.bench_function("erased_vec", |bencher| {
        bencher.iter(|| {
            let bound = AnyM::from_iterable(values.clone())
                .map(|n| n + 1)
                .flat_map(|n| vec![n, n])
                .to_vec();
            black_box(bound)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_seq_t_pipeline,
    benchmark_seq_t_windowing,
    benchmark_option_t_chain,
    benchmark_anym_overhead
);
criterion_main!(benches);
