//! # Relation Details Benchmarks
//!
//! Performance benchmarks for lineage-core construction and queries.
//!
//! Run with: `cargo bench -p lineage-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lineage_core::{ProductId, RelationDetails, RelationKind, RelationSet, RelationSnapshot};
use std::hint::black_box;

const PRODUCT: ProductId = ProductId(0);

/// Create N relations around `PRODUCT`, cycling through every kind and role.
fn create_relations(size: usize) -> Vec<RelationSnapshot> {
    (1..=size as u64)
        .map(|i| {
            let kind = RelationKind::ALL[(i as usize) % RelationKind::ALL.len()];
            if i % 2 == 0 {
                RelationSnapshot::new(kind, ProductId(i), PRODUCT)
            } else {
                RelationSnapshot::new(kind, PRODUCT, ProductId(i))
            }
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [10, 100, 1000].iter() {
        let relations = create_relations(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &relations, |b, relations| {
            b.iter(|| black_box(RelationDetails::build(PRODUCT, relations.iter().copied())));
        });
    }

    group.finish();
}

fn bench_lifecycle_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle_query");

    for size in [10, 100, 1000].iter() {
        let details = RelationDetails::new(PRODUCT, RelationSet::from(create_relations(*size)));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(details.renewed_product_id()));
        });
    }

    group.finish();
}

fn bench_inclusive_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("inclusive_query");

    for size in [10, 100, 1000].iter() {
        let details = RelationDetails::new(PRODUCT, RelationSet::from(create_relations(*size)));
        // Absent counterpart forces a full scan of the kind's relations.
        let missing = ProductId(u64::MAX);

        group.bench_with_input(BenchmarkId::from_parameter(size), &missing, |b, &other| {
            b.iter(|| black_box(details.is_refinanced_by(other)));
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for size in [10, 100, 1000].iter() {
        let details = RelationDetails::new(PRODUCT, RelationSet::from(create_relations(*size)));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(details.summary()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_lifecycle_query,
    bench_inclusive_query,
    bench_summary,
);

criterion_main!(benches);
