use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lostfound::{
    CategoryFilter, ItemCatalog, KindFilter, ListingFilter, MatchPolicy, ScoreWeights, aggregate,
    score,
};

mod common;
use common::create_sample_items;

/// Single pair scoring, the inner loop of every aggregation.
fn bench_score_pair(c: &mut Criterion) {
    let items = create_sample_items(2);
    c.bench_function("score_pair", |b| {
        b.iter(|| score(black_box(&items[0]), black_box(&items[1])));
    });
}

/// Full cross-kind aggregation at increasing set sizes.
fn bench_aggregate_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_scale");
    let weights = ScoreWeights::default();

    for &size in [10, 100, 1000].iter() {
        let items = create_sample_items(size);
        // n/2 Lost × n/2 Found, scored in both directions.
        let pairs = (size / 2) * (size - size / 2) * 2;
        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_function(format!("items_{size}"), |b| {
            b.iter(|| aggregate(black_box(&items), &weights));
        });
    }

    group.finish();
}

/// Catalog query: snapshot, aggregate, filter and bucket.
fn bench_catalog_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_query");
    let catalog = ItemCatalog::with_items(create_sample_items(500), MatchPolicy::default());

    let filters = vec![
        ("unfiltered", ListingFilter::new()),
        ("search", ListingFilter::new().with_search("report number 4")),
        (
            "kind_and_category",
            ListingFilter::new()
                .with_kind(KindFilter::Found)
                .with_category(CategoryFilter::All),
        ),
    ];

    for (name, filter) in filters {
        group.bench_function(name, |b| {
            b.iter(|| catalog.query(black_box(&filter)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_score_pair,
    bench_aggregate_scale,
    bench_catalog_query
);
criterion_main!(benches);
