//! Directory enumeration benchmarks for mechacopy
//!
//! Measures the bounded concurrent walker on a generated tree across
//! listing concurrency and parallel depth settings.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mechacopy_engine::DirectoryEnumerator;
use mechacopy_tests::test_utils::wide_tree;
use mechacopy_types::EnumerationLimits;
use std::hint::black_box;
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn bench_enumeration(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let tree = TempDir::new().unwrap();
    let directories = wide_tree(tree.path(), 6, 3).unwrap();

    let mut group = c.benchmark_group("enumeration");
    group.throughput(Throughput::Elements(directories as u64));

    for (listings, depth) in [(1, 0), (4, 2), (16, 8), (64, 8)] {
        let limits = EnumerationLimits::new(listings, depth).unwrap();
        group.bench_with_input(
            BenchmarkId::new("listings_depth", format!("{}x{}", listings, depth)),
            &limits,
            |b, limits| {
                b.to_async(&rt).iter(|| async {
                    let found = DirectoryEnumerator::new(*limits)
                        .enumerate(tree.path())
                        .await
                        .unwrap();
                    black_box(found.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_enumeration);
criterion_main!(benches);
