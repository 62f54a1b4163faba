use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use ordered_tree::Tree;

/// Deterministic scattered insertion order. The multiplier is coprime with
/// every benchmarked size, so this permutes `0..count` without letting the
/// unbalanced tree degenerate into a linked list during setup.
fn scattered(count: usize) -> Vec<i32> {
    (0..count).map(|i| ((i * 48_271) % count) as i32).collect()
}

fn build(values: &[i32]) -> Tree<i32> {
    values.iter().copied().collect()
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for num_levels in [3u32, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels) - 1;
        let values = scattered(num_nodes);
        let tree = build(&values);
        let probe = (num_nodes / 2) as i32;

        group.bench_function(BenchmarkId::new("get", num_nodes), |b| {
            b.iter(|| black_box(tree.get(black_box(&probe))))
        });
        group.bench_function(BenchmarkId::new("get-miss", num_nodes), |b| {
            let missing = num_nodes as i32;
            b.iter(|| black_box(tree.get(black_box(&missing))))
        });
        group.bench_function(BenchmarkId::new("height", num_nodes), |b| {
            b.iter(|| black_box(tree.height()))
        });
        group.bench_function(BenchmarkId::new("index_of", num_nodes), |b| {
            b.iter(|| black_box(tree.index_of(black_box(&probe))))
        });
        group.bench_function(BenchmarkId::new("find_index", num_nodes), |b| {
            b.iter(|| black_box(tree.find_index(black_box(num_nodes / 2))))
        });
    }

    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");

    for num_levels in [3u32, 7, 11] {
        let num_nodes = 2usize.pow(num_levels) - 1;
        let values = scattered(num_nodes);
        let missing = num_nodes as i32;
        let present = (num_nodes / 2) as i32;

        group.bench_function(BenchmarkId::new("add", num_nodes), |b| {
            b.iter_batched(
                || build(&values),
                |mut tree| tree.add(black_box(missing)),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("remove", num_nodes), |b| {
            b.iter_batched(
                || build(&values),
                |mut tree| {
                    black_box(tree.remove(black_box(&present)));
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries, bench_mutations);
criterion_main!(benches);
