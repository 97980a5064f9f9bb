use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plano::cluster::{Clustering, Kmeans};
use plano::{k_nearest, Point};
use rand::prelude::*;

fn synthetic(n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            Point::new(
                format!("P{i}"),
                rng.random_range(-10.0..10.0),
                rng.random_range(-7.0..7.0),
            )
        })
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    let data = synthetic(1000);

    group.bench_function("fit_n1000_k10", |b| {
        b.iter(|| {
            let model = Kmeans::new(10).with_max_iter(10).with_seed(42);
            let mut points = data.clone();
            model.fit(black_box(&mut points)).unwrap();
        })
    });

    group.finish();
}

fn bench_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn");
    let data = synthetic(1000);

    group.bench_function("k_nearest_n1000_k5", |b| {
        b.iter(|| k_nearest(black_box(&data[0]), black_box(&data), 5))
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans, bench_knn);
criterion_main!(benches);
