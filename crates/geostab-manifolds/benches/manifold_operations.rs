//! Benchmarks for the hyperbolic and GL(n) kernels
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geostab_core::{config::BatchConfig, matrix_group::LieGroup};
use geostab_manifolds::{GeneralLinear, HyperbolicMetric, HyperbolicSpace};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, SeedableRng};

fn benchmark_hyperbolic_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperbolic");
    let mut rng = StdRng::seed_from_u64(0);

    for &n in &[2, 16, 128] {
        let space = HyperbolicSpace::<f64>::new(n).unwrap();
        let metric = HyperbolicMetric::new(space.clone());
        let p = space.random_uniform(1.0, &mut rng).unwrap();
        let q = space.random_uniform(1.0, &mut rng).unwrap();
        let v = metric.log_map(&p, &q).unwrap();
        let tiny = &v * 1e-9;

        group.bench_with_input(BenchmarkId::new("exp_map", n), &n, |b, _| {
            b.iter(|| metric.exp_map(black_box(&p), black_box(&v)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("exp_map_series", n), &n, |b, _| {
            b.iter(|| metric.exp_map(black_box(&p), black_box(&tiny)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("log_map", n), &n, |b, _| {
            b.iter(|| metric.log_map(black_box(&p), black_box(&q)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("distance", n), &n, |b, _| {
            b.iter(|| metric.distance(black_box(&p), black_box(&q)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("tangent_projection", n), &n, |b, _| {
            let ambient = DVector::from_element(n + 1, 0.5);
            b.iter(|| {
                space
                    .project_to_tangent_space(black_box(&p), black_box(&ambient))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_hyperbolic_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperbolic_batch");
    let mut rng = StdRng::seed_from_u64(1);
    let n = 8;

    for &count in &[16usize, 256, 4096] {
        for (label, batch) in [
            ("sequential", BatchConfig::sequential()),
            ("parallel", BatchConfig::default()),
        ] {
            let space = HyperbolicSpace::<f64>::new(n).unwrap().with_batch_config(batch);
            let metric = HyperbolicMetric::new(space.clone());
            let points: Vec<_> = (0..count)
                .map(|_| space.random_uniform(2.0, &mut rng).unwrap())
                .collect();
            let base = DMatrix::from_columns(&[space.random_uniform(1.0, &mut rng).unwrap()]);
            let targets = DMatrix::from_columns(&points);

            group.bench_with_input(
                BenchmarkId::new(format!("log_map_{}", label), count),
                &count,
                |b, _| b.iter(|| metric.log_map_batch(black_box(&base), black_box(&targets)).unwrap()),
            );
        }
    }

    group.finish();
}

fn benchmark_general_linear_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("general_linear");
    let mut rng = StdRng::seed_from_u64(2);

    for &n in &[2, 5, 10] {
        let gl = GeneralLinear::<f64>::new(n).unwrap();
        let base = DMatrix::identity(n, n) + gl.random_point_with(&mut rng) * 0.05;
        let v = gl.random_point_with(&mut rng) * 0.1;
        let p = gl.group_exp(&v, Some(&base)).unwrap();

        group.bench_with_input(BenchmarkId::new("group_exp_identity", n), &n, |b, _| {
            b.iter(|| gl.group_exp(black_box(&v), None).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("group_exp_base", n), &n, |b, _| {
            b.iter(|| gl.group_exp(black_box(&v), Some(black_box(&base))).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("group_log_base", n), &n, |b, _| {
            b.iter(|| gl.group_log(black_box(&p), Some(black_box(&base))).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("belongs", n), &n, |b, _| {
            b.iter(|| gl.belongs(black_box(&p)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_hyperbolic_operations,
    benchmark_hyperbolic_batches,
    benchmark_general_linear_operations
);
criterion_main!(benches);
