use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use si_core::{LinearMap, Offset, StateMatrix};
use si_prob::IsotropicGaussian;
use si_randomized::{BatchEvaluator, EvaluatorConfig};
use std::hint::black_box;

type Batch = (LinearMap, StateMatrix, LinearMap, StateMatrix, Offset);

fn make_batch(ndim: usize, ninternal: usize, noptimization: usize, npt: usize) -> Batch {
    // Deterministic, cheap fill.
    let fill = |n: usize, phase: f64| -> Vec<f64> {
        (0..n).map(|i| ((i as f64) * 0.61 + phase).sin()).collect()
    };
    (
        LinearMap::from_column_slice(ndim, ninternal, &fill(ndim * ninternal, 0.1)).unwrap(),
        StateMatrix::from_column_slice(ninternal, npt, &fill(ninternal * npt, 0.2)).unwrap(),
        LinearMap::from_column_slice(ndim, noptimization, &fill(ndim * noptimization, 0.3)).unwrap(),
        StateMatrix::from_column_slice(noptimization, npt, &fill(noptimization * npt, 0.4)).unwrap(),
        Offset::from_slice(&fill(ndim, 0.5)),
    )
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_density_gaussian_batch");
    let density = IsotropicGaussian::new(1.0).unwrap();
    let sequential = BatchEvaluator::new(EvaluatorConfig {
        parallel_threshold: usize::MAX,
        ..Default::default()
    });
    let parallel =
        BatchEvaluator::new(EvaluatorConfig { parallel_threshold: 0, ..Default::default() });

    for npt in [1_000usize, 10_000, 100_000] {
        let (a_d, d, a_o, o, h) = make_batch(20, 20, 10, npt);
        group.bench_with_input(BenchmarkId::new("sequential", npt), &npt, |b, _| {
            b.iter(|| black_box(sequential.evaluate(&density, &a_d, &d, &a_o, &o, &h).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", npt), &npt, |b, _| {
            b.iter(|| black_box(parallel.evaluate(&density, &a_d, &d, &a_o, &o, &h).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
