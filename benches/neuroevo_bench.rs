//! Criterion benchmarks for the u-neuroevo optimizers.
//!
//! Uses the Sphere function so the numbers reflect optimizer overhead
//! rather than the cost function.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_neuroevo::ga::{Crossover, GaConfig, GaRunner, Initialisation, Mutation, Selection};
use u_neuroevo::hill::{HcConfig, HcRunner};
use u_neuroevo::random::create_rng;
use u_neuroevo::sa::{SaConfig, SaRunner};
use u_neuroevo::AliasTable;

fn sphere(genes: &[f64]) -> f64 {
    genes.iter().map(|x| x * x).sum()
}

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for selection in Selection::ALL {
        let config = GaConfig::default()
            .with_chromosome_len(50)
            .with_initialisation(Initialisation::Random)
            .with_selection(selection)
            .with_crossover(Crossover::Uniform)
            .with_mutation(Mutation::Standard)
            .with_max_evaluations(5_000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(selection),
            &config,
            |b, config| {
                b.iter(|| {
                    let result = GaRunner::run(&sphere, black_box(config));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_trajectory_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory_sphere");
    group.sample_size(10);

    for dim in [10usize, 50, 100] {
        let sa = SaConfig::default()
            .with_chromosome_len(dim)
            .with_max_iterations(5_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::new("sa", dim), &sa, |b, config| {
            b.iter(|| black_box(SaRunner::run(&sphere, black_box(config))))
        });

        let hc = HcConfig::default()
            .with_chromosome_len(dim)
            .with_max_iterations(5_000)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::new("hc", dim), &hc, |b, config| {
            b.iter(|| black_box(HcRunner::run(&sphere, black_box(config))))
        });
    }
    group.finish();
}

fn bench_alias_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_sample");

    for n in [10usize, 100, 1_000] {
        let weights: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        group.bench_with_input(BenchmarkId::new("build", n), &weights, |b, w| {
            b.iter(|| black_box(AliasTable::new(black_box(w))))
        });

        if let Ok(table) = AliasTable::new(&weights) {
            let mut rng = create_rng(7);
            group.bench_with_input(BenchmarkId::new("draw", n), &table, |b, t| {
                b.iter(|| black_box(t.sample(&mut rng)))
            });
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ga_sphere,
    bench_trajectory_sphere,
    bench_alias_sample
);
criterion_main!(benches);
