//! Benchmarks for best-response computation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use br_solver::br::{ApproxBestResponse, BestResponse, BrConfig, StrategyProfile, UniformStrategy};
use br_solver::games::kuhn::KuhnPoker;
use br_solver::games::matching_pennies::MatchingPennies;

fn kuhn_exact_benchmark(c: &mut Criterion) {
    let game = KuhnPoker::new();
    let uniform = UniformStrategy;
    let profile = StrategyProfile::with_responder(0, &[&uniform]);
    let config = BrConfig::default();

    c.bench_function("kuhn_exact_best_response", |b| {
        b.iter(|| {
            let br = BestResponse::compute(&game, 0, &profile, &config).unwrap();
            black_box(br.value())
        })
    });
}

fn matching_pennies_exact_benchmark(c: &mut Criterion) {
    let game = MatchingPennies::new();
    let uniform = UniformStrategy;
    let profile = StrategyProfile::with_responder(1, &[&uniform]);
    let config = BrConfig::default();

    c.bench_function("matching_pennies_exact_best_response", |b| {
        b.iter(|| {
            let br = BestResponse::compute(&game, 1, &profile, &config).unwrap();
            black_box(br.value())
        })
    });
}

fn kuhn_approx_training_benchmark(c: &mut Criterion) {
    let game = KuhnPoker::new();
    let uniform = UniformStrategy;
    let profile = StrategyProfile::with_responder(0, &[&uniform]);
    let config = BrConfig::default().with_seed(42);

    c.bench_function("kuhn_approx_1000_iterations", |b| {
        b.iter(|| {
            let br =
                ApproxBestResponse::compute(&game, 0, &profile, black_box(1000), &config).unwrap();
            black_box(br.num_info_sets())
        })
    });
}

criterion_group!(
    benches,
    kuhn_exact_benchmark,
    matching_pennies_exact_benchmark,
    kuhn_approx_training_benchmark
);
criterion_main!(benches);
