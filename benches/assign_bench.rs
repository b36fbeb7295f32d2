//! Criterion benchmarks for the assignment strategies.
//!
//! Uses seeded synthetic datasets so runs are comparable across machines.

use castmatch::cost::CostMatrix;
use castmatch::generate::{generate, GeneratorConfig};
use castmatch::model::PreferenceModel;
use castmatch::strategy::{AssignStrategy, StrategyKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn dataset(people: usize) -> PreferenceModel {
    let config = GeneratorConfig::default()
        .with_people(people)
        .with_characters(people)
        .with_choices(3, 6)
        .with_seed(7);
    let prefs = generate(&config).expect("valid generator config");
    PreferenceModel::from_preferences(prefs).expect("generated data is valid")
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    for &people in &[20usize, 60, 120] {
        let model = dataset(people);
        let costs = CostMatrix::from_model(&model);
        for kind in StrategyKind::COMPARABLE {
            group.bench_with_input(
                BenchmarkId::new(kind.name(), people),
                &people,
                |b, _| {
                    let strategy = kind.instance();
                    b.iter(|| {
                        let a = strategy.run(black_box(&model), black_box(&costs)).unwrap();
                        black_box(a);
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_matrix_build(c: &mut Criterion) {
    let model = dataset(120);
    c.bench_function("cost_matrix_120", |b| {
        b.iter(|| black_box(CostMatrix::from_model(black_box(&model))))
    });
}

criterion_group!(benches, bench_strategies, bench_matrix_build);
criterion_main!(benches);
