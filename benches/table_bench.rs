//! Criterion benchmarks for the feasibility oracle and table sweeps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ilr_table::oracle::{FeasibilityOracle, ParameterPoint};
use ilr_table::table::{ParameterPoints, TableConfig, TableGenerator};

// ===========================================================================
// Single oracle calls
// ===========================================================================

fn bench_oracle(c: &mut Criterion) {
    let mut group = c.benchmark_group("oracle");
    let oracle = FeasibilityOracle::new();

    let cases = [
        ("origin", ParameterPoint::origin()),
        ("infeasible", ParameterPoint::new([0, 2, 2, 2, 2], [1, 1, 1])),
        ("feasible", ParameterPoint::new([2, 2, 1, 1, 2], [4, 4, 4])),
        ("wide", ParameterPoint::new([6, 6, 6, 6, 6], [10, 10, 10])),
    ];
    for (name, point) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &point, |b, p| {
            b.iter(|| black_box(oracle.is_feasible(black_box(p))))
        });
    }
    group.finish();
}

// ===========================================================================
// Enumeration only
// ===========================================================================

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");

    for (l, d) in [(8u32, 1u32), (16, 2)] {
        group.bench_with_input(
            BenchmarkId::new(format!("l{}_d{}", l, d), l),
            &(l, d),
            |b, &(l, d)| b.iter(|| black_box(ParameterPoints::new(l, d).count())),
        );
    }
    group.finish();
}

// ===========================================================================
// Full sweeps
// ===========================================================================

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);

    let generator = TableGenerator::new();
    for (l, d) in [(4i64, 1i64), (8, 1)] {
        let config = TableConfig::new(l, d);
        group.bench_with_input(
            BenchmarkId::new(format!("l{}_d{}", l, d), l),
            &config,
            |b, config| {
                b.iter(|| {
                    let table = generator.generate(black_box(config), std::io::sink());
                    black_box(table)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_oracle, bench_enumeration, bench_sweep);
criterion_main!(benches);
