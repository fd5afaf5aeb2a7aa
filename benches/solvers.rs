//! Benchmarks for the heavier solvers on their worked examples.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aoc2025::{Params, Part};

const DAY9: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

const DAY10: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

const DAY12: &str = "\
0:\n###\n##.\n##.\n\n1:\n###\n##.\n.##\n\n2:\n.##\n###\n##.\n\n3:\n##.\n###\n##.\n\n\
4:\n###\n#..\n###\n\n5:\n###\n.#.\n###\n\n\
4x4: 0 0 0 0 2 0\n12x5: 1 0 1 0 2 2\n12x5: 1 0 1 0 3 2\n";

/// Benchmark the compressed floor of day 9.
fn bench_floor(c: &mut Criterion) {
    let params = Params::default();
    c.bench_function("day09_part2", |b| {
        b.iter(|| aoc2025::solve(9, Part::Two, black_box(DAY9), &params))
    });
}

/// Benchmark both halves of day 10.
fn bench_machines(c: &mut Criterion) {
    let params = Params::default();
    let mut group = c.benchmark_group("day10");
    group.bench_function("toggles", |b| {
        b.iter(|| aoc2025::solve(10, Part::One, black_box(DAY10), &params))
    });
    group.bench_function("presses", |b| {
        b.iter(|| aoc2025::solve(10, Part::Two, black_box(DAY10), &params))
    });
    group.finish();
}

/// Benchmark the packing search, which has to refute the last region.
fn bench_packing(c: &mut Criterion) {
    let params = Params::default();
    let mut group = c.benchmark_group("day12");
    group.sample_size(10);
    group.bench_function("regions", |b| {
        b.iter(|| aoc2025::solve(12, Part::One, black_box(DAY12), &params))
    });
    group.finish();
}

criterion_group!(benches, bench_floor, bench_machines, bench_packing);
criterion_main!(benches);
