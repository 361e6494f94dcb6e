//! Benchmarks for the cube puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use woodcube::geometry::all_orientations;
use woodcube::pieces::{build_catalogues, Catalogue, SOMA, WOODEN};
use woodcube::{ForEach, Search, Solution};

/// Benchmark the complete wooden puzzle search, counting solutions.
fn bench_solve(c: &mut Criterion) {
    let catalogues = build_catalogues(&WOODEN).unwrap();

    c.bench_function("solve_wooden", |b| {
        b.iter(|| {
            let mut count = 0usize;
            Search::new(black_box(&catalogues)).run(&mut ForEach(|_: Solution| count += 1));
            count
        })
    });
}

/// Benchmark the search through the worker thread and channel.
fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");
    group.sample_size(10);
    group.bench_function("wooden", |b| {
        b.iter(|| woodcube::stream(black_box(&WOODEN)).unwrap().count())
    });
    group.finish();
}

/// Benchmark computing all orientations for a single piece.
fn bench_orientations(c: &mut Criterion) {
    let piece = WOODEN.pieces[0].cubes;

    c.bench_function("all_orientations", |b| {
        b.iter(|| all_orientations(black_box(piece), true))
    });
}

/// Benchmark building the placement catalogue for every Soma piece.
fn bench_catalogues(c: &mut Criterion) {
    c.bench_function("build_soma_catalogues", |b| {
        b.iter(|| {
            SOMA.pieces
                .iter()
                .map(|piece| Catalogue::build(black_box(piece)))
                .collect::<Vec<_>>()
        })
    });
}

/// Benchmark rendering a solution for display.
fn bench_render(c: &mut Criterion) {
    let solutions = woodcube::solve(&WOODEN).unwrap();
    let solution = &solutions[0];

    c.bench_function("render_solution", |b| {
        b.iter(|| black_box(solution).to_string())
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_stream,
    bench_orientations,
    bench_catalogues,
    bench_render
);
criterion_main!(benches);
