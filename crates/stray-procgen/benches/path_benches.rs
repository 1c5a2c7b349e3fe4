//! Benchmarks for path generation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use stray_core::DirectionMode;
use stray_procgen::PathGenerator;

// ============================================================================
// Direction modes
// ============================================================================

fn bench_directions(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_direction");

    for direction in [
        DirectionMode::Any,
        DirectionMode::Orthogonal,
        DirectionMode::Diagonal,
        DirectionMode::OrthogonalOrDiagonal,
    ] {
        let generator = PathGenerator {
            rows: 12,
            cols: 12,
            cell_count: 10,
            direction,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(direction.as_str()),
            &generator,
            |b, generator| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| black_box(generator.generate_with_rng(&mut rng)))
            },
        );
    }

    group.finish();
}

// ============================================================================
// Grid size
// ============================================================================

fn bench_grid_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_grid_size");

    for size in [7, 20, 50] {
        let generator = PathGenerator {
            rows: size,
            cols: size,
            cell_count: size,
            direction: DirectionMode::Orthogonal,
            unique_rows_cols: true,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, generator| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(generator.generate_with_rng(&mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_directions, bench_grid_size);
criterion_main!(benches);
