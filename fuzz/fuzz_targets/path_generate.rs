#![no_main]

use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;
use stray_core::{DirectionMode, Grid};
use stray_procgen::PathGenerator;

fuzz_target!(|data: &[u8]| {
    let [rows, cols, count, mode, flags, seed @ ..] = data else {
        return;
    };

    let direction = match mode % 4 {
        0 => DirectionMode::Any,
        1 => DirectionMode::Orthogonal,
        2 => DirectionMode::Diagonal,
        _ => DirectionMode::OrthogonalOrDiagonal,
    };
    let generator = PathGenerator {
        rows: (*rows as usize % 16) + 1,
        cols: (*cols as usize % 16) + 1,
        cell_count: *count as usize % 40,
        direction,
        unique_rows_cols: flags & 1 != 0,
        include_sides: flags & 2 != 0,
        closed_loop: flags & 4 != 0,
    };
    let seed = seed.iter().fold(0u64, |acc, &b| acc.rotate_left(8) ^ b as u64);

    // Generation must terminate and never panic, whatever the constraints.
    let path = generator.generate_with_rng(&mut StdRng::seed_from_u64(seed));
    assert!(path.len() <= generator.cell_count.max(2));

    let grid = Grid::new(generator.rows, generator.cols, 1.0);
    assert!(path.cells().iter().all(|&c| grid.contains_cell(c)));
});
