//! Constrained random walks over a cell grid.
//!
//! A walk picks a fixed number of distinct cells and orders them into a
//! [`Path`]. Optional constraints:
//!
//! - a [`DirectionMode`] relating each cell to the one before it
//! - unique rows and columns across the path
//! - anchoring both ends to midpoints of two different grid sides
//!
//! Infeasible constraints never fail. The walk stops early and returns the
//! longest path it could build.
//!
//! # Example
//!
//! ```
//! use stray_core::DirectionMode;
//! use stray_procgen::PathGenerator;
//!
//! let generator = PathGenerator {
//!     rows: 7,
//!     cols: 7,
//!     cell_count: 6,
//!     direction: DirectionMode::Orthogonal,
//!     ..Default::default()
//! };
//!
//! let path = generator.generate();
//! assert!(path.len() >= 2 && path.len() <= 6);
//! ```

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::IndexedRandom;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::{Cell, DirectionMode, Grid, Path, SceneConfig, Side};
use tracing::debug;

/// Range of the per-cell size jitter.
pub const SIZE_JITTER_RANGE: std::ops::RangeInclusive<f32> = 0.5..=1.5;

/// Generates constrained cell paths.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathGenerator {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Requested path length. Values below 2 are treated as 2.
    pub cell_count: usize,
    /// Allowed moves between consecutive cells.
    pub direction: DirectionMode,
    /// Never reuse a row or column.
    pub unique_rows_cols: bool,
    /// Pin both ends to edge midpoints (open paths only).
    pub include_sides: bool,
    /// Produce a closed loop.
    pub closed_loop: bool,
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self {
            rows: 7,
            cols: 7,
            cell_count: 5,
            direction: DirectionMode::Any,
            unique_rows_cols: false,
            include_sides: true,
            closed_loop: false,
        }
    }
}

impl From<&SceneConfig> for PathGenerator {
    fn from(config: &SceneConfig) -> Self {
        Self {
            rows: config.grid_height,
            cols: config.grid_width,
            cell_count: config.selected_cells,
            direction: config.path_direction,
            unique_rows_cols: config.unique_rows_cols,
            include_sides: config.include_sides,
            closed_loop: config.closed_loop,
        }
    }
}

/// The two boundary anchors of an open path.
#[derive(Debug, Clone, Copy)]
struct Anchors {
    start: (Side, Cell),
    end: (Side, Cell),
}

impl PathGenerator {
    /// Creates a generator for a grid with default constraints.
    pub fn new(rows: usize, cols: usize, cell_count: usize) -> Self {
        Self {
            rows,
            cols,
            cell_count,
            ..Default::default()
        }
    }

    /// Generates a path using the thread-local random generator.
    pub fn generate(&self) -> Path {
        let mut rng = rand::rng();
        self.generate_with_rng(&mut rng)
    }

    /// Generates a path with a caller-supplied random generator.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Path {
        let grid = Grid::new(self.rows, self.cols, 1.0);
        let target = self.cell_count.max(2);

        let anchors = if self.include_sides && !self.closed_loop {
            pick_anchors(&grid, rng)
        } else {
            None
        };

        let mut cells = match self.direction {
            DirectionMode::Any => self.scatter(&grid, target, anchors, rng),
            _ => self.walk(&grid, target, anchors, rng),
        };
        ensure_min_len(&grid, &mut cells, rng);

        let jitter: HashMap<Cell, f32> = cells
            .iter()
            .map(|&cell| (cell, rng.random_range(SIZE_JITTER_RANGE)))
            .collect();

        let anchored = anchors.filter(|a| {
            cells.first() == Some(&a.start.1) && cells.last() == Some(&a.end.1)
        });

        let path = if self.closed_loop {
            Path::closed(cells)
        } else {
            Path::open(cells)
        };
        let path = path.with_size_jitter(jitter);
        match anchored {
            Some(a) => path.with_anchors(a.start.0, a.end.0),
            None => path,
        }
    }

    /// Unordered selection: uniformly random cells in pick order.
    fn scatter<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        target: usize,
        anchors: Option<Anchors>,
        rng: &mut R,
    ) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(target);
        let mut used_rows = HashSet::new();
        let mut used_cols = HashSet::new();
        let mut reserved = Vec::new();

        if let Some(a) = anchors {
            for cell in [a.start.1, a.end.1] {
                reserved.push(cell);
                used_rows.insert(cell.row);
                used_cols.insert(cell.col);
            }
            cells.push(a.start.1);
        }

        let interior_target = target.saturating_sub(reserved.len());

        let mut pool: Vec<Cell> = grid
            .cells()
            .filter(|c| !reserved.contains(c))
            .filter(|c| {
                !self.unique_rows_cols
                    || (!used_rows.contains(&c.row) && !used_cols.contains(&c.col))
            })
            .collect();

        let mut picked = 0;
        while picked < interior_target && !pool.is_empty() {
            let index = rng.random_range(0..pool.len());
            let cell = pool.swap_remove(index);
            cells.push(cell);
            picked += 1;

            if self.unique_rows_cols {
                pool.retain(|c| c.row != cell.row && c.col != cell.col);
            }
        }

        if let Some(a) = anchors {
            cells.push(a.end.1);
        }
        cells
    }

    /// Ordered growth: each cell must satisfy the direction mode relative
    /// to the previous one.
    fn walk<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        target: usize,
        anchors: Option<Anchors>,
        rng: &mut R,
    ) -> Vec<Cell> {
        let end = anchors.map(|a| a.end.1);

        let first = match anchors {
            Some(a) => a.start.1,
            None => {
                let all: Vec<Cell> = grid.cells().collect();
                match all.choose(rng) {
                    Some(&cell) => cell,
                    None => return Vec::new(),
                }
            }
        };

        let mut cells = Vec::with_capacity(target);
        cells.push(first);

        let limit = if end.is_some() { target - 1 } else { target };
        while cells.len() < limit {
            let Some(&last) = cells.last() else { break };
            let candidates: Vec<Cell> = grid
                .cells()
                .filter(|&c| self.direction.allows(last, c) && self.admissible(c, &cells, end))
                .collect();

            match candidates.choose(rng) {
                Some(&next) => cells.push(next),
                None => break,
            }
        }

        if let Some(end) = end {
            self.connect(grid, &mut cells, end, target);
        }
        cells
    }

    /// Whether `cell` may be appended after the current last cell.
    ///
    /// Under uniqueness a new cell may share a line with the last cell, which
    /// orthogonal moves require, but not with any earlier one.
    fn admissible(&self, cell: Cell, cells: &[Cell], reserved: Option<Cell>) -> bool {
        if Some(cell) == reserved || cells.contains(&cell) {
            return false;
        }
        if !self.unique_rows_cols {
            return true;
        }
        let earlier = &cells[..cells.len().saturating_sub(1)];
        earlier.iter().all(|c| !c.shares_line(cell))
    }

    /// Joins the walk to the end anchor without exceeding `target` cells.
    ///
    /// If the direction mode cannot reach the anchor through at most two
    /// intermediate cells, the final edge is connected directly and breaks
    /// the constraint. This is the only edge allowed to do so.
    fn connect(&self, grid: &Grid, cells: &mut Vec<Cell>, end: Cell, target: usize) {
        loop {
            let budget = target.saturating_sub(cells.len() + 1);
            match self.bridge(grid, cells, end) {
                Some(bridge) if bridge.len() <= budget => {
                    cells.extend(bridge);
                    cells.push(end);
                    return;
                }
                Some(_) if cells.len() > 1 => {
                    // Make room for the elbow.
                    cells.pop();
                }
                _ => {
                    debug!(
                        from = ?cells.last(),
                        to = ?end,
                        direction = %self.direction,
                        "end anchor unreachable, connecting directly"
                    );
                    cells.push(end);
                    return;
                }
            }
        }
    }

    /// Shortest run of at most two cells from the last cell to `end`.
    fn bridge(&self, grid: &Grid, cells: &[Cell], end: Cell) -> Option<Vec<Cell>> {
        let &last = cells.last()?;
        if self.direction.allows(last, end) {
            return Some(Vec::new());
        }

        if let Some(elbow) = self
            .elbows(grid, last, end)
            .into_iter()
            .find(|&e| self.admissible(e, cells, Some(end)))
        {
            return Some(vec![elbow]);
        }

        let mut trial = cells.to_vec();
        for first in grid.cells() {
            if !self.direction.allows(last, first) || !self.admissible(first, &trial, Some(end)) {
                continue;
            }
            trial.push(first);
            let second = self
                .elbows(grid, first, end)
                .into_iter()
                .find(|&e| self.admissible(e, &trial, Some(end)));
            trial.pop();
            if let Some(second) = second {
                return Some(vec![first, second]);
            }
        }
        None
    }

    /// Single intermediate cells joining `a` to `b` under the direction mode.
    fn elbows(&self, grid: &Grid, a: Cell, b: Cell) -> Vec<Cell> {
        let (dr, dc) = a.delta(b);
        let (ar, ac) = (a.row as i64, a.col as i64);
        let (br, bc) = (b.row as i64, b.col as i64);
        let mut candidates: Vec<(i64, i64)> = Vec::new();

        if self.direction.has_orthogonal() {
            // L corners.
            candidates.push((ar, bc));
            candidates.push((br, ac));
        }

        if self.direction.has_diagonal() {
            // Crossings of the diagonals through a and b.
            let (a_diff, a_sum) = (ar - ac, ar + ac);
            let (b_diff, b_sum) = (br - bc, br + bc);
            if (a_diff + b_sum) % 2 == 0 {
                candidates.push(((a_diff + b_sum) / 2, (b_sum - a_diff) / 2));
            }
            if (a_sum + b_diff) % 2 == 0 {
                candidates.push(((a_sum + b_diff) / 2, (a_sum - b_diff) / 2));
            }
        }

        if self.direction == DirectionMode::OrthogonalOrDiagonal && dr.abs() != dc.abs() {
            // Diagonal run until a shares a line with b, or the reverse.
            let m = dr.abs().min(dc.abs());
            candidates.push((ar + dr.signum() * m, ac + dc.signum() * m));
            candidates.push((br - dr.signum() * m, bc - dc.signum() * m));
        }

        let mut elbows = Vec::new();
        for (row, col) in candidates {
            let Some(cell) = grid.cell_checked(row, col) else {
                continue;
            };
            if self.direction.allows(a, cell)
                && self.direction.allows(cell, b)
                && !elbows.contains(&cell)
            {
                elbows.push(cell);
            }
        }
        elbows
    }
}

/// Picks two edge midpoints on different sides with different cells.
fn pick_anchors<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Anchors> {
    let &start_side = Side::ALL.choose(rng)?;
    let start = grid.edge_midpoint(start_side);

    let ends: Vec<(Side, Cell)> = Side::ALL
        .into_iter()
        .filter(|&side| side != start_side)
        .map(|side| (side, grid.edge_midpoint(side)))
        .filter(|&(_, cell)| cell != start)
        .collect();
    let &end = ends.choose(rng)?;

    Some(Anchors {
        start: (start_side, start),
        end,
    })
}

/// Pads a path to two cells when the grid allows it.
fn ensure_min_len<R: Rng + ?Sized>(grid: &Grid, cells: &mut Vec<Cell>, rng: &mut R) {
    if cells.len() >= 2 || grid.cell_count() < 2 {
        return;
    }
    let mut free: Vec<Cell> = grid.cells().filter(|c| !cells.contains(c)).collect();
    while cells.len() < 2 && !free.is_empty() {
        let cell = free.swap_remove(rng.random_range(0..free.len()));
        debug!(?cell, "path too short, adding unconstrained cell");
        cells.push(cell);
    }
}
