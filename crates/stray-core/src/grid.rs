//! Square grid partitioned into equal cells.
//!
//! Rows run along y, columns along x. Cell `(row, col)` covers
//! `[col * w, (col + 1) * w] x [row * h, (row + 1) * h]` where `w` and `h`
//! are the cell dimensions.

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grid cell, identified by its row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Row index (y axis).
    pub row: usize,
    /// Column index (x axis).
    pub col: usize,
}

impl Cell {
    /// Creates a cell at the given row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Signed (row, col) delta from `self` to `other`.
    pub fn delta(self, other: Cell) -> (i64, i64) {
        (
            other.row as i64 - self.row as i64,
            other.col as i64 - self.col as i64,
        )
    }

    /// Returns true if both cells share a row or a column.
    pub fn shares_line(self, other: Cell) -> bool {
        self.row == other.row || self.col == other.col
    }
}

/// One of the four sides of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Row 0.
    Top,
    /// Last column.
    Right,
    /// Last row.
    Bottom,
    /// Column 0.
    Left,
}

impl Side {
    /// All sides, clockwise from the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// A `rows x cols` grid laid over a square of side `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Side length of the square domain.
    pub size: f32,
}

impl Grid {
    /// Creates a grid. Zero dimensions are raised to one.
    pub fn new(rows: usize, cols: usize, size: f32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            size,
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Width of one cell.
    pub fn cell_width(&self) -> f32 {
        self.size / self.cols as f32
    }

    /// Height of one cell.
    pub fn cell_height(&self) -> f32 {
        self.size / self.rows as f32
    }

    /// Half width and half height of one cell.
    pub fn cell_half_extent(&self) -> Vec2 {
        Vec2::new(self.cell_width(), self.cell_height()) * 0.5
    }

    /// Returns true if the cell lies inside the grid.
    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns the cell at signed coordinates, if inside the grid.
    pub fn cell_checked(&self, row: i64, col: i64) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let cell = Cell::new(row as usize, col as usize);
        self.contains_cell(cell).then_some(cell)
    }

    /// Center of a cell in grid space.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        let w = self.cell_width();
        let h = self.cell_height();
        Vec2::new(cell.col as f32 * w + w / 2.0, cell.row as f32 * h + h / 2.0)
    }

    /// The cell containing a point, clamped to the grid.
    pub fn cell_at(&self, point: Vec2) -> Cell {
        let col = (point.x / self.cell_width()).floor();
        let row = (point.y / self.cell_height()).floor();
        Cell::new(
            (row.max(0.0) as usize).min(self.rows - 1),
            (col.max(0.0) as usize).min(self.cols - 1),
        )
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// The cell at the middle of one side of the grid.
    pub fn edge_midpoint(&self, side: Side) -> Cell {
        match side {
            Side::Top => Cell::new(0, self.cols / 2),
            Side::Right => Cell::new(self.rows / 2, self.cols - 1),
            Side::Bottom => Cell::new(self.rows - 1, self.cols / 2),
            Side::Left => Cell::new(self.rows / 2, 0),
        }
    }

    /// Cells crossed by the straight line between two grid-space points.
    ///
    /// Bresenham stepping over the cell lattice, with both end cells clamped
    /// to the grid. Stops after `rows * cols` steps at most.
    pub fn cells_along(&self, from: Vec2, to: Vec2) -> Vec<Cell> {
        let start = self.cell_at(from);
        let end = self.cell_at(to);

        let mut cells = vec![start];
        if start == end {
            return cells;
        }

        let dx = (end.col as i64 - start.col as i64).abs();
        let dy = (end.row as i64 - start.row as i64).abs();
        let sx = if start.col < end.col { 1 } else { -1 };
        let sy = if start.row < end.row { 1 } else { -1 };
        let mut err = dx - dy;

        let mut row = start.row as i64;
        let mut col = start.col as i64;
        let max_steps = self.cell_count();
        let mut steps = 0;

        while (row != end.row as i64 || col != end.col as i64) && steps < max_steps {
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                col += sx;
            }
            if e2 < dx {
                err += dx;
                row += sy;
            }
            if let Some(cell) = self.cell_checked(row, col) {
                cells.push(cell);
            }
            steps += 1;
        }

        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center() {
        let grid = Grid::new(5, 5, 500.0);
        assert_eq!(grid.cell_center(Cell::new(0, 0)), Vec2::new(50.0, 50.0));
        assert_eq!(grid.cell_center(Cell::new(2, 4)), Vec2::new(450.0, 250.0));
    }

    #[test]
    fn test_cell_at_clamps() {
        let grid = Grid::new(4, 4, 100.0);
        assert_eq!(grid.cell_at(Vec2::new(-10.0, 30.0)), Cell::new(1, 0));
        assert_eq!(grid.cell_at(Vec2::new(120.0, 120.0)), Cell::new(3, 3));
        assert_eq!(grid.cell_at(Vec2::new(60.0, 10.0)), Cell::new(0, 2));
    }

    #[test]
    fn test_non_square_cells() {
        let grid = Grid::new(2, 4, 400.0);
        assert_eq!(grid.cell_width(), 100.0);
        assert_eq!(grid.cell_height(), 200.0);
        assert_eq!(grid.cell_half_extent(), Vec2::new(50.0, 100.0));
    }

    #[test]
    fn test_edge_midpoints() {
        let grid = Grid::new(7, 5, 500.0);
        assert_eq!(grid.edge_midpoint(Side::Top), Cell::new(0, 2));
        assert_eq!(grid.edge_midpoint(Side::Right), Cell::new(3, 4));
        assert_eq!(grid.edge_midpoint(Side::Bottom), Cell::new(6, 2));
        assert_eq!(grid.edge_midpoint(Side::Left), Cell::new(3, 0));
    }

    #[test]
    fn test_cells_along_same_cell() {
        let grid = Grid::new(5, 5, 500.0);
        let cells = grid.cells_along(Vec2::new(10.0, 10.0), Vec2::new(90.0, 90.0));
        assert_eq!(cells, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_cells_along_row() {
        let grid = Grid::new(5, 5, 500.0);
        let a = grid.cell_center(Cell::new(2, 0));
        let b = grid.cell_center(Cell::new(2, 4));
        let cells = grid.cells_along(a, b);
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|c| c.row == 2));
        assert_eq!(cells.last(), Some(&Cell::new(2, 4)));
    }

    #[test]
    fn test_cells_along_diagonal() {
        let grid = Grid::new(5, 5, 500.0);
        let a = grid.cell_center(Cell::new(4, 0));
        let b = grid.cell_center(Cell::new(0, 4));
        let cells = grid.cells_along(a, b);
        assert_eq!(cells.first(), Some(&Cell::new(4, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(0, 4)));
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn test_cells_along_is_bounded() {
        let grid = Grid::new(3, 3, 300.0);
        let cells = grid.cells_along(Vec2::new(-500.0, -500.0), Vec2::new(900.0, 10.0));
        assert!(cells.len() <= grid.cell_count() + 1);
        assert!(cells.iter().all(|c| grid.contains_cell(*c)));
    }

    #[test]
    fn test_cell_checked() {
        let grid = Grid::new(3, 3, 300.0);
        assert_eq!(grid.cell_checked(-1, 0), None);
        assert_eq!(grid.cell_checked(2, 3), None);
        assert_eq!(grid.cell_checked(2, 2), Some(Cell::new(2, 2)));
    }
}
