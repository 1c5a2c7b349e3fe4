//! Ordered cell sequences produced by path generation.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Side};

/// An ordered sequence of grid cells.
///
/// Cells are pairwise distinct. A closed path implicitly connects its last
/// cell back to the first; the repeat is not stored.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    cells: Vec<Cell>,
    closed: bool,
    anchors: Option<(Side, Side)>,
    size_jitter: HashMap<Cell, f32>,
}

impl Path {
    /// Creates an open path from cells.
    pub fn open(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Default::default()
        }
    }

    /// Creates a closed loop from cells.
    pub fn closed(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            closed: true,
            ..Default::default()
        }
    }

    /// Marks the first and last cells as boundary anchors on the given sides.
    pub fn with_anchors(mut self, start: Side, end: Side) -> Self {
        self.anchors = Some((start, end));
        self
    }

    /// Attaches per-cell size jitter values.
    pub fn with_size_jitter(mut self, jitter: HashMap<Cell, f32>) -> Self {
        self.size_jitter = jitter;
        self
    }

    /// The cells in order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if the last cell connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sides of the start and end anchors, if the path is anchored.
    pub fn anchors(&self) -> Option<(Side, Side)> {
        self.anchors
    }

    /// Returns true if the cell at `index` is a boundary anchor.
    pub fn is_anchor(&self, index: usize) -> bool {
        self.anchors.is_some()
            && !self.cells.is_empty()
            && (index == 0 || index == self.cells.len() - 1)
    }

    /// Number of segments: `len - 1` when open, `len` when closed.
    pub fn segment_count(&self) -> usize {
        match self.cells.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Consecutive cell pairs, wrapping around for closed paths.
    pub fn segments(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        let n = self.cells.len();
        (0..self.segment_count()).map(move |i| (self.cells[i], self.cells[(i + 1) % n]))
    }

    /// Size jitter for a cell, or 1.0 when none was assigned.
    pub fn size_jitter(&self, cell: Cell) -> f32 {
        self.size_jitter.get(&cell).copied().unwrap_or(1.0)
    }
}
