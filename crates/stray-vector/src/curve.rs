//! Keeping curved segments inside the grid.
//!
//! A curved segment bends toward `midpoint + offset`. With a large curve
//! amount the bend can push shapes past the grid edge. The solver probes the
//! curve at 11 parameter values, widening each probe by half a cell, and
//! returns the largest usable offset: the desired one, its mirror image, or a
//! shortened copy found by bisection.

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::SceneConfig;

use crate::bezier::{perpendicular_offset, shared_control_point};

/// Number of probe intervals along a curve (11 probes).
pub const CURVE_PROBE_STEPS: usize = 10;

/// Bisection iterations when both orientations escape.
pub const CURVE_SEARCH_ITERATIONS: usize = 6;

/// Perpendicular displacement of a segment's control point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveControlOffset {
    /// Horizontal component.
    pub perp_x: f32,
    /// Vertical component.
    pub perp_y: f32,
}

impl CurveControlOffset {
    /// Creates an offset from its components.
    pub fn new(perp_x: f32, perp_y: f32) -> Self {
        Self { perp_x, perp_y }
    }

    /// The unconstrained offset for a segment at the given curve amount.
    pub fn desired(start: Vec2, end: Vec2, curve_amount: f32) -> Self {
        perpendicular_offset(start, end, curve_amount).into()
    }

    /// The offset as a vector.
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.perp_x, self.perp_y)
    }

    fn scaled(self, factor: f32) -> Self {
        Self::new(self.perp_x * factor, self.perp_y * factor)
    }
}

impl From<Vec2> for CurveControlOffset {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl std::ops::Neg for CurveControlOffset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.perp_x, -self.perp_y)
    }
}

/// Returns true if any probe of the curve, widened by `cell_half`, leaves
/// `[0, grid_size]` on either axis.
pub fn curve_escapes_grid(
    start: Vec2,
    end: Vec2,
    control: Vec2,
    cell_half: Vec2,
    grid_size: f32,
) -> bool {
    (0..=CURVE_PROBE_STEPS).any(|step| {
        let t = step as f32 / CURVE_PROBE_STEPS as f32;
        let p = shared_control_point(start, control, end, t);
        p.x - cell_half.x < 0.0
            || p.x + cell_half.x > grid_size
            || p.y - cell_half.y < 0.0
            || p.y + cell_half.y > grid_size
    })
}

/// Picks a control offset whose curve stays inside the grid.
///
/// Order of preference:
/// 1. `desired`, if it stays inside
/// 2. `-desired`, if only that one stays inside
/// 3. `desired * m` for the largest `m` in `[0, 1]` found by
///    [`CURVE_SEARCH_ITERATIONS`] bisection steps. `m` starts at 0 (a
///    straight segment), so the result is always a multiplier that was
///    checked or the straight line.
pub fn solve_curve_offset(
    start: Vec2,
    end: Vec2,
    midpoint: Vec2,
    desired: CurveControlOffset,
    cell_half: Vec2,
    grid_size: f32,
) -> CurveControlOffset {
    let offset = desired.as_vec2();
    let escapes = |control: Vec2| curve_escapes_grid(start, end, control, cell_half, grid_size);

    if !escapes(midpoint + offset) {
        return desired;
    }
    if !escapes(midpoint - offset) {
        return -desired;
    }

    let mut low = 0.0_f32;
    let mut high = 1.0_f32;
    let mut safe = 0.0_f32;
    for _ in 0..CURVE_SEARCH_ITERATIONS {
        let m = (low + high) / 2.0;
        if escapes(midpoint + offset * m) {
            high = m;
        } else {
            low = m;
            safe = m;
        }
    }
    desired.scaled(safe)
}

/// Curve settings for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveSolver {
    /// Bend strength, `[0, 1]`.
    pub curve_amount: f32,
    /// Run [`solve_curve_offset`] on every segment.
    pub constrain_to_grid: bool,
    /// Half the size of one cell.
    pub cell_half: Vec2,
    /// Side length of the square grid.
    pub grid_size: f32,
}

impl Default for CurveSolver {
    fn default() -> Self {
        Self {
            curve_amount: 0.5,
            constrain_to_grid: true,
            cell_half: Vec2::splat(500.0 / 14.0),
            grid_size: 500.0,
        }
    }
}

impl CurveSolver {
    /// Solver settings for a configuration.
    pub fn from_config(config: &SceneConfig) -> Self {
        let grid = config.grid();
        Self {
            curve_amount: config.curve_amount,
            constrain_to_grid: config.constrain_to_grid,
            cell_half: grid.cell_half_extent(),
            grid_size: grid.size,
        }
    }

    /// Control offset for the segment from `start` to `end`.
    pub fn offset(&self, start: Vec2, end: Vec2) -> CurveControlOffset {
        let desired = CurveControlOffset::desired(start, end, self.curve_amount);
        if !self.constrain_to_grid {
            return desired;
        }
        let midpoint = (start + end) * 0.5;
        solve_curve_offset(start, end, midpoint, desired, self.cell_half, self.grid_size)
    }

    /// Shared control point for the segment from `start` to `end`.
    pub fn control_point(&self, start: Vec2, end: Vec2) -> Vec2 {
        (start + end) * 0.5 + self.offset(start, end).as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GRID: f32 = 500.0;

    fn half() -> Vec2 {
        Vec2::splat(GRID / 14.0)
    }

    fn within(start: Vec2, end: Vec2, offset: CurveControlOffset, margin: Vec2) -> bool {
        let control = (start + end) * 0.5 + offset.as_vec2();
        (0..=CURVE_PROBE_STEPS).all(|step| {
            let p = shared_control_point(start, control, end, step as f32 / 10.0);
            p.x >= -margin.x
                && p.x <= GRID + margin.x
                && p.y >= -margin.y
                && p.y <= GRID + margin.y
        })
    }

    #[test]
    fn test_interior_segment_keeps_offset() {
        let start = Vec2::new(200.0, 250.0);
        let end = Vec2::new(300.0, 250.0);
        let desired = CurveControlOffset::desired(start, end, 0.5);
        let solved = solve_curve_offset(start, end, (start + end) * 0.5, desired, half(), GRID);
        assert_eq!(solved, desired);
    }

    #[test]
    fn test_inverts_at_edge() {
        // Along the top row the desired bend points up, out of the grid.
        let start = Vec2::new(300.0, GRID / 14.0);
        let end = Vec2::new(100.0, GRID / 14.0);
        let desired = CurveControlOffset::desired(start, end, 0.5);
        assert!(desired.perp_y < 0.0);
        let solved = solve_curve_offset(start, end, (start + end) * 0.5, desired, half(), GRID);
        assert_eq!(solved, -desired);
    }

    #[test]
    fn test_bisects_when_both_escape() {
        // A long horizontal segment in the middle row bends out either way.
        let y = GRID / 2.0;
        let start = Vec2::new(GRID / 14.0, y);
        let end = Vec2::new(GRID - GRID / 14.0, y);
        let desired = CurveControlOffset::desired(start, end, 1.0);
        let midpoint = (start + end) * 0.5;
        assert!(curve_escapes_grid(start, end, midpoint + desired.as_vec2(), half(), GRID));
        assert!(curve_escapes_grid(start, end, midpoint - desired.as_vec2(), half(), GRID));

        let solved = solve_curve_offset(start, end, midpoint, desired, half(), GRID);
        let ratio = solved.perp_y / desired.perp_y;
        assert!(ratio > 0.0 && ratio < 1.0);
        assert!(!curve_escapes_grid(start, end, midpoint + solved.as_vec2(), half(), GRID));
    }

    #[test]
    fn test_unconstrained_solver_skips_search() {
        let solver = CurveSolver {
            constrain_to_grid: false,
            curve_amount: 1.0,
            ..Default::default()
        };
        let start = Vec2::new(GRID / 14.0, GRID / 2.0);
        let end = Vec2::new(GRID - GRID / 14.0, GRID / 2.0);
        assert_eq!(solver.offset(start, end), CurveControlOffset::desired(start, end, 1.0));
    }

    #[test]
    fn test_control_point_straight_at_zero_amount() {
        let solver = CurveSolver {
            curve_amount: 0.0,
            ..Default::default()
        };
        let start = Vec2::new(100.0, 100.0);
        let end = Vec2::new(300.0, 200.0);
        assert_eq!(solver.control_point(start, end), (start + end) * 0.5);
    }

    proptest! {
        #[test]
        fn solved_curve_stays_near_grid(
            x1 in 0.0f32..GRID,
            y1 in 0.0f32..GRID,
            x2 in 0.0f32..GRID,
            y2 in 0.0f32..GRID,
            amount in 0.0f32..=1.0,
            hx in 1.0f32..(GRID / 2.0),
            hy in 1.0f32..(GRID / 2.0),
        ) {
            let start = Vec2::new(x1, y1);
            let end = Vec2::new(x2, y2);
            let cell_half = Vec2::new(hx, hy);
            let desired = CurveControlOffset::desired(start, end, amount);
            let solved = solve_curve_offset(start, end, (start + end) * 0.5, desired, cell_half, GRID);
            prop_assert!(within(start, end, solved, cell_half));
            prop_assert!(solved.as_vec2().length() <= desired.as_vec2().length() + 1e-3);
        }
    }
}
