//! The path itself as a stroke.

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::{Grid, Path, PathType};

use crate::bezier::{quadratic_point, shared_control_point};
use crate::curve::CurveSolver;

/// One piece of a traced path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrokeSegment {
    /// Straight line.
    Line { from: Vec2, to: Vec2 },
    /// Curved segment: a cubic with both inner control points at `control`.
    Bend { from: Vec2, control: Vec2, to: Vec2 },
    /// Rounded corner: a quadratic through the corner point.
    Corner { from: Vec2, control: Vec2, to: Vec2 },
}

impl StrokeSegment {
    /// First point of the segment.
    pub fn start(&self) -> Vec2 {
        match *self {
            Self::Line { from, .. } | Self::Bend { from, .. } | Self::Corner { from, .. } => from,
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Vec2 {
        match *self {
            Self::Line { to, .. } | Self::Bend { to, .. } | Self::Corner { to, .. } => to,
        }
    }

    /// Point at parameter `t` in `[0, 1]`.
    pub fn point(&self, t: f32) -> Vec2 {
        match *self {
            Self::Line { from, to } => from * (1.0 - t) + to * t,
            Self::Bend { from, control, to } => shared_control_point(from, control, to, t),
            Self::Corner { from, control, to } => quadratic_point(from, control, to, t),
        }
    }

    fn is_curved(&self) -> bool {
        !matches!(self, Self::Line { .. })
    }
}

/// A path traced through its cell centers.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathLine {
    /// Pieces in drawing order.
    pub segments: Vec<StrokeSegment>,
    /// Whether the last piece returns to the first cell.
    pub closed: bool,
}

impl PathLine {
    /// Traces `path` over `grid`.
    ///
    /// Curved paths bend every segment, using `curve` to keep the bends on
    /// the grid. Other paths are straight, with corners rounded by
    /// `corner_radius` (clamped to half of each adjacent segment) when it is
    /// positive. Rounding skips the first cell, which is also where a closed
    /// loop meets itself.
    pub fn trace(
        path: &Path,
        grid: &Grid,
        path_type: PathType,
        corner_radius: f32,
        curve: &CurveSolver,
    ) -> Self {
        let points: Vec<Vec2> = path.cells().iter().map(|&c| grid.cell_center(c)).collect();
        let closed = path.is_closed();

        let segments = match path_type {
            PathType::Curved => path
                .segments()
                .map(|(a, b)| {
                    let (from, to) = (grid.cell_center(a), grid.cell_center(b));
                    StrokeSegment::Bend {
                        from,
                        control: curve.control_point(from, to),
                        to,
                    }
                })
                .collect(),
            PathType::Straight | PathType::Continuous if corner_radius > 0.0 => {
                rounded(&points, closed, corner_radius)
            }
            PathType::Straight | PathType::Continuous => path
                .segments()
                .map(|(a, b)| StrokeSegment::Line {
                    from: grid.cell_center(a),
                    to: grid.cell_center(b),
                })
                .collect(),
        };

        Self { segments, closed }
    }

    /// True if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Where the stroke begins.
    pub fn start(&self) -> Option<Vec2> {
        self.segments.first().map(StrokeSegment::start)
    }

    /// Polyline approximation with `steps` subdivisions per curved piece.
    pub fn flatten(&self, steps: usize) -> Vec<Vec2> {
        let steps = steps.max(1);
        let Some(start) = self.start() else {
            return Vec::new();
        };

        let mut points = vec![start];
        for segment in &self.segments {
            if segment.is_curved() {
                points.extend((1..=steps).map(|i| segment.point(i as f32 / steps as f32)));
            } else {
                points.push(segment.end());
            }
        }
        points
    }
}

fn rounded(points: &[Vec2], closed: bool, radius: f32) -> Vec<StrokeSegment> {
    let mut points = points.to_vec();
    if closed && let Some(&first) = points.first() {
        points.push(first);
    }
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut cursor = first;
    for window in points.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        let incoming = corner - prev;
        let outgoing = next - corner;
        let (len_in, len_out) = (incoming.length(), outgoing.length());

        if len_in == 0.0 || len_out == 0.0 {
            push_line(&mut segments, cursor, corner);
            cursor = corner;
            continue;
        }

        let r = radius.min(len_in / 2.0).min(len_out / 2.0);
        let before = corner - incoming / len_in * r;
        let after = corner + outgoing / len_out * r;

        push_line(&mut segments, cursor, before);
        segments.push(StrokeSegment::Corner {
            from: before,
            control: corner,
            to: after,
        });
        cursor = after;
    }

    if let Some(&last) = points.last() {
        push_line(&mut segments, cursor, last);
    }
    segments
}

fn push_line(segments: &mut Vec<StrokeSegment>, from: Vec2, to: Vec2) {
    if from != to {
        segments.push(StrokeSegment::Line { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stray_core::Cell;

    fn grid() -> Grid {
        Grid::new(5, 5, 500.0)
    }

    fn trace(path: &Path, path_type: PathType, radius: f32) -> PathLine {
        PathLine::trace(path, &grid(), path_type, radius, &CurveSolver::default())
    }

    fn l_path() -> Path {
        Path::open(vec![Cell::new(0, 0), Cell::new(0, 2), Cell::new(2, 2)])
    }

    #[test]
    fn test_straight_lines() {
        let line = trace(&l_path(), PathType::Straight, 0.0);
        assert_eq!(line.segments.len(), 2);
        assert_eq!(
            line.flatten(8),
            vec![
                Vec2::new(50.0, 50.0),
                Vec2::new(250.0, 50.0),
                Vec2::new(250.0, 250.0)
            ]
        );
    }

    #[test]
    fn test_closed_straight_returns_home() {
        let path = Path::closed(l_path().cells().to_vec());
        let line = trace(&path, PathType::Straight, 0.0);
        assert_eq!(line.segments.len(), 3);
        assert_eq!(line.segments[2].end(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_rounded_corner() {
        let line = trace(&l_path(), PathType::Straight, 40.0);
        assert_eq!(line.segments.len(), 3);
        assert_eq!(
            line.segments[1],
            StrokeSegment::Corner {
                from: Vec2::new(210.0, 50.0),
                control: Vec2::new(250.0, 50.0),
                to: Vec2::new(250.0, 90.0),
            }
        );
    }

    #[test]
    fn test_corner_radius_clamped() {
        let line = trace(&l_path(), PathType::Straight, 1000.0);
        // Half of the 200-unit segments.
        assert_eq!(line.segments[0].end(), Vec2::new(150.0, 50.0));
        assert_eq!(line.segments[1].end(), Vec2::new(250.0, 150.0));
    }

    #[test]
    fn test_rounded_closed_loop() {
        let path = Path::closed(l_path().cells().to_vec());
        let line = trace(&path, PathType::Straight, 20.0);
        // Two rounded corners; the start cell stays sharp.
        let corners = line
            .segments
            .iter()
            .filter(|s| matches!(s, StrokeSegment::Corner { .. }))
            .count();
        assert_eq!(corners, 2);
        assert_eq!(line.segments.last().unwrap().end(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_curved_bends_stay_on_grid() {
        let solver = CurveSolver {
            curve_amount: 1.0,
            cell_half: grid().cell_half_extent(),
            grid_size: 500.0,
            constrain_to_grid: true,
        };
        let line = PathLine::trace(&l_path(), &grid(), PathType::Curved, 0.0, &solver);
        assert_eq!(line.segments.len(), 2);
        let flat = line.flatten(10);
        assert_eq!(flat.len(), 21);
        for p in flat {
            assert!(p.x >= 0.0 && p.x <= 500.0 && p.y >= 0.0 && p.y <= 500.0, "{p:?}");
        }
    }

    #[test]
    fn test_empty_path() {
        let line = trace(&Path::default(), PathType::Straight, 10.0);
        assert!(line.is_empty());
        assert!(line.flatten(4).is_empty());
    }
}
