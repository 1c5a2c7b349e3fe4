//! Shape outlines.

use std::f32::consts::TAU;

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::{MIN_ELLIPSE_RESOLUTION, ShapeKind};

use crate::sampler::ShapePlacement;

/// Placements with a half extent below this are dropped.
pub const MIN_HALF_EXTENT: f32 = 0.1;

/// One or more closed point loops.
///
/// Loops are stored without a repeated closing point. Generated shapes are a
/// single counter-clockwise loop (positive signed area with y up). Union
/// output may also contain clockwise loops, which are holes.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Point loops, outer loops counter-clockwise and holes clockwise.
    pub regions: Vec<Vec<Vec2>>,
}

impl Polygon {
    /// A polygon from existing loops.
    pub fn new(regions: Vec<Vec<Vec2>>) -> Self {
        Self { regions }
    }

    /// A polygon with a single loop.
    pub fn from_region(points: Vec<Vec2>) -> Self {
        Self {
            regions: vec![points],
        }
    }

    /// Axis-aligned rectangle, counter-clockwise.
    pub fn rect(center: Vec2, half: Vec2) -> Self {
        Self::from_region(vec![
            Vec2::new(center.x - half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y + half.y),
            Vec2::new(center.x - half.x, center.y + half.y),
        ])
    }

    /// Regular `n`-gon inscribed in an axis-aligned ellipse.
    pub fn ellipse(center: Vec2, half: Vec2, n: usize) -> Self {
        let points = (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * TAU;
                center + Vec2::new(angle.cos() * half.x, angle.sin() * half.y)
            })
            .collect();
        Self::from_region(points)
    }

    /// The point loops.
    pub fn regions(&self) -> &[Vec<Vec2>] {
        &self.regions
    }

    /// Number of loops, holes included.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Total vertices over all loops.
    pub fn vertex_count(&self) -> usize {
        self.regions.iter().map(Vec::len).sum()
    }

    /// True if at least one region has three or more vertices.
    pub fn is_valid(&self) -> bool {
        self.regions.iter().any(|r| r.len() >= 3)
    }

    /// Drops regions with fewer than three vertices.
    ///
    /// Returns `None` if nothing is left.
    pub fn filter_degenerate(mut self) -> Option<Self> {
        self.regions.retain(|r| r.len() >= 3);
        (!self.regions.is_empty()).then_some(self)
    }

    /// Minimum and maximum corner over all regions.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut points = self.regions.iter().flatten();
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), &p| (min.min(p), max.max(p))))
    }

    /// Sum of the regions' signed areas. Holes subtract.
    pub fn signed_area(&self) -> f32 {
        self.regions.iter().map(|r| region_signed_area(r)).sum()
    }

    /// Enclosed area.
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }
}

/// Shoelace area of one loop. Positive for counter-clockwise loops.
pub fn region_signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// Outline for a single placement.
///
/// Returns `None` for shapes too small to draw. Ellipses use at least
/// [`MIN_ELLIPSE_RESOLUTION`] vertices.
pub fn build_polygon(
    placement: &ShapePlacement,
    kind: ShapeKind,
    ellipse_resolution: usize,
) -> Option<Polygon> {
    let half = placement.half_extent();
    if !(half.x >= MIN_HALF_EXTENT && half.y >= MIN_HALF_EXTENT) {
        return None;
    }
    let center = placement.center();
    Some(match kind {
        ShapeKind::Rectangle => Polygon::rect(center, half),
        ShapeKind::Ellipse => {
            Polygon::ellipse(center, half, ellipse_resolution.max(MIN_ELLIPSE_RESOLUTION))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(half: f32) -> ShapePlacement {
        ShapePlacement {
            x: 10.0,
            y: 20.0,
            half_width: half,
            half_height: half,
            path_progress: 0.0,
            segment_index: 0,
            step_index: 0,
        }
    }

    #[test]
    fn test_rectangle_is_ccw() {
        let polygon = build_polygon(&placement(2.0), ShapeKind::Rectangle, 64).unwrap();
        assert_eq!(polygon.vertex_count(), 4);
        assert!((polygon.signed_area() - 16.0).abs() < 1e-4);
        assert_eq!(
            polygon.bounds(),
            Some((Vec2::new(8.0, 18.0), Vec2::new(12.0, 22.0)))
        );
    }

    #[test]
    fn test_ellipse_resolution_floor() {
        let coarse = build_polygon(&placement(2.0), ShapeKind::Ellipse, 3).unwrap();
        assert_eq!(coarse.vertex_count(), MIN_ELLIPSE_RESOLUTION);
        let fine = build_polygon(&placement(2.0), ShapeKind::Ellipse, 64).unwrap();
        assert_eq!(fine.vertex_count(), 64);
        assert!(fine.signed_area() > 0.0);
        // A 64-gon is close to the circle.
        assert!((fine.area() - std::f32::consts::PI * 4.0).abs() < 0.05);
    }

    #[test]
    fn test_tiny_shapes_dropped() {
        assert!(build_polygon(&placement(0.05), ShapeKind::Rectangle, 64).is_none());
        assert!(build_polygon(&placement(-1.0), ShapeKind::Ellipse, 64).is_none());
        assert!(build_polygon(&placement(0.1), ShapeKind::Rectangle, 64).is_some());
    }

    #[test]
    fn test_filter_degenerate() {
        let polygon = Polygon::new(vec![
            vec![Vec2::ZERO, Vec2::X],
            vec![Vec2::ZERO, Vec2::X, Vec2::ONE],
        ]);
        let filtered = polygon.filter_degenerate().unwrap();
        assert_eq!(filtered.region_count(), 1);

        let empty = Polygon::new(vec![vec![Vec2::ZERO]]);
        assert!(!empty.is_valid());
        assert!(empty.filter_degenerate().is_none());
    }

    #[test]
    fn test_hole_subtracts() {
        let mut outer = Polygon::rect(Vec2::ZERO, Vec2::splat(2.0));
        let mut hole = Polygon::rect(Vec2::ZERO, Vec2::splat(1.0)).regions.remove(0);
        hole.reverse();
        outer.regions.push(hole);
        assert!((outer.area() - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(Polygon::default().bounds(), None);
    }
}
