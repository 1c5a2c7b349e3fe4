//! Fusing shape outlines into one silhouette.
//!
//! The exact union of two polygons is delegated to a [`PolygonUnion`]
//! implementation. [`GeoUnion`] wraps `geo`'s boolean operations.
//! [`Compositor`] turns placements into polygons and, when it holds a union
//! capability, hands out a [`Fusion`] that merges many polygons while
//! tolerating failures of the primitive.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use stray_vector::{Compositor, GeoUnion, Polygon, ShapeKind};
//!
//! let compositor = Compositor::new(ShapeKind::Rectangle, 64, Some(GeoUnion));
//! let fusion = compositor.fusion().expect("union capability");
//!
//! let a = Polygon::rect(Vec2::new(0.5, 0.5), Vec2::splat(0.5));
//! let b = Polygon::rect(Vec2::new(1.0, 0.5), Vec2::splat(0.5));
//! let fused = fusion.union_all(vec![a, b]).unwrap();
//! assert_eq!(fused.region_count(), 1);
//! assert!((fused.area() - 1.5).abs() < 1e-4);
//! ```

use std::panic::{self, AssertUnwindSafe};

use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Coord, Intersects, LineString, MultiPolygon, Point};
use glam::Vec2;
use stray_core::{SceneConfig, ShapeKind};
use thiserror::Error;
use tracing::warn;

use crate::polygon::{Polygon, build_polygon, region_signed_area};
use crate::sampler::ShapePlacement;

/// Inputs up to this count are folded left to right.
pub const FOLD_LIMIT: usize = 10;

/// Errors from a union primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnionError {
    /// The primitive failed on this input.
    #[error("union failed: {0}")]
    Failed(String),

    /// An input had a NaN or infinite coordinate.
    #[error("polygon has a non-finite coordinate")]
    NonFinite,
}

/// Exact union of two polygons.
pub trait PolygonUnion {
    /// Union of `a` and `b`, or an error if the computation failed.
    fn union(&self, a: &Polygon, b: &Polygon) -> Result<Polygon, UnionError>;
}

impl<F> PolygonUnion for F
where
    F: Fn(&Polygon, &Polygon) -> Result<Polygon, UnionError>,
{
    fn union(&self, a: &Polygon, b: &Polygon) -> Result<Polygon, UnionError> {
        self(a, b)
    }
}

// ============================================================================
// geo backend
// ============================================================================

/// Union backed by [`geo::BooleanOps`].
///
/// Output regions are counter-clockwise outer loops and clockwise holes.
/// Panics inside the primitive are caught and reported as
/// [`UnionError::Failed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoUnion;

impl PolygonUnion for GeoUnion {
    fn union(&self, a: &Polygon, b: &Polygon) -> Result<Polygon, UnionError> {
        let a = to_multi_polygon(a)?;
        let b = to_multi_polygon(b)?;

        let merged = panic::catch_unwind(AssertUnwindSafe(|| BooleanOps::union(&a, &b)))
            .map_err(|payload| UnionError::Failed(panic_message(payload.as_ref())))?;

        Ok(from_multi_polygon(&merged.orient(Direction::Default)))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in boolean operation".to_string()
    }
}

fn to_line_string(region: &[Vec2]) -> LineString<f64> {
    LineString::new(
        region
            .iter()
            .map(|p| Coord {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect(),
    )
}

/// Groups loops into polygons: counter-clockwise loops are exteriors,
/// clockwise loops become holes of the first exterior that contains them.
/// A clockwise loop with no container is treated as an exterior.
fn to_multi_polygon(polygon: &Polygon) -> Result<MultiPolygon<f64>, UnionError> {
    let regions: Vec<&Vec<Vec2>> = polygon.regions.iter().filter(|r| r.len() >= 3).collect();
    if regions.iter().flat_map(|r| r.iter()).any(|p| !p.is_finite()) {
        return Err(UnionError::NonFinite);
    }

    let (outers, holes): (Vec<_>, Vec<_>) = regions
        .into_iter()
        .partition(|r| region_signed_area(r) >= 0.0);

    let mut shells: Vec<(LineString<f64>, Vec<LineString<f64>>)> = outers
        .into_iter()
        .map(|r| (to_line_string(r), Vec::new()))
        .collect();

    for hole in holes {
        let probe = Point::new(hole[0].x as f64, hole[0].y as f64);
        let ring = to_line_string(hole);
        let container = shells
            .iter_mut()
            .find(|(exterior, _)| geo::Polygon::new(exterior.clone(), vec![]).intersects(&probe));
        match container {
            Some((_, interiors)) => interiors.push(ring),
            None => shells.push((ring, Vec::new())),
        }
    }

    Ok(MultiPolygon::new(
        shells
            .into_iter()
            .map(|(exterior, interiors)| geo::Polygon::new(exterior, interiors))
            .collect(),
    ))
}

fn ring_points(ring: &LineString<f64>) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = ring
        .coords()
        .map(|c| Vec2::new(c.x as f32, c.y as f32))
        .collect();
    // geo rings repeat the first point at the end.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn from_multi_polygon(multi: &MultiPolygon<f64>) -> Polygon {
    let mut regions = Vec::new();
    for polygon in multi.iter() {
        regions.push(ring_points(polygon.exterior()));
        regions.extend(polygon.interiors().iter().map(ring_points));
    }
    Polygon::new(regions)
}

// ============================================================================
// Compositor
// ============================================================================

/// Builds polygons for placements and optionally fuses them.
#[derive(Debug, Clone)]
pub struct Compositor<U> {
    /// Outline used for every placement.
    pub shape: ShapeKind,
    /// Vertex count for ellipses, before the minimum is applied.
    pub ellipse_resolution: usize,
    union: Option<U>,
}

impl<U: PolygonUnion> Compositor<U> {
    /// Creates a compositor. Pass `None` to disable fusion.
    pub fn new(shape: ShapeKind, ellipse_resolution: usize, union: Option<U>) -> Self {
        Self {
            shape,
            ellipse_resolution,
            union,
        }
    }

    /// Shape settings from a configuration.
    pub fn from_config(config: &SceneConfig, union: Option<U>) -> Self {
        Self::new(config.shape_type, config.ellipse_resolution, union)
    }

    /// One polygon per placement, skipping shapes too small to draw.
    pub fn polygons(&self, placements: &[ShapePlacement]) -> Vec<Polygon> {
        placements
            .iter()
            .filter_map(|p| build_polygon(p, self.shape, self.ellipse_resolution))
            .collect()
    }

    /// The fusion step, if this compositor has a union capability.
    pub fn fusion(&self) -> Option<Fusion<'_, U>> {
        self.union.as_ref().map(|union| Fusion { union })
    }

    /// True if a union capability was supplied.
    pub fn has_fusion(&self) -> bool {
        self.union.is_some()
    }
}

/// Merges polygons with a borrowed union primitive.
#[derive(Debug, Clone, Copy)]
pub struct Fusion<'a, U> {
    union: &'a U,
}

impl<U: PolygonUnion> Fusion<'_, U> {
    /// Unions every polygon into one.
    ///
    /// Up to [`FOLD_LIMIT`] inputs are folded left to right and the fold
    /// stops at the first failure, keeping what it has. Larger inputs are
    /// split in half recursively, and a failed join keeps its left half.
    ///
    /// Regions with fewer than three vertices are removed from the result.
    /// Returns `None` when no valid region remains.
    pub fn union_all(&self, polygons: Vec<Polygon>) -> Option<Polygon> {
        let valid: Vec<Polygon> = polygons.into_iter().filter(Polygon::is_valid).collect();

        let merged = if valid.len() > FOLD_LIMIT {
            self.divide(valid)
        } else {
            self.fold(valid)
        };
        merged.and_then(Polygon::filter_degenerate)
    }

    fn fold(&self, polygons: Vec<Polygon>) -> Option<Polygon> {
        let mut polygons = polygons.into_iter();
        let mut acc = polygons.next()?;

        for next in polygons {
            if !acc.is_valid() {
                acc = next;
                continue;
            }
            match self.union.union(&acc, &next) {
                Ok(merged) => acc = merged,
                Err(err) => {
                    warn!(%err, "union failed, keeping partial result");
                    break;
                }
            }
        }
        Some(acc)
    }

    fn divide(&self, mut polygons: Vec<Polygon>) -> Option<Polygon> {
        if polygons.len() <= 1 {
            return polygons.pop();
        }
        let right = polygons.split_off(polygons.len() / 2);
        let left = self.divide(polygons);
        let right = self.divide(right);

        match (left, right) {
            (None, other) | (other, None) => other,
            (Some(left), Some(right)) => match self.union.union(&left, &right) {
                Ok(merged) => Some(merged),
                Err(err) => {
                    warn!(%err, "union failed, keeping left half");
                    Some(left)
                }
            },
        }
    }
}
