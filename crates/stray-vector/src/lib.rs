//! Geometry along stray paths.
//!
//! - [`curve`] - bounded control offsets for curved segments
//! - [`ShapeSampler`] - shape placements along a path, with noise
//! - [`Polygon`] and [`build_polygon`] - outlines for placements
//! - [`Compositor`] and [`Fusion`] - optional union into one silhouette
//! - [`PathLine`] - the path itself as line, bend and corner pieces

pub mod bezier;
pub mod curve;
mod line;
mod polygon;
mod sampler;
mod union;

pub use curve::{
    CURVE_PROBE_STEPS, CURVE_SEARCH_ITERATIONS, CurveControlOffset, CurveSolver,
    curve_escapes_grid, solve_curve_offset,
};
pub use line::{PathLine, StrokeSegment};
pub use polygon::{MIN_HALF_EXTENT, Polygon, build_polygon, region_signed_area};
pub use sampler::{MIN_SPACING, ShapePlacement, ShapeSampler};
pub use stray_core::ShapeKind;
pub use union::{Compositor, FOLD_LIMIT, Fusion, GeoUnion, PolygonUnion, UnionError};
