//! Shape placement along a path.
//!
//! [`ShapeSampler`] walks each segment of a [`Path`] and emits one
//! [`ShapePlacement`] per step. Samples are spaced by arc length on straight
//! segments, by curve parameter on curved ones, or snapped to the cells a
//! segment crosses in grid-aligned mode.
//!
//! Sampling is a pure function of its inputs: the same path, settings and
//! noise give bit-identical placements.

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::{Grid, Path, PathType, SceneConfig};
use stray_noise::{OffsetNoise, ScaleNoise};

use crate::bezier::shared_control_point;
use crate::curve::CurveSolver;

/// Smallest spacing the sampler will use.
pub const MIN_SPACING: f32 = 0.1;

/// A single shape instance before it becomes a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapePlacement {
    /// Center x in grid units.
    pub x: f32,
    /// Center y in grid units.
    pub y: f32,
    /// Half of the shape's width after size noise.
    pub half_width: f32,
    /// Half of the shape's height after size noise.
    pub half_height: f32,
    /// Arc-length fraction of the whole path, `[0, 1]`.
    pub path_progress: f32,
    /// Index of the path segment this sample belongs to.
    pub segment_index: usize,
    /// Sample index within the segment, or `row * cols + col` when
    /// snapped to a cell.
    pub step_index: usize,
}

impl ShapePlacement {
    /// Center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Half width and half height.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }
}

/// Samples shape placements along a path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeSampler {
    /// Grid the path lives on.
    pub grid: Grid,
    /// Straight, curved or continuous interpolation.
    pub path_type: PathType,
    /// Distance between samples in grid units.
    pub spacing: f32,
    /// Shape size relative to a cell.
    pub shape_size: f32,
    /// How far shapes may extend past the grid edge.
    pub padding: f32,
    /// Snap shapes to the cells each segment crosses.
    pub align_to_grid: bool,
    /// Control-point solver for curved paths.
    pub curve: CurveSolver,
}

impl Default for ShapeSampler {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl ShapeSampler {
    /// Sampler settings for a configuration, with lengths already scaled.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            grid: config.grid(),
            path_type: config.path_type,
            spacing: config.scaled_spacing(),
            shape_size: config.shape_size,
            padding: config.scaled_padding(),
            align_to_grid: config.align_shapes_to_grid,
            curve: CurveSolver::from_config(config),
        }
    }

    /// Raises the spacing to at least `min`.
    pub fn with_min_spacing(mut self, min: f32) -> Self {
        self.spacing = self.spacing.max(min);
        self
    }

    /// Emits placements for every segment of `path`.
    ///
    /// Position noise moves interior samples only, so segment joints stay on
    /// the cell centers. Size noise applies to every sample.
    pub fn sample(
        &self,
        path: &Path,
        position: &impl OffsetNoise,
        size: &impl ScaleNoise,
    ) -> Vec<ShapePlacement> {
        let segments: Vec<(Vec2, Vec2)> = path
            .segments()
            .map(|(a, b)| (self.grid.cell_center(a), self.grid.cell_center(b)))
            .collect();

        if segments.is_empty() {
            // A lone cell still gets its shape.
            return path
                .cells()
                .first()
                .map(|&cell| self.place(self.grid.cell_center(cell), 0.0, 0, 0, size))
                .into_iter()
                .collect();
        }

        let lengths: Vec<f32> = segments.iter().map(|(a, b)| a.distance(*b)).collect();
        let total: f32 = lengths.iter().sum();

        let mut placements = Vec::new();
        let mut accumulated = 0.0_f32;
        for (index, (&(start, end), &length)) in segments.iter().zip(&lengths).enumerate() {
            let progress = |t: f32| {
                if total > 0.0 {
                    ((accumulated + length * t) / total).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            };

            if self.align_to_grid {
                self.sample_cells(start, end, index, progress, size, &mut placements);
            } else {
                self.sample_segment(
                    start,
                    end,
                    length,
                    index,
                    progress,
                    position,
                    size,
                    &mut placements,
                );
            }
            accumulated += length;
        }
        placements
    }

    #[allow(clippy::too_many_arguments)]
    fn sample_segment(
        &self,
        start: Vec2,
        end: Vec2,
        length: f32,
        segment: usize,
        progress: impl Fn(f32) -> f32,
        position: &impl OffsetNoise,
        size: &impl ScaleNoise,
        out: &mut Vec<ShapePlacement>,
    ) {
        let spacing = self.spacing.max(MIN_SPACING);
        let intervals = (length / spacing).floor() as usize;

        let (steps, control) = match self.path_type {
            PathType::Curved => (
                (intervals * 2).max(1),
                Some(self.curve.control_point(start, end)),
            ),
            PathType::Straight | PathType::Continuous => (intervals.max(1), None),
        };

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let mut point = match control {
                Some(control) => shared_control_point(start, control, end, t),
                None => start * (1.0 - t) + end * t,
            };
            if step > 0 && step < steps {
                point += position.offset(segment, step);
            }
            out.push(self.place(point, progress(t), segment, step, size));
        }
    }

    fn sample_cells(
        &self,
        start: Vec2,
        end: Vec2,
        segment: usize,
        progress: impl Fn(f32) -> f32,
        size: &impl ScaleNoise,
        out: &mut Vec<ShapePlacement>,
    ) {
        let direction = end - start;
        let length_sq = direction.length_squared();

        for cell in self.grid.cells_along(start, end) {
            let center = self.grid.cell_center(cell);
            let t = if length_sq > 0.0 {
                ((center - start).dot(direction) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let step = cell.row * self.grid.cols + cell.col;
            out.push(self.place(center, progress(t), segment, step, size));
        }
    }

    /// Sizes a sample and pushes it back inside the padded grid.
    fn place(
        &self,
        point: Vec2,
        path_progress: f32,
        segment: usize,
        step: usize,
        size: &impl ScaleNoise,
    ) -> ShapePlacement {
        let half = self.grid.cell_half_extent() * self.shape_size * size.factor(segment, step);
        let low = -self.padding;
        let high = self.grid.size + self.padding;

        ShapePlacement {
            x: clamp_into(point.x, half.x, low, high),
            y: clamp_into(point.y, half.y, low, high),
            half_width: half.x,
            half_height: half.y,
            path_progress,
            segment_index: segment,
            step_index: step,
        }
    }
}

/// Translates a center so `[center - half, center + half]` stays in
/// `[low, high]`. The low edge wins when the extent does not fit.
fn clamp_into(center: f32, half: f32, low: f32, high: f32) -> f32 {
    if center - half < low {
        low + half
    } else if center + half > high {
        high - half
    } else {
        center
    }
}
