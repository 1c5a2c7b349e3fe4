//! Scene parameters.
//!
//! [`SceneConfig`] holds every parameter the path and shape pipeline reads.
//! Length-valued parameters are authored against a 500 unit grid and scaled
//! by [`SceneConfig::scale_factor`] when the grid is drawn at another size.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::DirectionMode;
use crate::error::{ConfigError, ParseError};
use crate::grid::Grid;

/// Grid size that unscaled parameter values are authored against.
pub const BASE_GRID_SIZE: f32 = 500.0;

/// Smallest vertex count for ellipse approximations.
pub const MIN_ELLIPSE_RESOLUTION: usize = 8;

/// How shapes are distributed between consecutive path cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathType {
    /// Linear interpolation between cell centers.
    #[default]
    Straight,
    /// Bezier bend with a perpendicular control offset.
    Curved,
    /// Linear interpolation; joints are drawn as one continuous line.
    Continuous,
}

impl PathType {
    /// The option string used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            PathType::Straight => "straight",
            PathType::Curved => "curved",
            PathType::Continuous => "continuous",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "straight" => Ok(PathType::Straight),
            "curved" => Ok(PathType::Curved),
            "continuous" => Ok(PathType::Continuous),
            other => Err(ParseError::unknown("path type", other)),
        }
    }
}

/// Outline used for each placed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    #[default]
    Rectangle,
    /// Ellipse approximated by a regular polygon.
    Ellipse,
}

impl ShapeKind {
    /// The option string used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            other => Err(ParseError::unknown("shape type", other)),
        }
    }
}

/// Named parameter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StylePreset {
    /// Plain defaults.
    #[default]
    Default,
    /// Thick curved stroke, no shapes.
    Paint,
    /// Fused grid-aligned rectangles.
    Stairs,
    /// Small noisy fused rectangles.
    Pixel,
    /// Ellipses along the path.
    Pipe,
    /// Large noisy fused ellipses.
    Cloud,
    /// Small scattered ellipses on a gentle curve.
    Bubbles,
    /// Oversized shapes on a curve.
    Smoke,
    /// Right-angle path of rectangles.
    Square,
}

impl StylePreset {
    /// All presets.
    pub const ALL: [StylePreset; 9] = [
        StylePreset::Default,
        StylePreset::Paint,
        StylePreset::Stairs,
        StylePreset::Pixel,
        StylePreset::Pipe,
        StylePreset::Cloud,
        StylePreset::Bubbles,
        StylePreset::Smoke,
        StylePreset::Square,
    ];

    /// The preset name.
    pub fn as_str(self) -> &'static str {
        match self {
            StylePreset::Default => "default",
            StylePreset::Paint => "paint",
            StylePreset::Stairs => "stairs",
            StylePreset::Pixel => "pixel",
            StylePreset::Pipe => "pipe",
            StylePreset::Cloud => "cloud",
            StylePreset::Bubbles => "bubbles",
            StylePreset::Smoke => "smoke",
            StylePreset::Square => "square",
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylePreset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        StylePreset::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| ParseError::unknown("style preset", name))
    }
}

/// All parameters consumed by path generation, sampling and compositing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    // -- Grid --
    /// Number of columns.
    pub grid_width: usize,
    /// Number of rows.
    pub grid_height: usize,
    /// Side length of the square grid domain.
    pub grid_size: f32,
    /// How far shapes may extend past the grid edge (unscaled).
    pub grid_padding: f32,

    // -- Path --
    /// Requested number of path cells.
    pub selected_cells: usize,
    /// Allowed moves between consecutive cells.
    pub path_direction: DirectionMode,
    /// Use each row and column at most once.
    pub unique_rows_cols: bool,
    /// Pin the path ends to edge midpoints.
    pub include_sides: bool,
    /// Connect the last cell back to the first.
    pub closed_loop: bool,
    /// Interpolation between cells.
    pub path_type: PathType,
    /// Distance between consecutive shapes (unscaled).
    pub path_shape_spacing: f32,
    /// Place one shape per crossed cell instead of spacing along the path.
    pub align_shapes_to_grid: bool,
    /// Curve bend relative to segment length, `[0, 1]`.
    pub curve_amount: f32,
    /// Keep curves from leaving the grid.
    pub constrain_to_grid: bool,
    /// Fillet radius for path line corners (unscaled). 0 = sharp.
    pub path_corner_radius: f32,

    // -- Shapes --
    /// Outline of each shape.
    pub shape_type: ShapeKind,
    /// Vertex count for ellipses.
    pub ellipse_resolution: usize,
    /// Shape size relative to one cell.
    pub shape_size: f32,
    /// Maximum position displacement (unscaled). 0 = off.
    pub position_noise: f32,
    /// Relative size variation. 0 = off.
    pub size_noise: f32,
    /// Fuse overlapping shapes into one outline.
    pub boolean_union: bool,

    // -- Visibility --
    /// Produce shapes.
    pub show_shape: bool,
    /// Produce the path line.
    pub show_path: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_width: 7,
            grid_height: 7,
            grid_size: BASE_GRID_SIZE,
            grid_padding: 10.0,
            selected_cells: 5,
            path_direction: DirectionMode::Any,
            unique_rows_cols: false,
            include_sides: true,
            closed_loop: false,
            path_type: PathType::Straight,
            path_shape_spacing: 1.0,
            align_shapes_to_grid: false,
            curve_amount: 0.5,
            constrain_to_grid: true,
            path_corner_radius: 0.0,
            shape_type: ShapeKind::Rectangle,
            ellipse_resolution: 64,
            shape_size: 1.0,
            position_noise: 0.0,
            size_noise: 0.0,
            boolean_union: false,
            show_shape: true,
            show_path: false,
        }
    }
}

impl SceneConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid dimensions.
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid_height = rows;
        self.grid_width = cols;
        self
    }

    /// Sets the grid domain size.
    pub fn with_grid_size(mut self, size: f32) -> Self {
        self.grid_size = size;
        self
    }

    /// Sets the requested cell count.
    pub fn with_selected_cells(mut self, count: usize) -> Self {
        self.selected_cells = count;
        self
    }

    /// Sets the direction constraint.
    pub fn with_direction(mut self, direction: DirectionMode) -> Self {
        self.path_direction = direction;
        self
    }

    /// Enables or disables unique rows and columns.
    pub fn with_unique_rows_cols(mut self, unique: bool) -> Self {
        self.unique_rows_cols = unique;
        self
    }

    /// Enables or disables edge anchors.
    pub fn with_sides(mut self, include_sides: bool) -> Self {
        self.include_sides = include_sides;
        self
    }

    /// Enables or disables loop closing.
    pub fn with_closed_loop(mut self, closed: bool) -> Self {
        self.closed_loop = closed;
        self
    }

    /// Sets the interpolation mode.
    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    /// Sets the shape spacing (unscaled).
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.path_shape_spacing = spacing;
        self
    }

    /// Sets the curve bend amount.
    pub fn with_curve_amount(mut self, amount: f32) -> Self {
        self.curve_amount = amount;
        self
    }

    /// Sets the shape outline.
    pub fn with_shape(mut self, kind: ShapeKind) -> Self {
        self.shape_type = kind;
        self
    }

    /// Sets position and size noise.
    pub fn with_noise(mut self, position: f32, size: f32) -> Self {
        self.position_noise = position;
        self.size_noise = size;
        self
    }

    /// Enables or disables shape fusion.
    pub fn with_union(mut self, union: bool) -> Self {
        self.boolean_union = union;
        self
    }

    /// Returns a fresh configuration for a preset.
    ///
    /// Every parameter is reset to its default before the preset is applied,
    /// except `grid_size`, which follows the drawing surface rather than the style.
    pub fn with_preset(&self, preset: StylePreset) -> Self {
        let mut config = SceneConfig {
            grid_size: self.grid_size,
            ..SceneConfig::default()
        };

        match preset {
            StylePreset::Default => {}
            StylePreset::Paint => {
                config.show_shape = false;
                config.show_path = true;
                config.path_type = PathType::Curved;
                config.curve_amount = 0.05;
                config.selected_cells = 10;
            }
            StylePreset::Stairs => {
                config.boolean_union = true;
                config.shape_size = 1.1;
                config.align_shapes_to_grid = true;
                config.selected_cells = 5;
                config.shape_type = ShapeKind::Rectangle;
                config.show_path = false;
            }
            StylePreset::Pixel => {
                config.boolean_union = true;
                config.position_noise = 10.0;
                config.size_noise = 0.5;
                config.selected_cells = 8;
                config.shape_size = 0.5;
                config.shape_type = ShapeKind::Rectangle;
                config.show_path = false;
            }
            StylePreset::Pipe => {
                config.shape_type = ShapeKind::Ellipse;
                config.selected_cells = 8;
            }
            StylePreset::Cloud => {
                config.shape_type = ShapeKind::Ellipse;
                config.boolean_union = true;
                config.position_noise = 50.0;
                config.size_noise = 0.5;
                config.shape_size = 0.8;
            }
            StylePreset::Bubbles => {
                config.shape_type = ShapeKind::Ellipse;
                config.position_noise = 50.0;
                config.size_noise = 0.5;
                config.shape_size = 0.2;
                config.path_type = PathType::Curved;
                config.curve_amount = 0.1;
                config.path_shape_spacing = 2.0;
            }
            StylePreset::Smoke => {
                config.selected_cells = 7;
                config.path_type = PathType::Curved;
                config.curve_amount = 0.3;
                config.shape_size = 1.3;
            }
            StylePreset::Square => {
                config.shape_size = 0.9;
                config.selected_cells = 15;
                config.path_direction = DirectionMode::Orthogonal;
            }
        }

        config
    }

    /// The grid described by this configuration.
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_height, self.grid_width, self.grid_size)
    }

    /// Ratio of the current grid size to [`BASE_GRID_SIZE`].
    pub fn scale_factor(&self) -> f32 {
        self.grid_size / BASE_GRID_SIZE
    }

    /// Shape spacing in grid units.
    pub fn scaled_spacing(&self) -> f32 {
        self.path_shape_spacing * self.scale_factor()
    }

    /// Position noise in grid units.
    pub fn scaled_position_noise(&self) -> f32 {
        self.position_noise * self.scale_factor()
    }

    /// Padding in grid units.
    pub fn scaled_padding(&self) -> f32 {
        self.grid_padding * self.scale_factor()
    }

    /// Path corner radius in grid units.
    pub fn scaled_corner_radius(&self) -> f32 {
        self.path_corner_radius * self.scale_factor()
    }

    /// Checks every parameter against its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.grid_height,
                cols: self.grid_width,
            });
        }
        if self.selected_cells < 2 {
            return Err(ConfigError::TooFewCells(self.selected_cells));
        }
        positive("path_shape_spacing", self.path_shape_spacing)?;
        positive("shape_size", self.shape_size)?;
        non_negative("grid_size", self.grid_size)?;
        non_negative("grid_padding", self.grid_padding)?;
        non_negative("position_noise", self.position_noise)?;
        non_negative("size_noise", self.size_noise)?;
        non_negative("path_corner_radius", self.path_corner_radius)?;
        if !(0.0..=1.0).contains(&self.curve_amount) {
            return Err(ConfigError::CurveAmountOutOfRange(self.curve_amount));
        }
        if self.ellipse_resolution < MIN_ELLIPSE_RESOLUTION {
            return Err(ConfigError::EllipseResolution {
                min: MIN_ELLIPSE_RESOLUTION,
                got: self.ellipse_resolution,
            });
        }
        Ok(())
    }

    /// Returns a copy with every parameter clamped into its legal range.
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        config.grid_width = config.grid_width.max(1);
        config.grid_height = config.grid_height.max(1);
        config.selected_cells = config.selected_cells.max(2);
        config.ellipse_resolution = config.ellipse_resolution.max(MIN_ELLIPSE_RESOLUTION);
        config.curve_amount = clamp_or(config.curve_amount, 0.0, 1.0, 0.0);
        config.grid_size = clamp_or(config.grid_size, 0.0, f32::MAX, BASE_GRID_SIZE);
        config.grid_padding = clamp_or(config.grid_padding, 0.0, f32::MAX, 0.0);
        config.position_noise = clamp_or(config.position_noise, 0.0, f32::MAX, 0.0);
        config.size_noise = clamp_or(config.size_noise, 0.0, f32::MAX, 0.0);
        config.path_corner_radius = clamp_or(config.path_corner_radius, 0.0, f32::MAX, 0.0);
        if !(config.path_shape_spacing > 0.0) {
            config.path_shape_spacing = SceneConfig::default().path_shape_spacing;
        }
        if !(config.shape_size > 0.0) {
            config.shape_size = SceneConfig::default().shape_size;
        }
        config
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Clamps a value, replacing NaN with `fallback`.
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
