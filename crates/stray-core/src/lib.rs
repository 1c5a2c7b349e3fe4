//! Core types for stray.
//!
//! This crate provides the types shared by the rest of the workspace:
//!
//! - [`Grid`] and [`Cell`] - the cell lattice and its coordinate mapping
//! - [`DirectionMode`] - allowed moves between consecutive path cells
//! - [`Path`] - an ordered cell sequence, open or closed
//! - [`SceneConfig`] - typed parameters, presets and validation

mod config;
mod direction;
mod error;
mod grid;
mod path;

pub use config::{
    BASE_GRID_SIZE, MIN_ELLIPSE_RESOLUTION, PathType, SceneConfig, ShapeKind, StylePreset,
};
pub use direction::DirectionMode;
pub use error::{ConfigError, ParseError};
pub use glam;
pub use grid::{Cell, Grid, Side};
pub use path::Path;
