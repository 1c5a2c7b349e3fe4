//! Error types for stray-core.

use thiserror::Error;

/// Error when an option string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseError {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Errors reported by [`SceneConfig::validate`](crate::SceneConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Grid has a zero dimension.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid {
        /// Rows requested.
        rows: usize,
        /// Columns requested.
        cols: usize,
    },

    /// Fewer than two cells requested.
    #[error("selected cells must be at least 2, got {0}")]
    TooFewCells(usize),

    /// A value that must be strictly positive was not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A value that must be non-negative was negative or NaN.
    #[error("{name} must be non-negative, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// Curve amount outside `[0, 1]`.
    #[error("curve amount must be within [0, 1], got {0}")]
    CurveAmountOutOfRange(f32),

    /// Ellipse resolution below the minimum vertex count.
    #[error("ellipse resolution must be at least {min}, got {got}")]
    EllipseResolution {
        /// Minimum accepted value.
        min: usize,
        /// Rejected value.
        got: usize,
    },
}
