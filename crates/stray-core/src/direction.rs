//! Allowed moves between consecutive path cells.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::grid::Cell;

/// Geometric relation required between consecutive path cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectionMode {
    /// No constraint.
    #[default]
    Any,
    /// Shared row xor shared column.
    Orthogonal,
    /// Equal, non-zero row and column distance.
    Diagonal,
    /// Orthogonal or diagonal.
    OrthogonalOrDiagonal,
}

impl DirectionMode {
    /// Returns true if moving from `a` to `b` satisfies this mode.
    pub fn allows(self, a: Cell, b: Cell) -> bool {
        match self {
            DirectionMode::Any => true,
            DirectionMode::Orthogonal => is_orthogonal(a, b),
            DirectionMode::Diagonal => is_diagonal(a, b),
            DirectionMode::OrthogonalOrDiagonal => is_orthogonal(a, b) || is_diagonal(a, b),
        }
    }

    /// Returns true if orthogonal moves are allowed.
    pub fn has_orthogonal(self) -> bool {
        matches!(
            self,
            DirectionMode::Orthogonal | DirectionMode::OrthogonalOrDiagonal
        )
    }

    /// Returns true if diagonal moves are allowed.
    pub fn has_diagonal(self) -> bool {
        matches!(
            self,
            DirectionMode::Diagonal | DirectionMode::OrthogonalOrDiagonal
        )
    }

    /// The option string used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionMode::Any => "any",
            DirectionMode::Orthogonal => "90",
            DirectionMode::Diagonal => "45",
            DirectionMode::OrthogonalOrDiagonal => "90+45",
        }
    }
}

fn is_orthogonal(a: Cell, b: Cell) -> bool {
    (a.row == b.row) != (a.col == b.col)
}

fn is_diagonal(a: Cell, b: Cell) -> bool {
    let (dr, dc) = a.delta(b);
    dr != 0 && dr.abs() == dc.abs()
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectionMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "any" => Ok(DirectionMode::Any),
            "90" => Ok(DirectionMode::Orthogonal),
            "45" => Ok(DirectionMode::Diagonal),
            "90+45" => Ok(DirectionMode::OrthogonalOrDiagonal),
            other => Err(ParseError::unknown("path direction", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal() {
        let mode = DirectionMode::Orthogonal;
        assert!(mode.allows(Cell::new(1, 1), Cell::new(1, 4)));
        assert!(mode.allows(Cell::new(1, 1), Cell::new(3, 1)));
        assert!(!mode.allows(Cell::new(1, 1), Cell::new(2, 2)));
        assert!(!mode.allows(Cell::new(1, 1), Cell::new(1, 1)));
    }

    #[test]
    fn test_diagonal() {
        let mode = DirectionMode::Diagonal;
        assert!(mode.allows(Cell::new(1, 1), Cell::new(3, 3)));
        assert!(mode.allows(Cell::new(3, 0), Cell::new(0, 3)));
        assert!(!mode.allows(Cell::new(1, 1), Cell::new(1, 3)));
        assert!(!mode.allows(Cell::new(2, 2), Cell::new(2, 2)));
    }

    #[test]
    fn test_orthogonal_or_diagonal() {
        let mode = DirectionMode::OrthogonalOrDiagonal;
        assert!(mode.allows(Cell::new(0, 0), Cell::new(0, 5)));
        assert!(mode.allows(Cell::new(0, 0), Cell::new(4, 4)));
        assert!(!mode.allows(Cell::new(0, 0), Cell::new(1, 2)));
    }

    #[test]
    fn test_any_allows_everything() {
        assert!(DirectionMode::Any.allows(Cell::new(0, 0), Cell::new(1, 2)));
    }

    #[test]
    fn test_parse_round_trip() {
        for mode in [
            DirectionMode::Any,
            DirectionMode::Orthogonal,
            DirectionMode::Diagonal,
            DirectionMode::OrthogonalOrDiagonal,
        ] {
            assert_eq!(mode.as_str().parse::<DirectionMode>().ok(), Some(mode));
        }
        assert!("sideways".parse::<DirectionMode>().is_err());
    }
}
