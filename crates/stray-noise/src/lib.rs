//! Deterministic noise for shape placement.
//!
//! Every value is a pure function of `(segment, step)`: the index of the
//! path segment and the index of the sample within it. Rendering the same
//! path twice gives the same jitter, so shapes hold still from frame to frame.
//!
//! The hashes are sums of sines and cosines. They only need to look
//! irregular and to be reproducible, not to be uniform.
//!
//! ```
//! use stray_noise::{OffsetNoise, PositionNoise, ScaleNoise, SizeNoise};
//!
//! let position = PositionNoise::new(10.0);
//! let a = position.offset(2, 5);
//! assert_eq!(a, position.offset(2, 5));
//! assert!(a.length() <= 10.0 + 1e-4);
//!
//! let size = SizeNoise::new(0.5);
//! let f = size.factor(2, 5);
//! assert!((0.5..=1.5).contains(&f));
//! ```

use std::f32::consts::TAU;

use glam::Vec2;

// =============================================================================
// Traits
// =============================================================================

/// A displacement keyed by segment and step.
pub trait OffsetNoise {
    /// Offset to add to the sample position.
    fn offset(&self, segment: usize, step: usize) -> Vec2;
}

/// A size multiplier keyed by segment and step.
pub trait ScaleNoise {
    /// Factor to multiply the shape extent by.
    fn factor(&self, segment: usize, step: usize) -> f32;
}

impl<F: Fn(usize, usize) -> Vec2> OffsetNoise for F {
    fn offset(&self, segment: usize, step: usize) -> Vec2 {
        self(segment, step)
    }
}

impl<F: Fn(usize, usize) -> f32> ScaleNoise for F {
    fn factor(&self, segment: usize, step: usize) -> f32 {
        self(segment, step)
    }
}

// =============================================================================
// Raw hashes
// =============================================================================

/// Unscaled position jitter for a sample.
///
/// Returns a vector of length at most 1 at a pseudo-random angle.
pub fn position_jitter(segment: usize, step: usize) -> Vec2 {
    let seed = (segment * 1000 + step) as f32;

    let random_x = ((seed * 0.123).sin() + (seed * 0.456).cos()) * 0.5;
    let random_y = ((seed * 0.789).sin() + (seed * 0.321).cos()) * 0.5;

    let angle = random_x * TAU;
    let distance = random_y.abs();

    Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Raw size jitter for a sample, in `[-0.95, 0.95]`.
pub fn size_jitter(segment: usize, step: usize) -> f32 {
    let seed = segment as f32 * 1031.0 + step as f32 * 491.0 + 127.753;

    let n1 = (seed * 0.567).sin() * 0.5;
    let n2 = (seed * 0.891 + 2.31).cos() * 0.3;
    let n3 = (seed * 0.247 - 1.53).sin() * 0.2;

    (n1 + n2 + n3).clamp(-0.95, 0.95)
}

// =============================================================================
// Scaled noise
// =============================================================================

/// Position noise with a maximum displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionNoise {
    /// Largest displacement, in grid units. 0 disables the noise.
    pub amount: f32,
}

impl PositionNoise {
    /// Creates position noise with the given maximum displacement.
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    /// Position noise that never displaces.
    pub fn none() -> Self {
        Self::default()
    }
}

impl OffsetNoise for PositionNoise {
    fn offset(&self, segment: usize, step: usize) -> Vec2 {
        if self.amount <= 0.0 {
            return Vec2::ZERO;
        }
        position_jitter(segment, step) * self.amount
    }
}

/// Size noise with a relative strength.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeNoise {
    /// Relative variation. Factors fall in roughly `[1 - amount, 1 + amount]`.
    pub amount: f32,
}

impl SizeNoise {
    /// Creates size noise with the given strength.
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    /// Size noise that always returns 1.
    pub fn none() -> Self {
        Self::default()
    }
}

impl ScaleNoise for SizeNoise {
    fn factor(&self, segment: usize, step: usize) -> f32 {
        if self.amount <= 0.0 {
            return 1.0;
        }
        1.0 + size_jitter(segment, step) * self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_jitter_is_bounded() {
        for segment in 0..20 {
            for step in 0..50 {
                assert!(position_jitter(segment, step).length() <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn test_position_jitter_varies() {
        let a = position_jitter(0, 1);
        let b = position_jitter(0, 2);
        let c = position_jitter(1, 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deterministic() {
        let noise = PositionNoise::new(25.0);
        assert_eq!(noise.offset(3, 7), noise.offset(3, 7));
        let size = SizeNoise::new(0.3);
        assert_eq!(size.factor(3, 7), size.factor(3, 7));
    }

    #[test]
    fn test_zero_amount_is_identity() {
        assert_eq!(PositionNoise::none().offset(4, 9), Vec2::ZERO);
        assert_eq!(SizeNoise::none().factor(4, 9), 1.0);
    }

    #[test]
    fn test_size_factor_range() {
        let noise = SizeNoise::new(0.5);
        for segment in 0..10 {
            for step in 0..40 {
                let f = noise.factor(segment, step);
                assert!(f >= 1.0 - 0.95 * 0.5 - 1e-6);
                assert!(f <= 1.0 + 0.95 * 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn test_closures_are_noise() {
        let fixed = |_: usize, _: usize| Vec2::new(1.0, 2.0);
        assert_eq!(fixed.offset(0, 0), Vec2::new(1.0, 2.0));
        let double = |_: usize, _: usize| 2.0_f32;
        assert_eq!(double.factor(5, 5), 2.0);
    }
}
