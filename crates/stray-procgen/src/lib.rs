//! Path generation for stray.
//!
//! [`PathGenerator`] picks an ordered run of grid cells under optional
//! direction, uniqueness and anchoring constraints. Seed it through
//! [`PathGenerator::generate_with_rng`] for reproducible output.

mod walk;

pub use walk::{PathGenerator, SIZE_JITTER_RANGE};
