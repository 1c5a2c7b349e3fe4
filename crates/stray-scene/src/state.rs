//! Path snapshots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::Path;
use stray_procgen::PathGenerator;

/// The current path and the settings it was generated from.
///
/// A state is never edited. Regeneration builds a new one and swaps it in
/// whole, so a frame always sees a complete path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathState {
    path: Path,
    generator: PathGenerator,
    generation: u64,
}

impl PathState {
    pub(crate) fn new(path: Path, generator: PathGenerator, generation: u64) -> Self {
        Self {
            path,
            generator,
            generation,
        }
    }

    /// The generated path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings that produced the path.
    pub fn generator(&self) -> &PathGenerator {
        &self.generator
    }

    /// Counts regenerations, starting at 0 for the first path.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if a generator with these settings would build a different
    /// kind of path.
    pub fn is_stale(&self, generator: &PathGenerator) -> bool {
        self.generator != *generator
    }
}
