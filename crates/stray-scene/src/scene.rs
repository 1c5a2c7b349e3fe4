//! The per-frame pipeline.

use rand::Rng;
use rand::rngs::ThreadRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stray_core::{ConfigError, SceneConfig, StylePreset};
use stray_noise::{PositionNoise, SizeNoise};
use stray_procgen::PathGenerator;
use stray_vector::{
    Compositor, CurveSolver, GeoUnion, PathLine, Polygon, PolygonUnion, ShapePlacement,
    ShapeSampler,
};
use tracing::debug;

use crate::state::PathState;

/// Minimum shape spacing while fusing, before scaling.
pub const MIN_UNION_SPACING: f32 = 10.0;

/// Shapes handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeLayer {
    /// One entry per shape, drawn separately.
    Placements(Vec<ShapePlacement>),
    /// The fused outline, or `None` if nothing drawable survived.
    Fused(Option<Polygon>),
}

/// Everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// The path line, when `show_path` is set.
    pub path: Option<PathLine>,
    /// The shapes, when `show_shape` is set.
    pub shapes: Option<ShapeLayer>,
}

/// A session: configuration, the current path, and the union capability.
///
/// The path survives across frames until a structural parameter changes
/// (grid dimensions, cell count, direction, uniqueness, side anchors or
/// loop closure). Everything else is recomputed by [`Scene::frame`].
///
/// ```
/// use stray_core::{SceneConfig, StylePreset};
/// use stray_scene::{Scene, ShapeLayer};
///
/// let mut scene = Scene::new(SceneConfig::default());
/// scene.apply_preset(StylePreset::Pixel);
///
/// let frame = scene.frame();
/// assert!(matches!(frame.shapes, Some(ShapeLayer::Fused(_))));
/// ```
#[derive(Debug)]
pub struct Scene<U = GeoUnion, R = ThreadRng> {
    config: SceneConfig,
    state: PathState,
    compositor: Compositor<U>,
    rng: R,
}

impl Scene {
    /// A scene with `geo` union and a platform-seeded generator.
    ///
    /// Out-of-range parameters are clamped.
    pub fn new(config: SceneConfig) -> Self {
        Self::with_parts(config, Some(GeoUnion), rand::rng())
    }

    /// Like [`Scene::new`], but rejects out-of-range parameters.
    pub fn try_new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// A scene that never fuses shapes, whatever the configuration says.
    pub fn without_fusion(config: SceneConfig) -> Self {
        Self::with_parts(config, None, rand::rng())
    }
}

impl<R: Rng> Scene<GeoUnion, R> {
    /// A scene with `geo` union and a caller-supplied generator.
    pub fn with_rng(config: SceneConfig, rng: R) -> Self {
        Self::with_parts(config, Some(GeoUnion), rng)
    }
}

impl<U: PolygonUnion, R: Rng> Scene<U, R> {
    /// A scene with an explicit union capability and generator.
    pub fn with_parts(config: SceneConfig, union: Option<U>, mut rng: R) -> Self {
        let config = config.normalized();
        let generator = PathGenerator::from(&config);
        let path = generator.generate_with_rng(&mut rng);
        debug!(cells = path.len(), "path generated");

        Self {
            compositor: Compositor::from_config(&config, union),
            state: PathState::new(path, generator, 0),
            config,
            rng,
        }
    }

    /// The current, normalized configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The current path snapshot.
    pub fn path_state(&self) -> &PathState {
        &self.state
    }

    /// Replaces the configuration.
    ///
    /// Returns true if the change was structural and the path was rebuilt.
    pub fn set_config(&mut self, config: SceneConfig) -> bool {
        let config = config.normalized();
        let generator = PathGenerator::from(&config);
        self.compositor.shape = config.shape_type;
        self.compositor.ellipse_resolution = config.ellipse_resolution;
        self.config = config;

        if self.state.is_stale(&generator) {
            self.rebuild(generator);
            true
        } else {
            false
        }
    }

    /// Switches to a style preset. See [`SceneConfig::with_preset`].
    pub fn apply_preset(&mut self, preset: StylePreset) -> bool {
        let config = self.config.with_preset(preset);
        self.set_config(config)
    }

    /// Builds a new path with the current settings.
    pub fn regenerate(&mut self) {
        self.rebuild(PathGenerator::from(&self.config));
    }

    fn rebuild(&mut self, generator: PathGenerator) {
        let path = generator.generate_with_rng(&mut self.rng);
        let generation = self.state.generation() + 1;
        debug!(cells = path.len(), generation, "path regenerated");
        self.state = PathState::new(path, generator, generation);
    }

    /// Computes everything to draw for the current path and settings.
    pub fn frame(&self) -> Frame {
        let config = &self.config;
        let path = self.state.path();

        let line = config.show_path.then(|| {
            PathLine::trace(
                path,
                &config.grid(),
                config.path_type,
                config.scaled_corner_radius(),
                &CurveSolver::from_config(config),
            )
        });

        Frame {
            path: line,
            shapes: config.show_shape.then(|| self.shapes()),
        }
    }

    fn shapes(&self) -> ShapeLayer {
        let config = &self.config;

        let fusion = if config.boolean_union {
            let fusion = self.compositor.fusion();
            if fusion.is_none() {
                debug!("union requested without a union capability, drawing shapes separately");
            }
            fusion
        } else {
            None
        };

        let mut sampler = ShapeSampler::from_config(config);
        if fusion.is_some() {
            sampler = sampler.with_min_spacing(MIN_UNION_SPACING * config.scale_factor());
        }

        let placements = sampler.sample(
            self.state.path(),
            &PositionNoise::new(config.scaled_position_noise()),
            &SizeNoise::new(config.size_noise),
        );

        match fusion {
            Some(fusion) => ShapeLayer::Fused(fusion.union_all(self.compositor.polygons(&placements))),
            None => ShapeLayer::Placements(placements),
        }
    }
}
