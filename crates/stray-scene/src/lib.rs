//! Scene session for stray.
//!
//! [`Scene`] owns a [`SceneConfig`](stray_core::SceneConfig), the current
//! [`PathState`] and an optional union capability. Each call to
//! [`Scene::frame`] runs sampling and compositing from scratch and returns a
//! [`Frame`] for the renderer. Only structural parameter changes rebuild the
//! path.

mod scene;
mod state;

pub use scene::{Frame, MIN_UNION_SPACING, Scene, ShapeLayer};
pub use state::PathState;
