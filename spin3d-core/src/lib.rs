/// Spin3D Core Library - Projection, depth sorting and motion integration
///
/// This library provides the renderer-agnostic core of the wireframe
/// viewer: mesh geometry, the per-frame pipeline (integrate damped
/// motion, project vertices, depth-sort triangles, emit draw calls),
/// and the engine object that orchestrates it against a surface adapter.

pub mod depth;
pub mod engine;
pub mod geometry;
pub mod motion;
pub mod projection;

// Re-export commonly used types
pub use engine::{Engine, EngineConfig, Rgb, Surface, FILL_COLOR, STROKE_COLOR};
pub use geometry::{Mesh, MeshError, Triangle};
pub use motion::{InputEvent, MotionState, RESET_KEY};
pub use projection::{CameraState, ProjectedPoint, RotationState, ScreenGeometry};
