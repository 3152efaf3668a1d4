/// Engine orchestration: the per-tick render pipeline
use std::time::{Duration, Instant};

use log::info;
use nalgebra::Point2;
use serde::Deserialize;

use crate::depth::painter_order;
use crate::geometry::Mesh;
use crate::motion::{InputEvent, MotionState};
use crate::projection::{CameraState, ProjectedPoint, ScreenGeometry};

/// An RGB color forwarded to the surface with each draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Face fill color
pub const FILL_COLOR: Rgb = Rgb::new(0x22, 0x22, 0x22);
/// Edge stroke color, one shade lighter than the fill
pub const STROKE_COLOR: Rgb = Rgb::new(0x44, 0x44, 0x44);

const LINE_WIDTH: f32 = 1.0;

/// Drawing surface the engine renders into. Implementations own the
/// actual pixel (or cell) store; the engine only hands them closed
/// polygons in frame coordinates.
pub trait Surface {
    /// Current raw surface size in pixels
    fn size(&self) -> (f32, f32);

    /// Start a frame: adopt the given frame dimensions and wipe the
    /// backing store
    fn clear(&mut self, width: f32, height: f32);

    /// Draw one closed, filled and stroked polygon
    fn draw_polygon(&mut self, points: &[Point2<f32>], fill: Rgb, stroke: Rgb, line_width: f32);
}

/// Recognized engine settings. Deserialization fills missing keys with
/// defaults and ignores unrecognized ones.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target ticks per second
    #[serde(rename = "FPS")]
    pub fps: u32,
    /// Field-of-view multiplier applied to min(width, height)
    #[serde(rename = "FOV")]
    pub fov_multiplier: f32,
    /// Surface resolution multiplier
    #[serde(rename = "resScale")]
    pub res_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            fov_multiplier: 1.0,
            res_scale: 1.0,
        }
    }
}

/// The viewer engine: owns the mesh, camera, and motion state, and runs
/// the per-tick pipeline against a surface. One explicit instance; the
/// surface adapter feeds it events and ticks.
pub struct Engine {
    mesh: Mesh,
    camera: CameraState,
    motion: MotionState,
    events: Vec<InputEvent>,
    fps: u32,
    last_tick: Option<Instant>,
}

impl Engine {
    pub fn new(mesh: Mesh, config: EngineConfig) -> Self {
        info!(
            "engine ready: {} vertices, {} triangles, {} fps target",
            mesh.vertices().len(),
            mesh.triangles().len(),
            config.fps
        );
        Self {
            mesh,
            camera: CameraState::new(config.fov_multiplier, config.res_scale),
            motion: MotionState::new(),
            events: Vec::new(),
            fps: config.fps,
            last_tick: None,
        }
    }

    /// Queue a raw input event for the next tick. The queue is drained
    /// in arrival order before integration, so every event received
    /// ahead of a tick is reflected in that tick.
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Duration of one target frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Run one tick against the wall clock
    pub fn tick<S: Surface>(&mut self, surface: &mut S) {
        let now = Instant::now();
        let delta_ms = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32() * 1000.0);
        self.last_tick = Some(now);
        self.step(delta_ms, surface);
    }

    /// One tick with an explicit elapsed time: refresh screen geometry,
    /// drain events, integrate motion, project vertices, depth-sort,
    /// and draw back-to-front. Each triangle is its own draw call.
    pub fn step<S: Surface>(&mut self, delta_ms: f32, surface: &mut S) {
        let (surface_width, surface_height) = surface.size();
        let screen = ScreenGeometry::new(surface_width, surface_height, &self.camera);

        for event in self.events.drain(..) {
            self.motion.apply(event, &mut self.camera);
        }
        self.motion.integrate(&mut self.camera, delta_ms);

        let projected: Vec<ProjectedPoint> = self
            .mesh
            .vertices()
            .iter()
            .map(|vertex| self.camera.project(vertex, &screen))
            .collect();

        surface.clear(screen.width, screen.height);
        for triangle_index in painter_order(self.mesh.triangles(), &projected) {
            let triangle = &self.mesh.triangles()[triangle_index];
            let points = triangle
                .indices
                .map(|index| Point2::new(projected[index].x, projected[index].y));
            surface.draw_polygon(&points, FILL_COLOR, STROKE_COLOR, LINE_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RESET_KEY;
    use crate::projection::DEFAULT_ZOOM;

    /// Records draw calls instead of rasterizing them
    struct MockSurface {
        width: f32,
        height: f32,
        cleared: Vec<(f32, f32)>,
        polygons: Vec<Vec<Point2<f32>>>,
    }

    impl MockSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                cleared: Vec::new(),
                polygons: Vec::new(),
            }
        }
    }

    impl Surface for MockSurface {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self, width: f32, height: f32) {
            self.cleared.push((width, height));
            self.polygons.clear();
        }

        fn draw_polygon(
            &mut self,
            points: &[Point2<f32>],
            _fill: Rgb,
            _stroke: Rgb,
            _line_width: f32,
        ) {
            self.polygons.push(points.to_vec());
        }
    }

    fn demo_config() -> EngineConfig {
        EngineConfig {
            fov_multiplier: 0.8,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.fps, 60);
        assert!((config.fov_multiplier - 1.0).abs() < 1e-6);
        assert!((config.res_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_config_missing_keys_use_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"FOV": 0.8}"#).unwrap();
        assert_eq!(config.fps, 60);
        assert!((config.fov_multiplier - 0.8).abs() < 1e-6);
        assert!((config.res_scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_config_unknown_keys_ignored() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"FPS": 30, "antialias": true, "theme": "dark"}"#).unwrap();
        assert_eq!(config.fps, 30);
    }

    #[test]
    fn test_frame_interval() {
        let engine = Engine::new(Mesh::cube(2.0), EngineConfig::default());
        assert_eq!(engine.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn test_step_draws_every_triangle() {
        let mut engine = Engine::new(Mesh::cube(2.0), demo_config());
        let mut surface = MockSurface::new(800.0, 600.0);
        engine.step(0.0, &mut surface);
        assert_eq!(surface.cleared, vec![(800.0, 600.0)]);
        assert_eq!(surface.polygons.len(), 12);
        for polygon in &surface.polygons {
            assert_eq!(polygon.len(), 3);
        }
    }

    #[test]
    fn test_back_face_drawn_before_front_face() {
        // Unit-cube scenario: rotation (0,0), zoom 5, FOV 0.8, 800x600.
        // Front-face vertices sit at z = -1 (depth 4), back-face at
        // z = +1 (depth 6). fov = 480, so the front face projects with
        // factor 480/4 = 120 and the back face with 480/6 = 80. The
        // farther back face must be painted first, the front face last.
        let mut engine = Engine::new(Mesh::cube(2.0), demo_config());
        let mut surface = MockSurface::new(800.0, 600.0);
        engine.step(0.0, &mut surface);

        let offset_from_center = |polygon: &[Point2<f32>]| -> f32 {
            polygon
                .iter()
                .map(|p| (p.x - 400.0).abs().max((p.y - 300.0).abs()))
                .fold(0.0, f32::max)
        };

        for polygon in &surface.polygons[..2] {
            assert!((offset_from_center(polygon) - 80.0).abs() < 1e-3);
        }
        for polygon in &surface.polygons[10..] {
            assert!((offset_from_center(polygon) - 120.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_events_apply_before_integration() {
        let mut engine = Engine::new(Mesh::cube(2.0), demo_config());
        let mut surface = MockSurface::new(800.0, 600.0);
        engine.push_event(InputEvent::PointerMove {
            x: 0.0,
            y: 0.0,
            buttons_held: true,
        });
        engine.push_event(InputEvent::PointerMove {
            x: 500.0,
            y: 0.0,
            buttons_held: true,
        });
        engine.step(16.0, &mut surface);
        // 0.1 velocity over 16 ms advances yaw within the same tick
        assert!((engine.camera().rotation.yaw - 0.1 * 16.0 / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_event_restores_view() {
        let mut engine = Engine::new(Mesh::cube(2.0), demo_config());
        let mut surface = MockSurface::new(800.0, 600.0);
        engine.push_event(InputEvent::PointerMove {
            x: 0.0,
            y: 0.0,
            buttons_held: true,
        });
        engine.push_event(InputEvent::PointerMove {
            x: 300.0,
            y: 200.0,
            buttons_held: true,
        });
        engine.push_event(InputEvent::Scroll {
            wheel_delta: Some(240.0),
            detail: None,
        });
        engine.step(16.0, &mut surface);
        engine.push_event(InputEvent::KeyPress { key: RESET_KEY });
        engine.step(16.0, &mut surface);
        assert!((engine.camera().zoom - DEFAULT_ZOOM).abs() < 1e-6);
        assert!(engine.camera().rotation.yaw.abs() < 1e-6);
        assert!(engine.camera().rotation.pitch.abs() < 1e-6);
    }
}
