/// Input-to-motion integration with time-based damping
use std::f32::consts::FRAC_PI_2;

use log::debug;
use nalgebra::{Point2, Vector2};

use crate::projection::{CameraState, RotationState, DEFAULT_ZOOM, ZOOM_MAX, ZOOM_MIN};

/// Key that snaps the view back to its initial state
pub const RESET_KEY: char = ' ';

// Impulse scales per input unit
const DRAG_SCALE: f32 = 1.0 / 5000.0;
const WHEEL_SCALE: f32 = 1.0 / 500.0;
const DETAIL_SCALE: f32 = 1.0 / 10.0;
// Radians advanced per unit of velocity per millisecond
const SPIN_RATE: f32 = 1.0 / 5.0;
// Milliseconds over which a velocity decays to half-ish; dolly settles
// twice as fast as angular motion
const ANGULAR_DECAY_MS: f32 = 100.0;
const DOLLY_DECAY_MS: f32 = 50.0;

/// Raw input event, queued by the surface adapter and drained once per
/// tick in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to (x, y); `buttons_held` reports the primary button
    PointerMove { x: f32, y: f32, buttons_held: bool },
    /// Scroll impulse in one of two legacy wheel encodings. Exactly one
    /// field is populated per event; an absent or zero `detail` selects
    /// the wheel-delta branch.
    Scroll {
        wheel_delta: Option<f32>,
        detail: Option<f32>,
    },
    /// Key press; [`RESET_KEY`] triggers a hard view reset
    KeyPress { key: char },
}

/// Damped angular and dolly velocity driven by raw input.
///
/// Both axes follow the same shape: events accumulate impulses, and each
/// tick the accumulated velocity advances the camera and then decays
/// toward zero at a rate tied to real elapsed time, which keeps the
/// motion framerate-independent.
#[derive(Debug, Clone, Copy)]
pub struct MotionState {
    /// x drives yaw, y drives pitch
    velocity: Vector2<f32>,
    dolly: f32,
    dragging: bool,
    last_pointer: Option<Point2<f32>>,
}

impl MotionState {
    pub fn new() -> Self {
        Self {
            velocity: Vector2::zeros(),
            dolly: 0.0,
            dragging: false,
            last_pointer: None,
        }
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn dolly(&self) -> f32 {
        self.dolly
    }

    /// Apply one raw input event to the motion (and, for a reset, the
    /// camera) state.
    pub fn apply(&mut self, event: InputEvent, camera: &mut CameraState) {
        match event {
            InputEvent::PointerMove { x, y, buttons_held } => {
                let pos = Point2::new(x, y);
                let rel = self.last_pointer.map_or_else(Vector2::zeros, |prev| pos - prev);
                self.last_pointer = Some(pos);
                if buttons_held {
                    if !self.dragging {
                        // A fresh drag must not inherit velocity left
                        // over from the previous one
                        self.velocity = Vector2::zeros();
                        self.dragging = true;
                    }
                    self.velocity.x += rel.x * DRAG_SCALE;
                    self.velocity.y += rel.y * DRAG_SCALE;
                } else {
                    self.dragging = false;
                }
            }
            InputEvent::Scroll { wheel_delta, detail } => match detail {
                Some(d) if d != 0.0 => self.dolly += d * DETAIL_SCALE,
                _ => self.dolly -= wheel_delta.unwrap_or(0.0) * WHEEL_SCALE,
            },
            InputEvent::KeyPress { key } if key == RESET_KEY => self.reset(camera),
            InputEvent::KeyPress { .. } => {}
        }
    }

    /// Hard reset: snap camera and motion back to the initial view
    pub fn reset(&mut self, camera: &mut CameraState) {
        camera.zoom = DEFAULT_ZOOM;
        camera.rotation = RotationState::zero();
        self.velocity = Vector2::zeros();
        self.dolly = 0.0;
        debug!("view reset");
    }

    /// Advance the camera by the accumulated velocities over `delta_ms`
    /// elapsed milliseconds, then decay them and clamp the camera into
    /// its working range.
    pub fn integrate(&mut self, camera: &mut CameraState, delta_ms: f32) {
        camera.rotation.yaw += self.velocity.x * delta_ms * SPIN_RATE;
        self.velocity.x /= 1.0 + delta_ms / ANGULAR_DECAY_MS;
        camera.rotation.pitch += self.velocity.y * delta_ms * SPIN_RATE;
        self.velocity.y /= 1.0 + delta_ms / ANGULAR_DECAY_MS;

        camera.zoom += self.dolly;
        self.dolly /= 1.0 + delta_ms / DOLLY_DECAY_MS;

        camera.zoom = camera.zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        camera.rotation.pitch = camera.rotation.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}
