/// Camera state and perspective projection
use nalgebra::Point3;

/// Initial and post-reset dolly distance
pub const DEFAULT_ZOOM: f32 = 5.0;
/// Dolly clamp range; the lower bound keeps the camera out of the mesh,
/// where the perspective factor would blow up
pub const ZOOM_MIN: f32 = 3.0;
pub const ZOOM_MAX: f32 = 25.0;

/// Rotation state about the two interactive axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Horizontal-drag axis; unclamped, free continuous spin
    pub yaw: f32,
    /// Vertical-drag axis; clamped to [-pi/2, pi/2] to avoid gimbal flip
    pub pitch: f32,
}

impl RotationState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn zero() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotate a point in a plane by `radians`
pub fn rotate2d(x: f32, y: f32, radians: f32) -> (f32, f32) {
    let (s, c) = radians.sin_cos();
    (x * c - y * s, x * s + y * c)
}

/// Screen-space framing derived from the surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width: f32,
    pub height: f32,
    pub cx: f32,
    pub cy: f32,
    /// Effective field of view: min(width, height) times the camera's
    /// fov multiplier
    pub fov: f32,
}

impl ScreenGeometry {
    /// `surface_width`/`surface_height` are raw surface pixels; the
    /// camera contributes its resolution scale and fov multiplier.
    pub fn new(surface_width: f32, surface_height: f32, camera: &CameraState) -> Self {
        let width = surface_width * camera.res_scale;
        let height = surface_height * camera.res_scale;
        Self {
            width,
            height,
            cx: width / 2.0,
            cy: height / 2.0,
            fov: width.min(height) * camera.fov_multiplier,
        }
    }
}

/// A vertex after projection: screen position plus camera-space depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// Interactive camera: orbit rotation, dolly distance, and the framing
/// scalars that shape the projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub rotation: RotationState,
    /// Distance of the camera behind the scene along the view axis
    pub zoom: f32,
    pub fov_multiplier: f32,
    pub res_scale: f32,
}

impl CameraState {
    pub fn new(fov_multiplier: f32, res_scale: f32) -> Self {
        Self {
            rotation: RotationState::zero(),
            zoom: DEFAULT_ZOOM,
            fov_multiplier,
            res_scale,
        }
    }

    /// Rotate a point by the current orientation. The (x, z) plane is
    /// rotated by yaw first; pitch then rotates the (y, z) plane using
    /// the z that yaw produced. The two steps are sequential, not
    /// independent axis rotations, and the order is load-bearing.
    pub fn rotate3d(&self, p: &Point3<f32>) -> Point3<f32> {
        let (x, z) = rotate2d(p.x, p.z, self.rotation.yaw);
        let (y, z) = rotate2d(p.y, z, self.rotation.pitch);
        Point3::new(x, y, z)
    }

    /// Project a 3D point into screen space. Depth is camera-space z
    /// after the dolly offset; it grows away from the viewer. A depth
    /// near zero would make the perspective factor unbounded, but the
    /// zoom clamp keeps that out of normal operation.
    pub fn project(&self, p: &Point3<f32>, screen: &ScreenGeometry) -> ProjectedPoint {
        let rotated = self.rotate3d(p);
        let depth = rotated.z + self.zoom;
        let f = screen.fov / depth;
        ProjectedPoint {
            x: rotated.x * f + screen.cx,
            y: rotated.y * f + screen.cy,
            depth,
        }
    }
}
