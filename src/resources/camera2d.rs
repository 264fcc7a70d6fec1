//! 2D camera and the "current camera" slot.
//!
//! [`Camera`] owns a viewpoint (position, viewport, rotation, zoom) and a
//! cached 3×3 affine view matrix that is recomputed by every mutator, so a
//! read never observes a stale transform.
//!
//! [`CameraContext`] replaces a process-wide "current camera" global. Draw and
//! conversion calls take the context explicitly; render passes switch it
//! between a world camera and no camera (identity viewpoint, used for HUDs).
//!
//! Conventions
//! - Rotation is in radians. Positive values turn the view clockwise on screen
//!   (y grows downward).
//! - `screen = R(θ) · zoom · (world − position) + viewport / 2`

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;


/// Row-vector affine matrix: `[x, y, 1] · m`.
pub type ViewMatrix = [[f32; 3]; 3];

const IDENTITY: ViewMatrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// A movable, zoomable, rotatable viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
    viewport_width: f32,
    viewport_height: f32,
    rotation: f32,
    zoom: f32,
    matrix: ViewMatrix,
}

impl Camera {
    /// Create a camera centered on `(x, y)`.
    ///
    /// `zoom` must be greater than zero.
    pub fn new(
        x: f32,
        y: f32,
        viewport_width: f32,
        viewport_height: f32,
        rotation: f32,
        zoom: f32,
    ) -> Self {
        debug_assert!(zoom > 0.0, "camera zoom must be > 0, got {zoom}");
        let mut camera = Camera {
            x,
            y,
            viewport_width,
            viewport_height,
            rotation,
            zoom,
            matrix: IDENTITY,
        };
        camera.recalculate();
        camera
    }

    fn recalculate(&mut self) {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let z = self.zoom;
        let cx = self.viewport_width * 0.5;
        let cy = self.viewport_height * 0.5;

        self.matrix[0][0] = cos_r * z;
        self.matrix[0][1] = sin_r * z;
        self.matrix[0][2] = 0.0;

        self.matrix[1][0] = -sin_r * z;
        self.matrix[1][1] = cos_r * z;
        self.matrix[1][2] = 0.0;

        self.matrix[2][0] = z * (-cos_r * self.x + sin_r * self.y) + cx;
        self.matrix[2][1] = z * (-sin_r * self.x - cos_r * self.y) + cy;
        self.matrix[2][2] = 1.0;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        debug_assert!(zoom > 0.0, "camera zoom must be > 0, got {zoom}");
        self.zoom = zoom;
        self.recalculate();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.recalculate();
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.recalculate();
    }

    pub fn set_position_v(&mut self, target: Vector2) {
        self.set_position(target.x, target.y);
    }

    /// Resize the viewport, e.g. after a window resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.recalculate();
    }

    /// Pan by `(dx, dy)` world units.
    ///
    /// When both components are non-zero they are scaled by `1/√2` so that
    /// diagonal panning covers the same distance as axis-aligned panning.
    pub fn move_by(&mut self, mut dx: f32, mut dy: f32) {
        if dx != 0.0 && dy != 0.0 {
            let scale = std::f32::consts::FRAC_1_SQRT_2;
            dx *= scale;
            dy *= scale;
        }
        self.x += dx;
        self.y += dy;
        self.recalculate();
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn viewport(&self) -> Vector2 {
        Vector2::new(self.viewport_width, self.viewport_height)
    }

    pub fn matrix(&self) -> &ViewMatrix {
        &self.matrix
    }

    /// Map a world-space point to screen space through the cached matrix.
    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        let m = &self.matrix;
        Vector2::new(
            world.x * m[0][0] + world.y * m[1][0] + m[2][0],
            world.x * m[0][1] + world.y * m[1][1] + m[2][1],
        )
    }

    /// Map a screen-space point back to world space.
    ///
    /// Applies the inverse rotation and `1/zoom` to the offset from the
    /// viewport center, then translates by the camera position.
    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        let sx = screen.x - self.viewport_width * 0.5;
        let sy = screen.y - self.viewport_height * 0.5;
        let (sin_r, cos_r) = (-self.rotation).sin_cos();
        let inv_zoom = 1.0 / self.zoom;
        Vector2::new(
            (sx * cos_r - sy * sin_r) * inv_zoom + self.x,
            (sx * sin_r + sy * cos_r) * inv_zoom + self.y,
        )
    }
}

/// Owns the camera used by subsequent draw and conversion calls.
///
/// Mutate the current camera in place through
/// [`current_mut`](CameraContext::current_mut); conversions see the change
/// immediately. With no camera set, every conversion is the identity and zoom
/// reads as `1.0`.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraContext {
    current: Option<Camera>,
}

impl CameraContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with `camera` already current.
    pub fn with_camera(camera: Camera) -> Self {
        CameraContext {
            current: Some(camera),
        }
    }

    /// Make `camera` current, or clear the slot with `None`. Returns the
    /// camera that was current before.
    pub fn use_camera(&mut self, camera: Option<Camera>) -> Option<Camera> {
        std::mem::replace(&mut self.current, camera)
    }

    pub fn current(&self) -> Option<&Camera> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Camera> {
        self.current.as_mut()
    }

    pub fn world_to_screen(&self, world: Vector2) -> Vector2 {
        match &self.current {
            Some(camera) => camera.world_to_screen(world),
            None => world,
        }
    }

    pub fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        match &self.current {
            Some(camera) => camera.screen_to_world(screen),
            None => screen,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.current.map_or(1.0, |c| c.zoom)
    }

    /// Rotation to hand to the draw sink (degrees, clockwise).
    pub fn rotation_degrees(&self) -> f32 {
        self.current.map_or(0.0, |c| c.rotation.to_degrees())
    }
}
