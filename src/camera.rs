//! Pinhole camera and world-to-screen projection
//!
//! A point is translated into camera space, rotated by the camera's yaw and
//! pitch, then divided by its depth plus the viewport distance.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_START, SCREEN_HEIGHT, SCREEN_WIDTH, VIEWPORT_DISTANCE};
use crate::math::rotate;

/// Integer pixel coordinate (may lie outside the framebuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Projection target: framebuffer size and focal setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Added to camera-space depth before the perspective divide
    pub distance: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            distance: VIEWPORT_DISTANCE,
        }
    }
}

impl Viewport {
    pub fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height as f32 / 2.0
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// A projected point that landed in front of the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub point: ScreenPoint,
    /// Depth plus viewport distance; always > 0
    pub z_factor: f32,
}

/// Camera pose. Only camera commands mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation around the horizontal axis (radians)
    pub pitch: f32,
    /// Rotation around the vertical axis (radians)
    pub yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_START),
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, pitch: f32, yaw: f32) -> Self {
        Self {
            position,
            pitch,
            yaw,
        }
    }

    /// Camera-space position of a world point (translate, then rotate)
    #[inline]
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        rotate(world - self.position, self.pitch, self.yaw)
    }

    /// Project a world point; `None` when it sits at or behind the camera plane
    pub fn project_with_depth(&self, viewport: &Viewport, world: Vec3) -> Option<Projected> {
        let p = self.to_camera_space(world);
        let z_factor = p.z + viewport.distance;
        if z_factor <= 0.0 {
            return None;
        }

        let x = (p.x / z_factor) * viewport.half_width() + viewport.half_width();
        let y = (p.y / z_factor) * viewport.half_height() + viewport.half_height();
        Some(Projected {
            point: ScreenPoint::new(x as i32, y as i32),
            z_factor,
        })
    }

    /// Project a world point to screen coordinates
    ///
    /// Points at or behind the camera plane map to the screen center.
    pub fn project(&self, viewport: &Viewport, world: Vec3) -> ScreenPoint {
        self.project_with_depth(viewport, world)
            .map_or_else(|| viewport.center(), |p| p.point)
    }

    /// Move along the yaw-facing basis; pitch does not tilt the motion
    pub fn move_by(&mut self, forward: f32, strafe: f32, vertical: f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.position.x += forward * sin_yaw + strafe * cos_yaw;
        self.position.z += forward * cos_yaw - strafe * sin_yaw;
        self.position.y += vertical;
    }

    /// Adjust orientation by the given angular deltas (radians)
    pub fn rotate_by(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
    }
}
