//! Particle Box - colliding spheres in a unit cube, software rendered
//!
//! Core modules:
//! - `math`: Vector helpers (projection, yaw/pitch rotation)
//! - `camera`: Pinhole camera and world-to-screen projection
//! - `sim`: Deterministic particle simulation (integration, collisions)
//! - `renderer`: Software rasterizer writing ARGB pixels
//! - `engine`: Per-frame orchestration of input, physics and drawing
//! - `settings`: Data-driven engine configuration

pub mod camera;
pub mod engine;
pub mod math;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use camera::{Camera, ScreenPoint, Viewport};
pub use engine::{
    CameraCommand, Command, Engine, EngineError, Frame, FrameInput, OverlaySummary,
    ParticleSnapshot,
};
pub use settings::{RenderPreset, Settings, SettingsError};

/// Engine configuration defaults
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 0.016;

    /// Default framebuffer size
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;
    /// Distance from the eye to the projection plane (unit focal length)
    pub const VIEWPORT_DISTANCE: f32 = 1.0;

    /// Cube half-extent; particles live in [-HALF_EXTENT, HALF_EXTENT]³
    pub const HALF_EXTENT: f32 = 0.5;

    /// Particle defaults
    pub const INITIAL_PARTICLES: usize = 100;
    pub const PARTICLE_RADIUS: f32 = 0.02;
    pub const VELOCITY_SCALE: f32 = 0.1;

    /// Downward acceleration while gravity is on (world units/s², +y is down on screen)
    pub const GRAVITY: f32 = 0.5;

    /// Camera control steps per command
    pub const CAMERA_ROTATE_STEP: f32 = 0.1;
    pub const CAMERA_MOVE_STEP: f32 = 0.1;
    pub const CAMERA_START: [f32; 3] = [0.0, 0.0, -3.0];

    /// Colors (ARGB8888)
    pub const CUBE_COLOR: u32 = crate::renderer::color::colors::WHITE;
    pub const PARTICLE_COLOR: u32 = crate::renderer::color::colors::RED;
    pub const CLEAR_COLOR: u32 = crate::renderer::color::colors::TRANSPARENT;
}
