//! Engine settings
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Viewport};
use crate::consts::*;
use crate::renderer::Lighting;
use crate::sim::{PhysicsConfig, RadiusMode};

/// Rendering feature bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderPreset {
    /// Single-color discs
    Flat,
    /// Lambert-shaded discs
    #[default]
    Shaded,
    /// Shaded discs followed by a mosaic pass
    Mosaic,
}

impl RenderPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderPreset::Flat => "Flat",
            RenderPreset::Shaded => "Shaded",
            RenderPreset::Mosaic => "Mosaic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Some(RenderPreset::Flat),
            "shaded" => Some(RenderPreset::Shaded),
            "mosaic" | "pixelate" => Some(RenderPreset::Mosaic),
            _ => None,
        }
    }

    /// Whether discs get per-pixel lighting
    pub fn shading(&self) -> bool {
        !matches!(self, RenderPreset::Flat)
    }

    /// Mosaic cell size (0 disables the pass)
    pub fn pixelate_cell(&self) -> u32 {
        match self {
            RenderPreset::Mosaic => 8,
            _ => 0,
        }
    }
}

/// Reasons settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidParameter { name: &'static str, message: String },
}

impl SettingsError {
    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        SettingsError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::InvalidParameter { name, message } => {
                write!(f, "invalid setting '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::InvalidParameter { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for spawns
    pub seed: u64,

    // === Viewport ===
    pub viewport: Viewport,

    // === Simulation ===
    /// Fixed timestep per frame (seconds)
    pub dt: f32,
    /// Particles spawned when the engine starts
    pub initial_particles: usize,
    /// Spawn velocity range is `[-0.5, 0.5] * velocity_scale` per axis
    pub velocity_scale: f32,
    pub radius: RadiusMode,
    /// Upper bound on the particle count (`None` = grow freely)
    pub max_particles: Option<usize>,
    /// Gravity on at startup
    pub gravity_enabled: bool,
    pub gravity: f32,
    /// Give each spawned particle a random color instead of `particle_color`
    pub random_colors: bool,

    // === Rendering ===
    pub preset: RenderPreset,
    pub light_direction: Vec3,
    pub light_intensity: f32,
    pub cube_color: u32,
    pub particle_color: u32,

    // === Camera ===
    pub camera_start: Vec3,
    pub rotate_step: f32,
    pub move_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,

            viewport: Viewport::default(),

            dt: SIM_DT,
            initial_particles: INITIAL_PARTICLES,
            velocity_scale: VELOCITY_SCALE,
            radius: RadiusMode::Fixed {
                radius: PARTICLE_RADIUS,
            },
            max_particles: None,
            gravity_enabled: false,
            gravity: GRAVITY,
            random_colors: true,

            preset: RenderPreset::Shaded,
            light_direction: Lighting::default().direction,
            light_intensity: 1.0,
            cube_color: CUBE_COLOR,
            particle_color: PARTICLE_COLOR,

            camera_start: Vec3::from_array(CAMERA_START),
            rotate_step: CAMERA_ROTATE_STEP,
            move_step: CAMERA_MOVE_STEP,
        }
    }
}

impl Settings {
    /// Create settings from a render preset
    pub fn from_preset(preset: RenderPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Parse and validate JSON settings
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SettingsError::invalid("viewport", "width and height must be non-zero"));
        }
        if !(self.viewport.distance > 0.0) {
            return Err(SettingsError::invalid("viewport.distance", "must be positive"));
        }
        if !(self.dt >= 0.0) {
            return Err(SettingsError::invalid("dt", "must be non-negative"));
        }
        if !(self.radius.min_radius() > 0.0) {
            return Err(SettingsError::invalid("radius", "particle radius must be positive"));
        }
        if let Some(max) = self.max_particles {
            if self.initial_particles > max {
                return Err(SettingsError::invalid(
                    "initial_particles",
                    format!("{} exceeds max_particles {max}", self.initial_particles),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.light_intensity) {
            return Err(SettingsError::invalid("light_intensity", "must be within [0, 1]"));
        }
        Ok(())
    }

    pub fn physics(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity_enabled: self.gravity_enabled,
            gravity: self.gravity,
        }
    }

    /// Lighting when the preset shades discs, `None` for flat rendering
    pub fn lighting(&self) -> Option<Lighting> {
        self.preset
            .shading()
            .then(|| Lighting::new(self.light_direction, self.light_intensity))
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_start, 0.0, 0.0)
    }
}
