//! Particle entity and its stable handle

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable handle into the particle store (its spawn index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

impl ParticleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rigid sphere moving inside the cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// World-space radius (> 0)
    pub radius: f32,
    /// ARGB8888, alpha always 0xFF
    pub color: u32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, radius: f32, color: u32) -> Self {
        Self {
            position,
            velocity,
            radius,
            color: color | 0xFF00_0000,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Uniform point in the cube `[-0.5, 0.5]³`
pub fn random_position<R: Rng>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
    )
}

/// Uniform velocity in `[-0.5, 0.5]³ * scale`
pub fn random_velocity<R: Rng>(rng: &mut R, scale: f32) -> Vec3 {
    random_position(rng) * scale
}

/// Random opaque color
pub fn random_color<R: Rng>(rng: &mut R) -> u32 {
    0xFF00_0000 | (rng.random::<u32>() & 0x00FF_FFFF)
}
