//! Simulation state: the particle store, RNG and selection
//!
//! The store only ever grows, so a `ParticleId` stays valid for the life of
//! the simulation.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::{Particle, ParticleId, random_position, random_velocity};
use super::step::{PhysicsConfig, StepStats, step};

/// How spawned particles get their radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RadiusMode {
    Fixed { radius: f32 },
    Random { min: f32, max: f32 },
}

impl RadiusMode {
    fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        match *self {
            RadiusMode::Fixed { radius } => radius,
            RadiusMode::Random { min, max } if max > min => rng.random_range(min..=max),
            RadiusMode::Random { min, .. } => min,
        }
    }

    /// Smallest radius this mode can produce
    pub fn min_radius(&self) -> f32 {
        match *self {
            RadiusMode::Fixed { radius } => radius,
            RadiusMode::Random { min, max } => min.min(max),
        }
    }
}

/// Why a spawn was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// Fixed-size store is full
    CapacityReached { capacity: usize },
    /// The store could not grow
    Allocation,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::CapacityReached { capacity } => {
                write!(f, "particle store is full ({capacity} particles)")
            }
            SpawnError::Allocation => write!(f, "failed to grow the particle store"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Particle store plus everything needed to advance it deterministically
#[derive(Debug, Clone)]
pub struct SimState {
    seed: u64,
    rng: Pcg32,
    particles: Vec<Particle>,
    /// `None` means the store grows without bound
    capacity: Option<usize>,
    radius_mode: RadiusMode,
    selected: Option<ParticleId>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(seed: u64, radius_mode: RadiusMode, capacity: Option<usize>) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            particles: Vec::new(),
            capacity,
            radius_mode,
            selected: None,
            time_ticks: 0,
        }
    }

    /// Seed the RNG started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Append a particle at a random spot with a random velocity
    pub fn spawn(&mut self, velocity_scale: f32, color: u32) -> Result<ParticleId, SpawnError> {
        let position = random_position(&mut self.rng);
        let velocity = random_velocity(&mut self.rng, velocity_scale);
        let radius = self.radius_mode.sample(&mut self.rng);
        self.push(Particle::new(position, velocity, radius, color))
    }

    /// Append an explicit particle
    pub fn push(&mut self, particle: Particle) -> Result<ParticleId, SpawnError> {
        if let Some(capacity) = self.capacity {
            if self.particles.len() >= capacity {
                return Err(SpawnError::CapacityReached { capacity });
            }
        }
        self.particles
            .try_reserve(1)
            .map_err(|_| SpawnError::Allocation)?;

        let id = ParticleId(self.particles.len());
        self.particles.push(particle);
        Ok(id)
    }

    /// Advance the physics by one tick
    pub fn step(&mut self, config: &PhysicsConfig, dt: f32) -> StepStats {
        self.time_ticks += 1;
        step(&mut self.particles, config, dt)
    }

    pub fn selected(&self) -> Option<ParticleId> {
        self.selected
    }

    /// Select a particle; ids past the end clear the selection
    pub fn select(&mut self, id: Option<ParticleId>) {
        self.selected = id.filter(|id| id.index() < self.particles.len());
    }

    /// Cyclic successor of the current selection (first particle when none)
    pub fn select_next(&mut self) -> Option<ParticleId> {
        let count = self.particles.len();
        self.selected = match (self.selected, count) {
            (_, 0) => None,
            (None, _) => Some(ParticleId(0)),
            (Some(id), _) => Some(ParticleId((id.index() + 1) % count)),
        };
        self.selected
    }
}
