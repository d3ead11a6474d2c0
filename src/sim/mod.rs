//! Deterministic particle simulation
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by spawn index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particle;
pub mod state;
pub mod step;

pub use collision::{PairOutcome, clamp_to_walls, resolve_against_later, resolve_pair};
pub use particle::{Particle, ParticleId, random_color};
pub use state::{RadiusMode, SimState, SpawnError};
pub use step::{PhysicsConfig, StepStats, step};
