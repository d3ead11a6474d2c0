//! Fixed timestep physics step
//!
//! Per particle, in spawn order: gravity, integrate, collide with every later
//! particle, clamp to the walls.

use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_walls, resolve_against_later};
use super::particle::Particle;
use crate::consts::{GRAVITY, HALF_EXTENT};

/// Physics knobs threaded into every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Apply `gravity` to vertical velocity
    pub gravity_enabled: bool,
    /// Vertical acceleration in world units/s² (+y points down on screen)
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_enabled: false,
            gravity: GRAVITY,
        }
    }
}

/// Counters for one step (diagnostics only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub pair_contacts: usize,
    pub wall_hits: usize,
}

/// Advance every particle by `dt`
pub fn step(particles: &mut [Particle], config: &PhysicsConfig, dt: f32) -> StepStats {
    let mut stats = StepStats::default();

    for i in 0..particles.len() {
        {
            let p = &mut particles[i];
            // Gravity stops acting once the particle rests on the +y face
            if config.gravity_enabled && p.position.y < HALF_EXTENT {
                p.velocity.y += config.gravity * dt;
            }
            p.position += p.velocity * dt;
        }

        stats.pair_contacts += resolve_against_later(particles, i);

        if clamp_to_walls(&mut particles[i]) {
            stats.wall_hits += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particle::{random_position, random_velocity};
    use glam::Vec3;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn p(pos: Vec3, vel: Vec3) -> Particle {
        Particle::new(pos, vel, 0.05, 0)
    }

    #[test]
    fn test_integrates_velocity() {
        let mut particles = vec![p(Vec3::ZERO, Vec3::new(1.0, -2.0, 0.5))];
        step(&mut particles, &PhysicsConfig::default(), 0.1);
        assert!((particles[0].position - Vec3::new(0.1, -0.2, 0.05)).length() < 1e-6);
    }

    #[test]
    fn test_reflects_after_integration() {
        let mut particles = vec![p(Vec3::new(0.45, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0))];
        let stats = step(&mut particles, &PhysicsConfig::default(), 0.1);
        assert_eq!(stats.wall_hits, 1);
        assert_eq!(particles[0].position.x, 0.5);
        assert_eq!(particles[0].velocity.x, -1.0);
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let config = PhysicsConfig {
            gravity_enabled: true,
            gravity: 2.0,
        };
        let mut particles = vec![p(Vec3::ZERO, Vec3::ZERO)];
        step(&mut particles, &config, 0.5);
        assert!((particles[0].velocity.y - 1.0).abs() < 1e-6);
        assert!((particles[0].position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_skipped_on_resting_face() {
        let config = PhysicsConfig {
            gravity_enabled: true,
            gravity: 2.0,
        };
        let mut particles = vec![p(Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO)];
        step(&mut particles, &config, 0.5);
        assert_eq!(particles[0].velocity.y, 0.0);
        assert_eq!(particles[0].position.y, 0.5);
    }

    #[test]
    fn test_gravity_disabled() {
        let mut particles = vec![p(Vec3::ZERO, Vec3::ZERO)];
        step(&mut particles, &PhysicsConfig::default(), 0.5);
        assert_eq!(particles[0].velocity, Vec3::ZERO);
    }

    #[test]
    fn test_pair_contact_counted() {
        let mut particles = vec![
            p(Vec3::new(-0.04, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            p(Vec3::new(0.04, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
        ];
        let stats = step(&mut particles, &PhysicsConfig::default(), 0.001);
        assert_eq!(stats.pair_contacts, 1);
        assert!(particles[0].velocity.x < 0.0);
        assert!(particles[1].velocity.x > 0.0);
    }

    #[test]
    fn test_earlier_correction_visible_to_later_pairs() {
        // 0 pushes 1 into 2 during the same tick
        let mut particles = vec![
            p(Vec3::new(-0.09, 0.0, 0.0), Vec3::ZERO),
            p(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO),
            p(Vec3::new(0.102, 0.0, 0.0), Vec3::ZERO),
        ];
        let stats = step(&mut particles, &PhysicsConfig::default(), 0.0);
        assert_eq!(stats.pair_contacts, 2);
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..40)
                .map(|_| {
                    let position = random_position(&mut rng);
                    Particle::new(position, random_velocity(&mut rng, 1.0), 0.06, 0)
                })
                .collect::<Vec<_>>()
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..100 {
            step(&mut a, &PhysicsConfig::default(), 0.016);
            step(&mut b, &PhysicsConfig::default(), 0.016);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_particles_stay_in_cube(
            seed in any::<u64>(),
            gravity in any::<bool>(),
            steps in 1usize..60,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut particles: Vec<Particle> = (0..25)
                .map(|_| {
                    let position = random_position(&mut rng);
                    Particle::new(position, random_velocity(&mut rng, 4.0), 0.08, 0)
                })
                .collect();
            let config = PhysicsConfig { gravity_enabled: gravity, gravity: 3.0 };

            for _ in 0..steps {
                step(&mut particles, &config, 0.016);
                for particle in &particles {
                    prop_assert!(particle.position.abs().max_element() <= HALF_EXTENT);
                }
            }
        }
    }
}
