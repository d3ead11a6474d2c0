//! Collision detection and response for spheres in a box
//!
//! Pairs are resolved in place: the positional correction of one pair is
//! already visible to the next pair examined in the same tick, so the
//! iteration order is part of the result.

use glam::Vec3;

use super::particle::Particle;
use crate::consts::HALF_EXTENT;
use crate::math::orthogonal_projection;

/// Outcome of a pairwise check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Spheres do not touch
    Apart,
    /// Centers coincide; no normal exists, nothing was changed
    Degenerate,
    /// Overlap corrected and normal velocities exchanged
    Resolved {
        /// Unit vector from the first particle toward the second
        normal: Vec3,
        /// Penetration depth before correction
        overlap: f32,
    },
}

impl PairOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, PairOutcome::Resolved { .. })
    }
}

/// Exchange the components of two velocities along `normal` (equal masses)
///
/// Each velocity keeps its part orthogonal to the normal.
#[inline]
pub fn swap_normal_components(a: Vec3, b: Vec3, normal: Vec3) -> (Vec3, Vec3) {
    let a_normal = orthogonal_projection(a, normal).unwrap_or(Vec3::ZERO);
    let b_normal = orthogonal_projection(b, normal).unwrap_or(Vec3::ZERO);
    let a_rest = a - a_normal;
    let b_rest = b - b_normal;
    (a_rest + b_normal, b_rest + a_normal)
}

/// Resolve contact between two particles
///
/// Touching spheres (`distance == r_a + r_b`) count as colliding.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle) -> PairOutcome {
    let direction = b.position - a.position;
    let dist_sq = direction.length_squared();
    let radius_sum = a.radius + b.radius;

    if dist_sq > radius_sum * radius_sum {
        return PairOutcome::Apart;
    }

    let distance = dist_sq.sqrt();
    if distance == 0.0 {
        return PairOutcome::Degenerate;
    }

    let normal = direction / distance;
    let overlap = radius_sum - distance;

    // Split the correction evenly
    let push = normal * (overlap / 2.0);
    a.position -= push;
    b.position += push;

    let (va, vb) = swap_normal_components(a.velocity, b.velocity, normal);
    a.velocity = va;
    b.velocity = vb;

    PairOutcome::Resolved { normal, overlap }
}

/// Resolve particle `i` against every later particle, in ascending order
///
/// Returns how many pairs were resolved.
pub fn resolve_against_later(particles: &mut [Particle], i: usize) -> usize {
    let Some((head, tail)) = particles.get_mut(i..).and_then(|s| s.split_first_mut()) else {
        return 0;
    };

    let mut resolved = 0;
    for other in tail.iter_mut() {
        if resolve_pair(head, other).is_resolved() {
            resolved += 1;
        }
    }
    resolved
}

/// Clamp a particle into the cube and reflect the velocity on each clamped axis
///
/// Returns true if any axis was clamped.
pub fn clamp_to_walls(particle: &mut Particle) -> bool {
    let mut hit = false;
    for axis in 0..3 {
        let p = particle.position[axis];
        if p < -HALF_EXTENT || p > HALF_EXTENT {
            particle.position[axis] = p.clamp(-HALF_EXTENT, HALF_EXTENT);
            particle.velocity[axis] = -particle.velocity[axis];
            hit = true;
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f32, vx: f32, radius: f32) -> Particle {
        Particle::new(Vec3::new(x, 0.0, 0.0), Vec3::new(vx, 0.0, 0.0), radius, 0)
    }

    #[test]
    fn test_head_on_swap() {
        let r = 0.1;
        let mut a = particle(-r, 1.0, r);
        let mut b = particle(r, -1.0, r);

        let outcome = resolve_pair(&mut a, &mut b);
        assert!(outcome.is_resolved());
        assert!((a.velocity - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((b.velocity - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        // Exactly touching: no positional change
        assert!((a.position.x + r).abs() < 1e-6);
        assert!((b.position.x - r).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_is_removed() {
        let mut a = Particle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO, 0.1, 0);
        let mut b = Particle::new(Vec3::new(0.05, 0.05, 0.0), Vec3::ZERO, 0.1, 0);

        let outcome = resolve_pair(&mut a, &mut b);
        let PairOutcome::Resolved { overlap, .. } = outcome else {
            panic!("expected a resolved contact, got {outcome:?}");
        };
        assert!(overlap > 0.0);

        let distance = (b.position - a.position).length();
        assert!(distance >= 0.2 - 1e-5);
    }

    #[test]
    fn test_correction_is_symmetric() {
        let mut a = particle(0.0, 0.0, 0.1);
        let mut b = particle(0.1, 0.0, 0.1);
        resolve_pair(&mut a, &mut b);
        // Midpoint is preserved
        assert!(((a.position.x + b.position.x) / 2.0 - 0.05).abs() < 1e-6);
        assert!((a.position.x + 0.05).abs() < 1e-6);
        assert!((b.position.x - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_glancing_keeps_tangential_velocity() {
        // Contact normal along x; tangential y parts must survive the swap
        let mut a = Particle::new(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.0), 0.1, 0);
        let mut b = Particle::new(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.0, -3.0, 0.5), 0.1, 0);

        resolve_pair(&mut a, &mut b);
        assert!((a.velocity - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
        assert!((b.velocity - Vec3::new(1.0, -3.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_kinetic_energy_conserved() {
        let mut a = Particle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.3, -0.2, 0.1), 0.1, 0);
        let mut b = Particle::new(Vec3::new(0.1, 0.1, 0.05), Vec3::new(-0.4, 0.0, 0.2), 0.1, 0);
        let before = a.velocity.length_squared() + b.velocity.length_squared();

        resolve_pair(&mut a, &mut b);
        let after = a.velocity.length_squared() + b.velocity.length_squared();
        assert!((before - after).abs() < 1e-5);
    }

    #[test]
    fn test_apart_untouched() {
        let mut a = particle(-0.3, 1.0, 0.1);
        let mut b = particle(0.3, -1.0, 0.1);
        let (a0, b0) = (a.clone(), b.clone());

        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Apart);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut a = particle(0.2, 1.0, 0.1);
        let mut b = particle(0.2, -1.0, 0.1);
        let (a0, b0) = (a.clone(), b.clone());

        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Degenerate);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_resolve_against_later_only_looks_forward() {
        let mut particles = vec![
            particle(-0.05, 0.0, 0.1), // overlaps 1, but is earlier
            particle(0.0, 1.0, 0.1),
            particle(0.3, -1.0, 0.1),
        ];
        let resolved = resolve_against_later(&mut particles, 1);
        assert_eq!(resolved, 0);
        assert_eq!(particles[0].position.x, -0.05);

        assert_eq!(resolve_against_later(&mut particles, 0), 1);
        assert_eq!(resolve_against_later(&mut particles, 3), 0);
    }

    #[test]
    fn test_wall_reflection() {
        let mut p = particle(0.6, 1.0, 0.05);
        assert!(clamp_to_walls(&mut p));
        assert_eq!(p.position.x, 0.5);
        assert_eq!(p.velocity.x, -1.0);
    }

    #[test]
    fn test_wall_clamps_each_axis_independently() {
        let mut p = Particle::new(
            Vec3::new(-0.7, 0.2, 0.9),
            Vec3::new(-0.3, 0.4, 0.2),
            0.05,
            0,
        );
        assert!(clamp_to_walls(&mut p));
        assert_eq!(p.position, Vec3::new(-0.5, 0.2, 0.5));
        assert_eq!(p.velocity, Vec3::new(0.3, 0.4, -0.2));
    }

    #[test]
    fn test_inside_not_reflected() {
        let mut p = particle(0.5, 1.0, 0.05);
        assert!(!clamp_to_walls(&mut p));
        assert_eq!(p.velocity.x, 1.0);
    }
}
