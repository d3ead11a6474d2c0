//! Scene drawing: the wireframe cube and the particle spheres

use glam::Vec3;

use super::buffer::PixelBuffer;
use super::raster::{Lighting, draw_filled_circle, draw_filled_circle_shaded, draw_line};
use crate::camera::{Camera, ScreenPoint, Viewport};
use crate::sim::{Particle, ParticleId};

/// Corners of the unit cube centered on the origin
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

/// Vertex index pairs: back face, front face, then the connecting edges
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Project 8 vertices and connect them with 12 lines
pub fn draw_wireframe_cube(
    buf: &mut PixelBuffer,
    camera: &Camera,
    viewport: &Viewport,
    vertices: &[Vec3; 8],
    edges: &[(usize, usize); 12],
    color: u32,
) {
    let projected: [ScreenPoint; 8] =
        std::array::from_fn(|i| camera.project(viewport, vertices[i]));
    for &(a, b) in edges {
        let (pa, pb) = (projected[a], projected[b]);
        draw_line(buf, pa.x, pa.y, pb.x, pb.y, color);
    }
}

/// A particle as it lands on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDisc {
    pub center: ScreenPoint,
    pub radius: i32,
}

impl ScreenDisc {
    /// True if `(x, y)` lies within the disc
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let dx = x as i64 - self.center.x as i64;
        let dy = y as i64 - self.center.y as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }
}

/// Perspective-scaled disc for a particle, `None` when behind the camera
pub fn particle_disc(
    camera: &Camera,
    viewport: &Viewport,
    particle: &Particle,
) -> Option<ScreenDisc> {
    let projected = camera.project_with_depth(viewport, particle.position)?;
    let radius = particle.radius / projected.z_factor * viewport.half_width();
    Some(ScreenDisc {
        center: projected.point,
        radius: radius as i32,
    })
}

/// Draw particles in index order; later particles paint over earlier ones
pub fn draw_particles(
    buf: &mut PixelBuffer,
    camera: &Camera,
    viewport: &Viewport,
    particles: &[Particle],
    lighting: Option<&Lighting>,
) -> usize {
    let mut drawn = 0;
    for particle in particles {
        let Some(disc) = particle_disc(camera, viewport, particle) else {
            continue;
        };
        match lighting {
            Some(lighting) => draw_filled_circle_shaded(
                buf,
                disc.center.x,
                disc.center.y,
                disc.radius,
                particle.color,
                camera,
                lighting,
            ),
            None => {
                draw_filled_circle(buf, disc.center.x, disc.center.y, disc.radius, particle.color)
            }
        }
        drawn += 1;
    }
    drawn
}

/// First particle (in index order) whose on-screen disc contains `(x, y)`
pub fn pick(
    camera: &Camera,
    viewport: &Viewport,
    particles: &[Particle],
    x: i32,
    y: i32,
) -> Option<ParticleId> {
    particles
        .iter()
        .position(|p| particle_disc(camera, viewport, p).is_some_and(|d| d.contains(x, y)))
        .map(ParticleId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 640,
            height: 480,
            distance: 1.0,
        }
    }

    fn particle_at(pos: Vec3, radius: f32, color: u32) -> Particle {
        Particle::new(pos, Vec3::ZERO, radius, color)
    }

    #[test]
    fn test_cube_edges_are_unit_length() {
        for (a, b) in CUBE_EDGES {
            let len = (CUBE_VERTICES[a] - CUBE_VERTICES[b]).length();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wireframe_draws_inside_view() {
        let mut buf = PixelBuffer::new(640, 480);
        let camera = Camera::default();
        draw_wireframe_cube(
            &mut buf,
            &camera,
            &viewport(),
            &CUBE_VERTICES,
            &CUBE_EDGES,
            0xFFFF_FFFF,
        );

        // Front-face corner (-0.5, -0.5, -0.5) sits at depth 2.5 + 1
        let corner = camera.project(&viewport(), CUBE_VERTICES[0]);
        assert_eq!(buf.get(corner.x, corner.y), Some(0xFFFF_FFFF));
        assert!(buf.count_not(0) > 400);
        // Interior of the cube face stays empty
        assert_eq!(buf.get(320, 240), Some(0));
    }

    #[test]
    fn test_particle_disc_scales_with_depth() {
        let camera = Camera::default();
        let near_particle = particle_at(Vec3::new(0.0, 0.0, -0.5), 0.1, 0);
        let far_particle = particle_at(Vec3::new(0.0, 0.0, 0.5), 0.1, 0);
        let near = particle_disc(&camera, &viewport(), &near_particle).unwrap();
        let far = particle_disc(&camera, &viewport(), &far_particle).unwrap();
        assert!(near.radius > far.radius);
        // 0.1 / 3.5 * 320
        assert_eq!(near.radius, 9);
    }

    #[test]
    fn test_particles_behind_camera_skipped() {
        let mut buf = PixelBuffer::new(640, 480);
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), 0.0, 0.0);
        let particles = [particle_at(Vec3::ZERO, 0.1, 0xFFFF_0000)];
        assert_eq!(draw_particles(&mut buf, &camera, &viewport(), &particles, None), 0);
        assert_eq!(buf.count_not(0), 0);
    }

    #[test]
    fn test_later_particles_paint_over() {
        let mut buf = PixelBuffer::new(640, 480);
        let camera = Camera::default();
        let particles = [
            particle_at(Vec3::ZERO, 0.1, 0xFFFF_0000),
            particle_at(Vec3::ZERO, 0.05, 0xFF00_FF00),
        ];
        assert_eq!(draw_particles(&mut buf, &camera, &viewport(), &particles, None), 2);
        assert_eq!(buf.get(320, 240), Some(0xFF00_FF00));
        assert_eq!(buf.get(320 + 7, 240), Some(0xFFFF_0000));
    }

    #[test]
    fn test_pick_first_in_index_order() {
        let camera = Camera::default();
        let particles = [
            particle_at(Vec3::new(0.3, 0.0, 0.0), 0.05, 0),
            particle_at(Vec3::ZERO, 0.1, 0),
            particle_at(Vec3::ZERO, 0.1, 0),
        ];
        assert_eq!(pick(&camera, &viewport(), &particles, 320, 240), Some(ParticleId(1)));
        assert_eq!(pick(&camera, &viewport(), &particles, 10, 10), None);
    }

    #[test]
    fn test_wireframe_with_camera_on_face_plane() {
        // Front-face vertices land a hair in front of the camera plane and
        // project billions of pixels off screen.
        let mut buf = PixelBuffer::new(640, 480);
        let camera = Camera::new(Vec3::new(0.0, 0.0, 0.4999999), 0.0, 0.0);
        let corner = camera.project_with_depth(&viewport(), CUBE_VERTICES[0]).unwrap();
        assert!(corner.point.x.unsigned_abs() > 1_000_000_000);

        draw_wireframe_cube(
            &mut buf,
            &camera,
            &viewport(),
            &CUBE_VERTICES,
            &CUBE_EDGES,
            0xFFFF_FFFF,
        );
        assert!(buf.count_not(0) > 0);
    }

    #[test]
    fn test_contains_with_saturated_center() {
        let disc = ScreenDisc {
            center: ScreenPoint::new(i32::MIN, 0),
            radius: 5,
        };
        assert!(!disc.contains(i32::MAX, 0));
        assert!(!disc.contains(10, 0));
        assert!(disc.contains(i32::MIN + 3, 0));
    }

    #[test]
    fn test_pick_particle_on_camera_plane() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 0.49999994), 0.0, 0.0);
        let particles = [particle_at(Vec3::new(-0.5, 0.0, -0.5), 0.02, 0)];
        let disc = particle_disc(&camera, &viewport(), &particles[0]).unwrap();
        assert_eq!(disc.center.x, i32::MIN);

        assert_eq!(pick(&camera, &viewport(), &particles, 10, 240), None);
    }
}
