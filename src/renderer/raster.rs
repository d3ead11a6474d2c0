//! Rasterization primitives: lines, rectangles and filled circles
//!
//! Everything writes straight into a [`PixelBuffer`]; lines are clipped to it
//! up front, everything else clips per pixel.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::buffer::PixelBuffer;
use super::color::scale_rgb;
use crate::camera::Camera;
use crate::math::rotate;

/// Directional light used for sphere shading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Unit vector toward the light
    pub direction: Vec3,
    /// Multiplier on the Lambert term, in [0, 1]
    pub intensity: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new(Vec3::new(-0.4, -0.6, 0.7), 1.0)
    }
}

impl Lighting {
    /// Normalizes the direction and clamps the intensity to [0, 1]
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::Z),
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// Lambert factor `max(0, n·L) * intensity`, never above 1
    #[inline]
    pub fn factor(&self, normal: Vec3) -> f32 {
        (normal.dot(self.direction).max(0.0) * self.intensity).clamp(0.0, 1.0)
    }
}

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, endpoints included
///
/// Segments reaching off screen are clipped to the buffer first, so the walk
/// never leaves the visible rectangle.
pub fn draw_line(buf: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    // Always walk from the lexicographically smaller endpoint so A→B and B→A
    // visit the same pixels.
    let (start, end) = if (x0, y0) <= (x1, y1) {
        ((x0, y0), (x1, y1))
    } else {
        ((x1, y1), (x0, y0))
    };

    let Some(((mut x, mut y), (x_end, y_end))) = clip_segment(buf, start, end) else {
        return;
    };

    let dx = (x_end - x).abs();
    let sx = if x < x_end { 1 } else { -1 };
    let dy = -(y_end - y).abs();
    let sy = if y < y_end { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        buf.set(x as i32, y as i32, color);
        if x == x_end && y == y_end {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip of a segment against the buffer rectangle
///
/// Segments already inside come back unchanged.
fn clip_segment(
    buf: &PixelBuffer,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
) -> Option<((i64, i64), (i64, i64))> {
    if buf.width() == 0 || buf.height() == 0 {
        return None;
    }
    let x_max = buf.width() as i64 - 1;
    let y_max = buf.height() as i64 - 1;
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

    let inside = |x: i64, y: i64| (0..=x_max).contains(&x) && (0..=y_max).contains(&y);
    if inside(x0, y0) && inside(x1, y1) {
        return Some(((x0, y0), (x1, y1)));
    }

    let (fx0, fy0) = (x0 as f64, y0 as f64);
    let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, fx0),
        (dx, x_max as f64 - fx0),
        (-dy, fy0),
        (dy, y_max as f64 - fy0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        let x = (fx0 + t * dx).round() as i64;
        let y = (fy0 + t * dy).round() as i64;
        (x.clamp(0, x_max), y.clamp(0, y_max))
    };
    Some((at(t0), at(t1)))
}

/// Axis-aligned filled rectangle with top-left corner `(x, y)`
pub fn draw_rect(buf: &mut PixelBuffer, x: i32, y: i32, width: i32, height: i32, color: u32) {
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = x.saturating_add(width).min(buf.width() as i32);
    let y_end = y.saturating_add(height).min(buf.height() as i32);

    for py in y_start..y_end {
        for px in x_start..x_end {
            buf.set(px, py, color);
        }
    }
}

/// Visit every in-bounds offset `(dx, dy)` with `dx² + dy² ≤ radius²`
#[inline]
fn for_each_disc_pixel(
    buf: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    mut shade: impl FnMut(i32, i32) -> u32,
) {
    if radius < 0 {
        return;
    }
    let r_sq = radius as i64 * radius as i64;
    let (w, h) = (buf.width() as i64, buf.height() as i64);

    // Only scan rows and columns that can land on screen
    let y_lo = (-radius as i64).max(-(cy as i64));
    let y_hi = (radius as i64).min(h - 1 - cy as i64);
    let x_lo = (-radius as i64).max(-(cx as i64));
    let x_hi = (radius as i64).min(w - 1 - cx as i64);

    for dy in y_lo..=y_hi {
        for dx in x_lo..=x_hi {
            if dx * dx + dy * dy <= r_sq {
                let (dx, dy) = (dx as i32, dy as i32);
                let color = shade(dx, dy);
                buf.set(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Flat filled circle
pub fn draw_filled_circle(buf: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    for_each_disc_pixel(buf, cx, cy, radius, |_, _| color);
}

/// Screen-space hemisphere normal for offset `(dx, dy)` in a disc of `radius`
///
/// Derived from the pixel offset alone, not from the particle's 3D position:
/// every sphere is lit as if it faced the camera head-on.
#[inline]
pub fn disc_normal(dx: i32, dy: i32, radius: i32) -> Vec3 {
    if radius <= 0 {
        return Vec3::Z;
    }
    let r = radius as f32;
    let (nx, ny) = (dx as f32 / r, dy as f32 / r);
    let nz = (1.0 - (nx * nx + ny * ny)).max(0.0).sqrt();
    Vec3::new(nx, ny, nz)
}

/// Filled circle with per-pixel Lambert shading
///
/// Normals are rotated by the camera's pitch and yaw so the light stays
/// fixed in the world while the camera turns.
pub fn draw_filled_circle_shaded(
    buf: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    base_color: u32,
    camera: &Camera,
    lighting: &Lighting,
) {
    for_each_disc_pixel(buf, cx, cy, radius, |dx, dy| {
        let normal = rotate(disc_normal(dx, dy, radius), camera.pitch, camera.yaw);
        scale_rgb(base_color, lighting.factor(normal))
    });
}
