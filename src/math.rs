//! Vector helpers on top of `glam::Vec3`
//!
//! Addition, subtraction and magnitude come straight from glam. The extras
//! here are the orthogonal projection used by collision response and the
//! yaw-then-pitch rotation shared by the camera and the shading normals.

use glam::Vec3;

/// Project `v` onto the line spanned by `onto`: `(v·b / b·b) * b`
///
/// Returns `None` when `onto` has zero length.
#[inline]
pub fn orthogonal_projection(v: Vec3, onto: Vec3) -> Option<Vec3> {
    let len_sq = onto.length_squared();
    if len_sq == 0.0 {
        return None;
    }
    Some(onto * (v.dot(onto) / len_sq))
}

/// Euclidean length, `sqrt(x² + y² + z²)`
#[inline]
pub fn magnitude(v: Vec3) -> f32 {
    v.length()
}

/// Rotate around the vertical axis by `yaw`, then around the horizontal axis by `pitch`
///
/// The order is fixed: projection and shading both rely on it.
#[inline]
pub fn rotate(v: Vec3, pitch: f32, yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let x = cos_yaw * v.x - sin_yaw * v.z;
    let z = sin_yaw * v.x + cos_yaw * v.z;
    let y = v.y;

    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(
        x,
        cos_pitch * y - sin_pitch * z,
        sin_pitch * y + cos_pitch * z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_projection_onto_axis() {
        let v = Vec3::new(3.0, 4.0, 5.0);
        let p = orthogonal_projection(v, Vec3::new(2.0, 0.0, 0.0)).unwrap();
        assert!(approx(p, Vec3::new(3.0, 0.0, 0.0)));

        // Remainder is orthogonal to the axis
        let rest = v - p;
        assert!(rest.dot(Vec3::X).abs() < 1e-6);
    }

    #[test]
    fn test_projection_onto_zero_is_none() {
        assert!(orthogonal_projection(Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(Vec3::new(1.0, 2.0, 2.0)) - 3.0).abs() < 1e-6);
        assert_eq!(magnitude(Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_rotate_identity() {
        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!(approx(rotate(v, 0.0, 0.0), v));
    }

    #[test]
    fn test_rotate_yaw_quarter_turn() {
        // x' = cos·x − sin·z, z' = sin·x + cos·z
        let r = rotate(Vec3::X, 0.0, FRAC_PI_2);
        assert!(approx(r, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotate_pitch_quarter_turn() {
        // y'' = cos·y − sin·z, z'' = sin·y + cos·z
        let r = rotate(Vec3::Y, FRAC_PI_2, 0.0);
        assert!(approx(r, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotate_applies_yaw_before_pitch() {
        // Yaw carries X onto Z, then pitch carries Z onto -Y.
        let r = rotate(Vec3::X, FRAC_PI_2, FRAC_PI_2);
        assert!(approx(r, Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec3::new(0.7, -1.3, 2.1);
        let r = rotate(v, 0.37, -1.2);
        assert!((r.length() - v.length()).abs() < 1e-5);
    }
}
