//! 3x3 rotation matrix

use crate::Vec3;

/// 3x3 matrix stored as three column vectors
///
/// Only used for orthonormal rotation bases, so the inverse is the transpose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    pub cols: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// Build from three columns
    #[inline]
    pub const fn from_cols(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self { cols: [x, y, z] }
    }

    /// Rotation about the X axis
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::X, Vec3::new(0.0, c, s), Vec3::new(0.0, -s, c))
    }

    /// Rotation about the Y axis
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::new(c, 0.0, -s), Vec3::Y, Vec3::new(s, 0.0, c))
    }

    /// Rotation about the Z axis
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    }

    /// Euler rotation `[x, y, z]` in radians, applied Z first, then X, then Y
    pub fn from_euler(angles: Vec3) -> Self {
        Self::rotation_y(angles.y) * Self::rotation_x(angles.x) * Self::rotation_z(angles.z)
    }

    /// Transform a vector
    #[inline]
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Transpose (inverse for rotation matrices)
    pub fn transpose(&self) -> Self {
        let [a, b, c] = self.cols;
        Self::from_cols(
            Vec3::new(a.x, b.x, c.x),
            Vec3::new(a.y, b.y, c.y),
            Vec3::new(a.z, b.z, c.z),
        )
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self.mul_vec(rhs.cols[0]),
            self.mul_vec(rhs.cols[1]),
            self.mul_vec(rhs.cols[2]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = Mat3::rotation_y(FRAC_PI_2);
        assert!(approx(r.mul_vec(Vec3::Z), Vec3::X));
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let r = Mat3::rotation_z(FRAC_PI_2);
        assert!(approx(r.mul_vec(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_transpose_is_inverse() {
        let r = Mat3::from_euler(Vec3::new(0.3, 1.1, -0.7));
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx(r.transpose().mul_vec(r.mul_vec(v)), v));
    }
}
