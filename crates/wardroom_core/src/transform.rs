//! Local transforms and resolved world poses
//!
//! A [`Transform3D`] is what scene files describe: a position and Euler
//! rotation relative to the parent entity. A [`Pose`] is the resolved
//! world-space rigid transform used by picking and rendering.

use wardroom_math::{mat4, Mat3, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// Position and rotation relative to the parent entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Translation relative to the parent
    pub position: Vec3,
    /// Euler angles in radians (applied Z, then X, then Y)
    pub rotation: Vec3,
}

impl Transform3D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    /// Builder: set the Euler rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotation basis for the Euler angles
    pub fn basis(&self) -> Mat3 {
        Mat3::from_euler(self.rotation)
    }
}

/// A rigid world-space transform (rotation followed by translation)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub basis: Mat3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        basis: Mat3::IDENTITY,
    };

    /// Pose of a transform with no parent
    pub fn from_transform(transform: &Transform3D) -> Self {
        Self {
            translation: transform.position,
            basis: transform.basis(),
        }
    }

    /// Pose of a child whose local transform is relative to `self`
    pub fn then(&self, local: &Transform3D) -> Self {
        Self {
            translation: self.transform_point(local.position),
            basis: self.basis * local.basis(),
        }
    }

    /// Local point to world space
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.basis.mul_vec(p) + self.translation
    }

    /// Local direction to world space
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.basis.mul_vec(v)
    }

    /// World point to local space
    #[inline]
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        self.basis.transpose().mul_vec(p - self.translation)
    }

    /// World direction to local space
    #[inline]
    pub fn inverse_transform_vector(&self, v: Vec3) -> Vec3 {
        self.basis.transpose().mul_vec(v)
    }

    /// Column-major model matrix
    pub fn to_matrix(&self) -> Mat4 {
        mat4::from_rotation_translation(&self.basis, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_child_offset_follows_parent() {
        let parent = Pose::from_transform(&Transform3D::from_position(Vec3::new(-2.5, 0.0, 1.5)));
        let child = parent.then(&Transform3D::from_position(Vec3::new(0.0, 0.55, 0.0)));
        assert!((child.translation - Vec3::new(-2.5, 0.55, 1.5)).length() < EPSILON);
    }

    #[test]
    fn test_parent_rotation_applies_to_child_offset() {
        let parent = Pose::from_transform(
            &Transform3D::identity().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
        );
        let child = parent.then(&Transform3D::from_position(Vec3::Z));
        assert!((child.translation - Vec3::X).length() < EPSILON);
    }

    #[test]
    fn test_inverse_round_trip() {
        let pose = Pose::from_transform(
            &Transform3D::from_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(Vec3::new(0.0, 0.0, 1.047)),
        );
        let p = Vec3::new(0.3, -0.2, 0.9);
        let back = pose.inverse_transform_point(pose.transform_point(p));
        assert!((back - p).length() < EPSILON);
    }
}
