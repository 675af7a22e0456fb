//! 4x4 matrix utilities for view and projection
//!
//! Matrices are column-major `[[f32; 4]; 4]` so they can be written straight
//! into WGSL `mat4x4<f32>` uniforms.

use crate::{Mat3, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Perspective projection mapping view-space depth to the 0..1 range
///
/// View space looks down -Z.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// View matrix from an eye position and an explicit right/up/forward basis
///
/// The basis is in world space with forward pointing into the screen.
pub fn view_from_basis(eye: Vec3, right: Vec3, up: Vec3, forward: Vec3) -> Mat4 {
    [
        [right.x, up.x, -forward.x, 0.0],
        [right.y, up.y, -forward.y, 0.0],
        [right.z, up.z, -forward.z, 0.0],
        [-right.dot(eye), -up.dot(eye), forward.dot(eye), 1.0],
    ]
}

/// Affine transform from a rotation basis and a translation
pub fn from_rotation_translation(rotation: &Mat3, translation: Vec3) -> Mat4 {
    let [x, y, z] = rotation.cols;
    [
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [translation.x, translation.y, translation.z, 1.0],
    ]
}

/// Multiply two 4x4 matrices (`a * b`, so `b` is applied first)
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            result[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    result
}

/// Transform a point (w = 1) and return the homogeneous result
pub fn transform_point(m: &Mat4, p: Vec3) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * p.x + m[1][row] * p.y + m[2][row] * p.z + m[3][row];
    }
    out
}
