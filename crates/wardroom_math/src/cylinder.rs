//! Upright cylinder primitive

use std::f32::consts::TAU;

use crate::{Aabb, Mesh, Primitive, Vec3};

/// Default number of segments around the circumference
pub const DEFAULT_TESSELLATION: u32 = 24;

/// A capped cylinder along the local Y axis, centered on the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub height: f32,
    pub diameter: f32,
    pub tessellation: u32,
}

impl Cylinder {
    pub fn new(height: f32, diameter: f32) -> Self {
        Self {
            height,
            diameter,
            tessellation: DEFAULT_TESSELLATION,
        }
    }

    /// Builder: set the number of side segments (minimum 3)
    pub fn with_tessellation(mut self, segments: u32) -> Self {
        self.tessellation = segments.max(3);
        self
    }
}

impl Primitive for Cylinder {
    fn mesh(&self) -> Mesh {
        let radius = self.diameter / 2.0;
        let half_h = self.height / 2.0;
        let segments = self.tessellation.max(3);
        let mut mesh = Mesh::new();

        let ring = |i: u32| {
            let angle = TAU * i as f32 / segments as f32;
            Vec3::new(angle.cos(), 0.0, angle.sin())
        };

        // Side: one quad per segment with smooth normals
        for i in 0..segments {
            let a = ring(i);
            let b = ring(i + 1);
            let base = mesh.positions.len() as u32;
            mesh.positions.extend_from_slice(&[
                a * radius + Vec3::new(0.0, -half_h, 0.0),
                a * radius + Vec3::new(0.0, half_h, 0.0),
                b * radius + Vec3::new(0.0, half_h, 0.0),
                b * radius + Vec3::new(0.0, -half_h, 0.0),
            ]);
            mesh.normals.extend_from_slice(&[a, a, b, b]);
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        // Caps as triangle fans
        for (y, normal) in [(half_h, Vec3::Y), (-half_h, -Vec3::Y)] {
            let center = mesh.positions.len() as u32;
            mesh.positions.push(Vec3::new(0.0, y, 0.0));
            mesh.normals.push(normal);
            for i in 0..=segments {
                mesh.positions.push(ring(i) * radius + Vec3::new(0.0, y, 0.0));
                mesh.normals.push(normal);
            }
            for i in 0..segments {
                mesh.indices
                    .extend_from_slice(&[center, center + 1 + i, center + 2 + i]);
            }
        }

        mesh
    }

    fn local_bounds(&self) -> Aabb {
        let r = self.diameter / 2.0;
        Aabb::from_half_extents(Vec3::new(r, self.height / 2.0, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_triangle_count() {
        let mesh = Cylinder::new(1.4, 0.2).with_tessellation(8).mesh();
        // 2 per side segment + 1 per segment on each cap
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
    }

    #[test]
    fn test_cylinder_bounds() {
        let bounds = Cylinder::new(2.4, 0.08).local_bounds();
        assert!((bounds.max.x - 0.04).abs() < 1e-6);
        assert!((bounds.max.y - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_tessellation_floor() {
        assert_eq!(Cylinder::new(1.0, 1.0).with_tessellation(1).tessellation, 3);
    }
}
