//! Axis-aligned box primitive

use crate::{Aabb, Mesh, Primitive, Vec3};

/// A box with the given full width (X), height (Y) and depth (Z)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Cuboid {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// A cube with edge length `size`
    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }
}

impl Primitive for Cuboid {
    fn mesh(&self) -> Mesh {
        let h = self.half_extents();
        let mut mesh = Mesh::new();

        // +X / -X
        mesh.push_quad(
            [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
            ],
            Vec3::X,
        );
        mesh.push_quad(
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(-h.x, -h.y, -h.z),
            ],
            -Vec3::X,
        );
        // +Y / -Y
        mesh.push_quad(
            [
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, h.y, -h.z),
            ],
            Vec3::Y,
        );
        mesh.push_quad(
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, h.z),
            ],
            -Vec3::Y,
        );
        // +Z / -Z
        mesh.push_quad(
            [
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, -h.y, h.z),
            ],
            Vec3::Z,
        );
        mesh.push_quad(
            [
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
            ],
            -Vec3::Z,
        );

        mesh
    }

    fn local_bounds(&self) -> Aabb {
        Aabb::from_half_extents(self.half_extents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_mesh_counts() {
        let mesh = Cuboid::new(2.2, 0.4, 3.0).mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_cuboid_vertices_inside_bounds() {
        let cuboid = Cuboid::new(1.0, 0.6, 0.08);
        let bounds = cuboid.local_bounds();
        assert!(cuboid.mesh().positions.iter().all(|p| bounds.contains(*p)));
        assert_eq!(bounds.max, Vec3::new(0.5, 0.3, 0.04));
    }
}
