//! Flat ground plane primitive

use crate::{Aabb, Mesh, Primitive, Vec3};

/// A horizontal rectangle at local Y = 0 facing up
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ground {
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
}

impl Ground {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }
}

impl Primitive for Ground {
    fn mesh(&self) -> Mesh {
        let hx = self.width / 2.0;
        let hz = self.depth / 2.0;
        let mut mesh = Mesh::new();
        mesh.push_quad(
            [
                Vec3::new(-hx, 0.0, -hz),
                Vec3::new(-hx, 0.0, hz),
                Vec3::new(hx, 0.0, hz),
                Vec3::new(hx, 0.0, -hz),
            ],
            Vec3::Y,
        );
        mesh
    }

    fn local_bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.width / 2.0, 0.0, -self.depth / 2.0),
            Vec3::new(self.width / 2.0, 0.0, self.depth / 2.0),
        )
    }
}
