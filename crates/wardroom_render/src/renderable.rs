//! Renderable geometry - bridges World/Entity to GPU buffers
//!
//! Every shaped entity's local mesh is baked into world space with its
//! resolved pose, so the scene pass needs no per-entity model matrices.

use wardroom_core::{Entity, Pose, World};
use crate::pipeline::Vertex;

/// GPU-ready triangles collected from entities
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    /// World-space vertices with material colors
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl SceneGeometry {
    /// Create empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect geometry from every shaped entity in a world
    pub fn from_world(world: &World) -> Self {
        let mut result = Self::new();
        for (key, entity) in world.iter_with_keys() {
            let Some(pose) = world.world_pose(key) else {
                continue;
            };
            result.add_entity(entity, &pose);
        }
        log::debug!(
            "Collected {} vertices, {} triangles from {} entities",
            result.vertex_count(),
            result.triangle_count(),
            world.entity_count()
        );
        result
    }

    /// Add an entity's mesh placed at `pose`; grouping nodes add nothing
    pub fn add_entity(&mut self, entity: &Entity, pose: &Pose) {
        let Some(shape) = entity.shape else {
            return;
        };
        let mesh = shape.create_shape().mesh();
        let vertex_offset = self.vertices.len() as u32;

        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            self.vertices.push(Vertex {
                position: pose.transform_point(*position).to_array(),
                normal: pose.transform_vector(*normal).normalized().to_array(),
                color: entity.material.diffuse,
                emissive: entity.material.emissive,
            });
        }

        self.indices
            .extend(mesh.indices.iter().map(|i| i + vertex_offset));
    }

    /// Clear all geometry
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardroom_core::{Material, ShapeTemplate};
    use wardroom_math::Vec3;

    fn unit_box() -> Entity {
        Entity::new(ShapeTemplate::Box { width: 1.0, height: 1.0, depth: 1.0 })
    }

    #[test]
    fn test_empty_world() {
        let geometry = SceneGeometry::from_world(&World::new());
        assert!(geometry.is_empty());
        assert_eq!(geometry.vertex_count(), 0);
    }

    #[test]
    fn test_groups_add_nothing() {
        let mut world = World::new();
        world.add_entity(Entity::group().with_label("Bed")).unwrap();
        assert!(SceneGeometry::from_world(&world).is_empty());
    }

    #[test]
    fn test_indices_offset_per_entity() {
        let mut world = World::new();
        world.add_entity(unit_box()).unwrap();
        world.add_entity(unit_box().at(Vec3::new(3.0, 0.0, 0.0))).unwrap();

        let geometry = SceneGeometry::from_world(&world);
        let per_box = geometry.vertex_count() / 2;
        assert_eq!(geometry.triangle_count(), 24);
        assert!(geometry.indices.iter().all(|&i| (i as usize) < geometry.vertex_count()));
        assert!(geometry.indices.iter().any(|&i| i as usize >= per_box));
    }

    #[test]
    fn test_vertices_placed_by_parent_pose() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group().at(Vec3::new(-2.5, 0.0, 1.5))).unwrap();
        world
            .add_child(group, unit_box().at(Vec3::new(0.0, 0.5, 0.0)))
            .unwrap();

        let geometry = SceneGeometry::from_world(&world);
        for v in &geometry.vertices {
            assert!((v.position[0] - -2.5).abs() <= 0.5 + 1e-5);
            assert!((v.position[1] - 0.5).abs() <= 0.5 + 1e-5);
            assert!((v.position[2] - 1.5).abs() <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn test_material_colors_copied() {
        let screen = Material::from_rgb(0.1, 0.1, 0.1).with_emissive(0.1, 0.8, 0.9);
        let mut world = World::new();
        world.add_entity(unit_box().with_material(screen)).unwrap();

        let geometry = SceneGeometry::from_world(&world);
        assert!(geometry.vertices.iter().all(|v| v.color == [0.1, 0.1, 0.1]));
        assert!(geometry.vertices.iter().all(|v| v.emissive == [0.1, 0.8, 0.9]));
    }

    #[test]
    fn test_normals_rotate_with_entity() {
        let mut world = World::new();
        world
            .add_entity(
                Entity::new(ShapeTemplate::Ground { width: 2.0, depth: 2.0 })
                    .rotated(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2)),
            )
            .unwrap();

        let geometry = SceneGeometry::from_world(&world);
        for v in &geometry.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y.abs() < 1e-5);
        }
    }
}
