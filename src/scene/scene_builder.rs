//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building scenes in code. The result is an
//! ordinary [`Scene`], so code-built scenes validate, save and instantiate
//! exactly like scene files.

use wardroom_core::{CameraSpawn, EntityTemplate, Lighting, Material, Scene, ShapeTemplate};

/// Builder for constructing scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new("ward")
///     .with_camera([0.0, 1.6, -4.0], [0.0, 1.0, 0.0])
///     .add_material("floor", Material::GRAY)
///     .add_ground("floor", 12.0, 10.0, "floor")
///     .add_group("bed", "Bed", [-2.5, 0.0, 1.5])
///     .add_child("bed", EntityTemplate::new("mattress", ShapeTemplate::Box { width: 2.1, height: 0.25, depth: 2.8 }))
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene::new(name),
        }
    }

    /// Set where the camera starts and what it looks at
    pub fn with_camera(mut self, position: [f32; 3], target: [f32; 3]) -> Self {
        self.scene.camera = CameraSpawn { position, target };
        self
    }

    /// Set the scene lighting
    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.scene.lighting = lighting;
        self
    }

    /// Set the background color
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.scene.clear_color = color;
        self
    }

    /// Add a named material
    pub fn add_material(mut self, name: impl Into<String>, material: Material) -> Self {
        self.scene.materials.insert(name.into(), material);
        self
    }

    /// Add a floor rectangle at Y = 0
    pub fn add_ground(mut self, name: &str, width: f32, depth: f32, material: &str) -> Self {
        self.scene.add_entity(
            EntityTemplate::new(name, ShapeTemplate::Ground { width, depth })
                .with_material(material)
                .with_tag("structure"),
        );
        self
    }

    /// Add a box centred at `position`
    pub fn add_box(mut self, name: &str, size: [f32; 3], position: [f32; 3], material: Option<&str>) -> Self {
        let [width, height, depth] = size;
        let [x, y, z] = position;
        let mut template = EntityTemplate::new(name, ShapeTemplate::Box { width, height, depth }).at(x, y, z);
        template.material = material.map(str::to_owned);
        self.scene.add_entity(template);
        self
    }

    /// Add a labelled grouping node; its children share the label
    pub fn add_group(mut self, name: &str, label: &str, position: [f32; 3]) -> Self {
        let [x, y, z] = position;
        self.scene
            .add_entity(EntityTemplate::group(name).with_label(label).at(x, y, z));
        self
    }

    /// Add an entity positioned relative to an earlier entity
    pub fn add_child(mut self, parent: &str, entity: EntityTemplate) -> Self {
        self.scene.add_entity(entity.with_parent(parent));
        self
    }

    /// Add a custom entity to the scene
    ///
    /// For entities that don't fit the standard patterns.
    pub fn add_entity(mut self, entity: EntityTemplate) -> Self {
        self.scene.add_entity(entity);
        self
    }

    /// Build the scene
    pub fn build(self) -> Scene {
        self.scene
    }
}

/// The minimal demo: a unit box resting on nothing, lit from above
///
/// The camera sits on a 5-unit orbit a third of a turn above the horizon,
/// looking at the origin.
pub fn demo_scene() -> Scene {
    let (alpha, beta, radius) = (std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_3, 5.0);
    let eye = [
        radius * alpha.cos() * beta.sin(),
        radius * beta.cos(),
        radius * alpha.sin() * beta.sin(),
    ];

    SceneBuilder::new("demo")
        .with_camera(eye, [0.0, 0.0, 0.0])
        .with_lighting(Lighting {
            intensity: 0.9,
            ..Lighting::default()
        })
        .with_clear_color([0.2, 0.2, 0.3, 1.0])
        .add_box("box", [1.0, 1.0, 1.0], [0.0, 0.5, 0.0], None)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardroom_core::SceneValidator;
    use wardroom_math::Vec3;

    #[test]
    fn test_empty_scene() {
        let scene = SceneBuilder::new("empty").build();
        assert!(scene.entities.is_empty());
        assert_eq!(scene.instantiate().unwrap().entity_count(), 0);
    }

    #[test]
    fn test_demo_scene() {
        let scene = demo_scene();
        assert!(SceneValidator::validate(&scene).is_empty());
        assert_eq!(scene.lighting.intensity, 0.9);
        assert_eq!(scene.clear_color, [0.2, 0.2, 0.3, 1.0]);

        let eye = Vec3::from_array(scene.camera.position);
        assert!((eye - Vec3::new(0.0, 2.5, 4.330127)).length() < 1e-4);

        let world = scene.instantiate().unwrap();
        let key = world.find_by_name("box").unwrap();
        let pose = world.world_pose(key).unwrap();
        assert_eq!(pose.translation, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_group_children_share_label() {
        let scene = SceneBuilder::new("ward")
            .add_material("equipment", Material::GRAY)
            .add_group("bed", "Bed", [-2.5, 0.0, 1.5])
            .add_child(
                "bed",
                EntityTemplate::new("mattress", ShapeTemplate::Box { width: 2.1, height: 0.25, depth: 2.8 })
                    .with_material("equipment")
                    .at(0.0, 0.55, 0.0),
            )
            .build();

        let world = scene.instantiate().unwrap();
        let mattress = world.find_by_name("mattress").unwrap();
        assert_eq!(world.owning_label(mattress), Some("Bed"));
        let pose = world.world_pose(mattress).unwrap();
        assert!((pose.translation - Vec3::new(-2.5, 0.55, 1.5)).length() < 1e-5);
    }

    #[test]
    fn test_ground_uses_material() {
        let scene = SceneBuilder::new("floor only")
            .add_material("floor", Material::from_rgb(0.3, 0.3, 0.3))
            .add_ground("floor", 12.0, 10.0, "floor")
            .build();

        let world = scene.instantiate().unwrap();
        let floor = world.get_entity(world.find_by_name("floor").unwrap()).unwrap();
        assert_eq!(floor.material.diffuse, [0.3, 0.3, 0.3]);
        assert!(floor.has_tag("structure"));
    }
}
