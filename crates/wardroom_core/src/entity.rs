//! Entity and Material types
//!
//! An Entity is an object in the scene: a transform relative to its parent,
//! an optional shape, a material, and an optional human-readable label used
//! by selection. Entities without a shape act as grouping nodes.

use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use wardroom_math::Vec3;

use crate::shapes::ShapeTemplate;
use crate::{EntityKey, Transform3D};

/// Surface appearance of an entity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse (lit) color as RGB
    pub diffuse: [f32; 3],
    /// Self-illuminated color added regardless of lighting
    #[serde(default)]
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create an opaque, non-emissive material with the given RGB color
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            diffuse: [r, g, b],
            emissive: [0.0, 0.0, 0.0],
        }
    }

    /// Builder: set the emissive color
    pub const fn with_emissive(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Check whether the material glows on its own
    pub fn is_emissive(&self) -> bool {
        self.emissive.iter().any(|c| *c > 0.0)
    }

    /// White material
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);

    /// Gray material
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
}

/// An entity in the scene
///
/// `name`, `label` and `parent` are indexed by the [`World`](crate::World),
/// so they are only settable through builders before insertion or through
/// `World` methods afterwards.
#[derive(Clone, Debug)]
pub struct Entity {
    name: Option<String>,
    label: Option<String>,
    parent: Option<EntityKey>,
    /// Tags for categorization (e.g., "structure", "equipment")
    pub tags: HashSet<String>,
    /// Transform relative to the parent (or the world when there is none)
    pub transform: Transform3D,
    /// Geometry; `None` for grouping nodes
    pub shape: Option<ShapeTemplate>,
    /// The entity's material
    pub material: Material,
    /// Whether picking rays can hit this entity
    pub pickable: bool,
}

impl Entity {
    /// Create a visible entity with the given shape
    pub fn new(shape: ShapeTemplate) -> Self {
        Self {
            name: None,
            label: None,
            parent: None,
            tags: HashSet::new(),
            transform: Transform3D::identity(),
            shape: Some(shape),
            material: Material::default(),
            pickable: true,
        }
    }

    /// Create a shapeless grouping node
    pub fn group() -> Self {
        Self {
            shape: None,
            ..Self::new(ShapeTemplate::Box { width: 1.0, height: 1.0, depth: 1.0 })
        }
    }

    /// Builder: set the name (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the selection label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builder: set the position relative to the parent
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder: set the Euler rotation relative to the parent
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Builder: set whether picking rays can hit this entity
    pub fn with_pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    /// Lookup name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The entity's own label (not inherited)
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Owning parent, if any
    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Check whether this is a shapeless grouping node
    pub fn is_group(&self) -> bool {
        self.shape.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<EntityKey>) {
        self.parent = parent;
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }
}

/// A serializable entity template
///
/// Templates reference their parent and material by name; [`Scene::instantiate`](crate::Scene::instantiate)
/// resolves those names into keys and materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Unique name within the scene
    pub name: String,
    /// Selection label shared by this entity and its descendants
    #[serde(default)]
    pub label: Option<String>,
    /// Name of the owning entity (must appear earlier in the scene)
    #[serde(default)]
    pub parent: Option<String>,
    /// Geometry; omit for grouping nodes
    #[serde(default)]
    pub shape: Option<ShapeTemplate>,
    /// Position relative to the parent
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler rotation in radians relative to the parent
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Name of a material from the scene's material table
    #[serde(default)]
    pub material: Option<String>,
    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether picking rays can hit this entity
    #[serde(default = "default_pickable")]
    pub pickable: bool,
}

fn default_pickable() -> bool {
    true
}

impl EntityTemplate {
    /// Create a template for a shaped entity
    pub fn new(name: impl Into<String>, shape: ShapeTemplate) -> Self {
        Self {
            name: name.into(),
            label: None,
            parent: None,
            shape: Some(shape),
            position: [0.0; 3],
            rotation: [0.0; 3],
            material: None,
            tags: Vec::new(),
            pickable: true,
        }
    }

    /// Create a template for a grouping node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            shape: None,
            ..Self::new(name, ShapeTemplate::Box { width: 1.0, height: 1.0, depth: 1.0 })
        }
    }

    /// Builder: set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set the parent name
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Builder: set the material name
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Builder: set the position
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Builder: set the rotation
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = [x, y, z];
        self
    }

    /// Builder: add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Convert this template to an Entity with an already-resolved material
    ///
    /// The parent link is not set here; the world assigns it on insertion.
    pub fn to_entity(&self, material: Material) -> Entity {
        let mut entity = Entity {
            name: Some(self.name.clone()),
            label: self.label.clone(),
            parent: None,
            tags: self.tags.iter().cloned().collect(),
            transform: Transform3D::from_position(Vec3::from_array(self.position))
                .with_rotation(Vec3::from_array(self.rotation)),
            shape: self.shape,
            material,
            pickable: self.pickable,
        };
        if entity.label.as_deref() == Some("") {
            entity.label = None;
        }
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.diffuse, [1.0, 1.0, 1.0]);
        assert!(!m.is_emissive());
    }

    #[test]
    fn test_emissive_material() {
        let screen = Material::WHITE.with_emissive(0.1, 0.8, 0.9);
        assert!(screen.is_emissive());
    }

    #[test]
    fn test_group_has_no_shape() {
        let group = Entity::group().with_name("bed").with_label("Bed");
        assert!(group.is_group());
        assert_eq!(group.label(), Some("Bed"));
    }

    #[test]
    fn test_template_to_entity() {
        let template = EntityTemplate::new(
            "mattress",
            ShapeTemplate::Box { width: 2.1, height: 0.25, depth: 2.8 },
        )
        .with_parent("bed")
        .at(0.0, 0.55, 0.0);

        let entity = template.to_entity(Material::GRAY);
        assert_eq!(entity.name(), Some("mattress"));
        assert_eq!(entity.transform.position, Vec3::new(0.0, 0.55, 0.0));
        assert_eq!(entity.material, Material::GRAY);
        assert!(entity.parent().is_none());
        assert!(entity.pickable);
    }

    #[test]
    fn test_empty_label_is_no_label() {
        let entity = EntityTemplate::group("x").with_label("").to_entity(Material::WHITE);
        assert_eq!(entity.label(), None);
    }
}
