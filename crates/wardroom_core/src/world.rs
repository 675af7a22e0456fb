//! World container for entities
//!
//! The World owns every entity in a slotmap arena and keeps two indices:
//! entity names for lookup, and each entity's *owning label* (its own label
//! or the nearest labelled ancestor's). The label index is refreshed whenever
//! an entity is inserted, relabelled or removed, so selection resolves a
//! picked entity to its label with a single table lookup.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::transform::Pose;
use crate::Entity;

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// Errors from structural world edits
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The given parent key is not in this world
    UnknownParent,
    /// Another entity already uses this name
    DuplicateName(String),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::UnknownParent => write!(f, "Parent entity does not exist"),
            WorldError::DuplicateName(name) => write!(f, "Duplicate entity name: '{}'", name),
        }
    }
}

impl std::error::Error for WorldError {}

/// The scene world containing all entities
#[derive(Default)]
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    children: HashMap<EntityKey, Vec<EntityKey>>,
    name_index: HashMap<String, EntityKey>,
    label_index: HashMap<EntityKey, String>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            ..Self::default()
        }
    }

    /// Add a root entity
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityKey, WorldError> {
        self.insert(entity, None)
    }

    /// Add an entity owned by `parent`
    ///
    /// The child's transform is relative to the parent and, when the child has
    /// no label of its own, it inherits the parent's owning label.
    pub fn add_child(&mut self, parent: EntityKey, entity: Entity) -> Result<EntityKey, WorldError> {
        if !self.entities.contains_key(parent) {
            return Err(WorldError::UnknownParent);
        }
        self.insert(entity, Some(parent))
    }

    fn insert(&mut self, mut entity: Entity, parent: Option<EntityKey>) -> Result<EntityKey, WorldError> {
        if let Some(name) = entity.name() {
            if self.name_index.contains_key(name) {
                return Err(WorldError::DuplicateName(name.to_string()));
            }
        }

        entity.set_parent(parent);
        let name = entity.name().map(str::to_string);
        let key = self.entities.insert(entity);

        if let Some(name) = name {
            self.name_index.insert(name, key);
        }
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(key);
        }
        self.refresh_label(key);

        Ok(key)
    }

    /// Remove an entity and all of its descendants
    ///
    /// Returns the removed entity (descendants are dropped).
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        let parent = self.entities.get(key)?.parent();
        if let Some(siblings) = parent.and_then(|p| self.children.get_mut(&p)) {
            siblings.retain(|k| *k != key);
        }

        let mut removed = None;
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(children) = self.children.remove(&current) {
                stack.extend(children);
            }
            self.label_index.remove(&current);
            if let Some(entity) = self.entities.remove(current) {
                if let Some(name) = entity.name() {
                    self.name_index.remove(name);
                }
                if current == key {
                    removed = Some(entity);
                }
            }
        }
        removed
    }

    /// Set or clear an entity's own label and refresh its subtree
    pub fn set_label(&mut self, key: EntityKey, label: Option<String>) -> bool {
        let Some(entity) = self.entities.get_mut(key) else {
            return false;
        };
        entity.set_label(label);

        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            self.refresh_label(current);
            if let Some(children) = self.children.get(&current) {
                stack.extend(children.iter().copied());
            }
        }
        true
    }

    /// Recompute one entry of the label index from the entity and its parent
    ///
    /// Parents are always indexed before their children, so one step suffices.
    fn refresh_label(&mut self, key: EntityKey) {
        let Some(entity) = self.entities.get(key) else {
            return;
        };
        let resolved = entity
            .label()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| {
                entity
                    .parent()
                    .and_then(|p| self.label_index.get(&p).cloned())
            });

        match resolved {
            Some(label) => {
                self.label_index.insert(key, label);
            }
            None => {
                self.label_index.remove(&key);
            }
        }
    }

    /// The label that owns this entity: its own or its nearest labelled ancestor's
    pub fn owning_label(&self, key: EntityKey) -> Option<&str> {
        self.label_index.get(&key).map(String::as_str)
    }

    /// Get a reference to an entity
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity
    ///
    /// Name, label and parent stay read-only through this reference.
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find an entity by name
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.name_index.get(name).copied()
    }

    /// Direct children of an entity
    pub fn children(&self, key: EntityKey) -> &[EntityKey] {
        self.children.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve an entity's world-space pose by composing its parents' transforms
    pub fn world_pose(&self, key: EntityKey) -> Option<Pose> {
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            let entity = self.entities.get(k)?;
            chain.push(&entity.transform);
            current = entity.parent();
        }

        let mut pose = Pose::IDENTITY;
        for transform in chain.into_iter().rev() {
            pose = pose.then(transform);
        }
        Some(pose)
    }

    /// Iterate over all entities
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over all entities with their keys
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        self.entities.clear();
        self.children.clear();
        self.name_index.clear();
        self.label_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeTemplate;
    use wardroom_math::Vec3;

    fn cube() -> Entity {
        Entity::new(ShapeTemplate::Box { width: 1.0, height: 1.0, depth: 1.0 })
    }

    #[test]
    fn test_child_inherits_group_label() {
        let mut world = World::new();
        let bed = world.add_entity(Entity::group().with_name("bed").with_label("Bed")).unwrap();
        let mattress = world.add_child(bed, cube().with_name("mattress")).unwrap();

        assert_eq!(world.owning_label(mattress), Some("Bed"));
        assert_eq!(world.get_entity(mattress).unwrap().label(), None);
    }

    #[test]
    fn test_nested_inheritance_and_override() {
        let mut world = World::new();
        let cart = world.add_entity(Entity::group().with_label("Defib/Cart Zone")).unwrap();
        let drawer = world.add_child(cart, Entity::group()).unwrap();
        let handle = world.add_child(drawer, cube()).unwrap();
        let paddles = world.add_child(drawer, cube().with_label("Paddles")).unwrap();

        assert_eq!(world.owning_label(handle), Some("Defib/Cart Zone"));
        assert_eq!(world.owning_label(paddles), Some("Paddles"));
    }

    #[test]
    fn test_unlabelled_entity_has_no_owner() {
        let mut world = World::new();
        let wall = world.add_entity(cube().with_name("backWall")).unwrap();
        assert_eq!(world.owning_label(wall), None);
    }

    #[test]
    fn test_empty_label_is_ignored() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group().with_label("Monitor")).unwrap();
        let screen = world.add_child(group, cube().with_label("")).unwrap();
        assert_eq!(world.owning_label(screen), Some("Monitor"));
    }

    #[test]
    fn test_relabel_refreshes_descendants() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group().with_label("IV Pole")).unwrap();
        let bag = world.add_child(group, cube()).unwrap();

        assert!(world.set_label(group, Some("IV Pole/Pump".to_string())));
        assert_eq!(world.owning_label(bag), Some("IV Pole/Pump"));

        world.set_label(group, None);
        assert_eq!(world.owning_label(bag), None);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut world = World::new();
        let ghost = world.add_entity(cube()).unwrap();
        world.remove_entity(ghost);
        assert_eq!(world.add_child(ghost, cube()), Err(WorldError::UnknownParent));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut world = World::new();
        world.add_entity(cube().with_name("floor")).unwrap();
        assert_eq!(
            world.add_entity(cube().with_name("floor")),
            Err(WorldError::DuplicateName("floor".to_string()))
        );
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group().with_name("vent")).unwrap();
        let tube = world.add_child(group, cube().with_name("ventTube")).unwrap();

        let removed = world.remove_entity(group).unwrap();
        assert_eq!(removed.name(), Some("vent"));
        assert!(world.get_entity(tube).is_none());
        assert!(world.find_by_name("ventTube").is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_world_pose_composes_parents() {
        let mut world = World::new();
        let group = world
            .add_entity(Entity::group().at(Vec3::new(1.8, 0.0, 3.2)))
            .unwrap();
        let pump = world.add_child(group, cube().at(Vec3::new(0.0, 1.4, 0.0))).unwrap();

        let pose = world.world_pose(pump).unwrap();
        assert!((pose.translation - Vec3::new(1.8, 1.4, 3.2)).length() < 1e-5);
    }
}
