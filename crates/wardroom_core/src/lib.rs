//! Core types for the Wardroom scene
//!
//! - [`Transform3D`] / [`Pose`] - local transforms and resolved world poses
//! - [`Material`] - diffuse and emissive color of an entity
//! - [`Entity`] - an object (or grouping node) with an optional selection label
//! - [`World`] - slotmap container with name and owning-label indices
//! - [`EntityKey`] - generational key to an entity in the world
//! - [`ShapeTemplate`] / [`EntityTemplate`] - serializable scene building blocks
//! - [`Scene`] - loadable/saveable room description
//! - [`SceneValidator`] - authoring checks for scenes
//! - [`pick`] - nearest entity along a ray

mod transform;
mod entity;
mod world;
mod shapes;
mod scene;
mod scene_validator;
mod picking;

pub use transform::{Transform3D, Pose};
pub use entity::{Material, Entity, EntityTemplate};
pub use world::{World, EntityKey, WorldError};
pub use shapes::ShapeTemplate;
pub use scene::{Scene, CameraSpawn, Lighting, SpotLight, SceneError, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};
pub use picking::{pick, PickHit};

// Re-export commonly used math types for convenience
pub use wardroom_math::{Vec2, Vec3, Ray, Aabb};
