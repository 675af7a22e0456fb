//! Mathematics for the Wardroom scene
//!
//! ## Core Types
//!
//! - [`Vec2`] - screen-space points and drag vectors
//! - [`Vec3`] - world-space positions and directions
//! - [`Mat3`] - rotation bases for entity transforms
//! - [`mat4`] - column-major 4x4 helpers for view/projection
//! - [`Ray`] / [`Aabb`] - picking queries
//!
//! ## Primitives
//!
//! - [`Primitive`] - trait for shapes that produce a triangle mesh and local bounds
//! - [`Cuboid`], [`Cylinder`], [`Ground`]

mod vec2;
mod vec3;
mod mat3;
pub mod mat4;
pub mod ray;
pub mod shape;
pub mod cuboid;
pub mod cylinder;
pub mod ground;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use ray::{Aabb, Ray};
pub use shape::{Mesh, Primitive};
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use ground::Ground;
