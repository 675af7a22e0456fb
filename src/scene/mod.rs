//! Scene construction utilities
//!
//! A declarative builder for code-made scenes, the built-in demo scene, and
//! startup loading of scene files with a demo fallback.

mod scene_builder;
mod scene_source;

pub use scene_builder::{demo_scene, SceneBuilder};
pub use scene_source::{load_scene, load_scene_or_demo};
