//! Rendering pipeline components
//!
//! The scene pass draws lit room geometry into an offscreen target sized by
//! the adaptive scaler; the blit pass stretches that target over the surface.

pub mod types;
pub mod scene_pipeline;
pub mod blit_pipeline;

pub use types::{SceneUniforms, Vertex};
pub use scene_pipeline::{ScenePipeline, DEPTH_FORMAT};
pub use blit_pipeline::BlitPipeline;
