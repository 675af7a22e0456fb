//! Rendering for the Wardroom walkthrough
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::FirstPersonCamera`] - walkthrough camera with inertia
//! - [`pipeline::ScenePipeline`] - lit, depth-tested room geometry
//! - [`pipeline::BlitPipeline`] - upscales the reduced-resolution target
//! - [`scaler::AdaptiveScaler`] - frame-rate driven resolution divisor
//! - [`renderable::SceneGeometry`] - converts a World to GPU buffers
//! - [`view::SceneView`] - screen-point picking through the camera

pub mod context;
pub mod camera;
pub mod scaler;
pub mod pipeline;
pub mod renderable;
pub mod view;

pub use camera::FirstPersonCamera;
pub use scaler::{scaled_size, AdaptiveScaler, DeviceHints, ResolutionTarget, ScalerConfig};
pub use renderable::SceneGeometry;
pub use view::SceneView;
