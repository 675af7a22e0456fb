//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene pass into a target reduced by the resolution divisor
//! - Upscale pass onto the surface

use std::sync::Arc;
use winit::window::Window;
use wardroom_core::Lighting;
use wardroom_render::{
    context::{ContextError, RenderContext},
    pipeline::{BlitPipeline, SceneUniforms, ScenePipeline},
    scaled_size, FirstPersonCamera, ResolutionTarget, SceneGeometry,
};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    scene_pipeline: ScenePipeline,
    blit_pipeline: BlitPipeline,
    /// Resolution divisor (1.0 = native)
    scale: f32,
}

impl RenderSystem {
    /// Create render system for a window
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let format = context.format();
        let scene_pipeline = ScenePipeline::new(&context.device, format);
        let blit_pipeline = BlitPipeline::new(&context.device, format);

        let mut system = Self {
            context,
            scene_pipeline,
            blit_pipeline,
            scale: 1.0,
        };
        system.ensure_targets();
        Ok(system)
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.ensure_targets();
    }

    /// Reconfigure the surface after it was lost or outdated
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Upload geometry to GPU
    pub fn upload_geometry(&mut self, geometry: &SceneGeometry) {
        self.scene_pipeline
            .upload_geometry(&self.context.device, geometry);
        log::info!(
            "Uploaded {} vertices and {} triangles",
            geometry.vertex_count(),
            geometry.triangle_count()
        );
    }

    /// Size the offscreen color and depth targets for the current divisor
    fn ensure_targets(&mut self) {
        let (width, height) = self.target_size();
        self.blit_pipeline
            .ensure_target(&self.context.device, width, height);
        self.scene_pipeline
            .ensure_depth_texture(&self.context.device, width, height);
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        camera: &FirstPersonCamera,
        lighting: &Lighting,
        clear_color: [f32; 4],
    ) -> Result<(), RenderError> {
        self.ensure_targets();

        let aspect = self.context.aspect_ratio();
        let uniforms = SceneUniforms::new(camera.view_projection(aspect), camera.position, lighting);
        self.scene_pipeline
            .update_uniforms(&self.context.queue, &uniforms);

        // Get surface texture
        let output = self.context.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let Some(target_view) = self.blit_pipeline.target_view() else {
            return Err(RenderError::Other("scene target not created".to_string()));
        };

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b, a] = clear_color;
        self.scene_pipeline.render(
            &mut encoder,
            target_view,
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        );
        self.blit_pipeline.render(&mut encoder, &surface_view);

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    /// Size of the scene target at the current divisor
    pub fn target_size(&self) -> (u32, u32) {
        scaled_size(self.context.config.width, self.context.config.height, self.scale)
    }
}

impl ResolutionTarget for RenderSystem {
    fn scaling_level(&self) -> f32 {
        self.scale
    }

    fn set_scaling_level(&mut self, level: f32) {
        self.scale = level;
        let (width, height) = self.target_size();
        log::debug!("Scene target now {}x{} (divisor {:.2})", width, height, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Timeout), RenderError::Other(_)));
    }
}
