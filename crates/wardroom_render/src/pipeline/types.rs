//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use wardroom_core::{Lighting, SpotLight};
use wardroom_math::{mat4, Mat4, Vec3};

/// A world-space vertex with its material colors
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Surface normal in world space
    pub normal: [f32; 3],
    /// Diffuse color
    pub color: [f32; 3],
    /// Emissive color, added after lighting
    pub emissive: [f32; 3],
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 3],
            emissive: [0.0; 3],
        }
    }
}

/// Uniforms for the scene pass
/// Layout: 144 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// World-to-clip matrix (64 bytes)
    pub view_projection: [[f32; 4]; 4],
    /// Hemispheric light sky direction (16 bytes)
    pub sky_direction: [f32; 3],
    pub hemi_intensity: f32,
    /// Spot light position (16 bytes)
    pub spot_position: [f32; 3],
    pub spot_intensity: f32,
    /// Spot light direction (normalized) and cosine of the half cone angle (16 bytes)
    pub spot_direction: [f32; 3],
    pub spot_cos_cutoff: f32,
    /// Spot falloff exponent + padding (16 bytes)
    pub spot_exponent: f32,
    pub _padding: [f32; 3],
    /// Eye position + padding (16 bytes)
    pub camera_position: [f32; 3],
    pub _padding2: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_projection: mat4::IDENTITY,
            sky_direction: [0.0, 1.0, 0.0],
            hemi_intensity: 1.0,
            spot_position: [0.0; 3],
            spot_intensity: 0.0,
            spot_direction: [0.0, -1.0, 0.0],
            spot_cos_cutoff: 1.0,
            spot_exponent: 1.0,
            _padding: [0.0; 3],
            camera_position: [0.0; 3],
            _padding2: 0.0,
        }
    }
}

impl SceneUniforms {
    /// Build uniforms from a camera matrix and scene lighting
    pub fn new(view_projection: Mat4, camera_position: Vec3, lighting: &Lighting) -> Self {
        let mut uniforms = Self {
            view_projection,
            sky_direction: Vec3::from_array(lighting.sky_direction).normalized().to_array(),
            hemi_intensity: lighting.intensity,
            camera_position: camera_position.to_array(),
            ..Self::default()
        };
        if let Some(spot) = &lighting.spot {
            uniforms.set_spot(spot);
        }
        uniforms
    }

    fn set_spot(&mut self, spot: &SpotLight) {
        self.spot_position = spot.position;
        self.spot_direction = Vec3::from_array(spot.direction).normalized().to_array();
        self.spot_cos_cutoff = (spot.angle * 0.5).cos();
        self.spot_exponent = spot.exponent;
        self.spot_intensity = spot.intensity;
    }
}
