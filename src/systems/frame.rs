//! Per-frame walkthrough state
//!
//! Owns the instantiated world, the camera and its input controller, and
//! runs the frame steps in order:
//! - Pointer and keyboard events → controller (taps select immediately)
//! - Joystick, touch look, mouse look and keys → camera velocity/rotation
//! - Camera integration with inertia

use wardroom_core::{Lighting, Scene, SceneError, World};
use wardroom_input::{
    select_at, select_center, CameraController, PointerEvent, PointerPhase, SelectionDisplay,
};
use wardroom_math::Vec2;
use wardroom_render::{FirstPersonCamera, SceneGeometry, SceneView};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::config::AppConfig;

/// The walkable scene and everything that moves through it
pub struct FrameSystem {
    world: World,
    lighting: Lighting,
    clear_color: [f32; 4],
    camera: FirstPersonCamera,
    controller: CameraController,
    viewport: Vec2,
}

impl FrameSystem {
    /// Instantiate a scene and place the camera at its spawn
    pub fn new(scene: &Scene, config: &AppConfig, viewport: Vec2) -> Result<Self, SceneError> {
        let world = scene.instantiate()?;

        let mut camera = FirstPersonCamera::from_spawn(&scene.camera);
        camera.speed = config.camera.speed;
        camera.inertia = config.camera.inertia;
        camera.fov = config.camera.fov;
        camera.near = config.camera.near;
        camera.far = config.camera.far;
        camera.pitch_limit = config.camera.pitch_limit;

        let input = &config.input;
        let controller = CameraController::new(viewport)
            .with_joystick(input.joystick_radius, input.joystick_margin, input.joystick_max_radius)
            .with_look_sensitivity(input.look_sensitivity)
            .with_look_pitch_limit(input.look_pitch_limit)
            .with_mouse_sensitivity(input.mouse_sensitivity)
            .with_tracker_config(input.to_tracker_config());

        let mut lighting = scene.lighting;
        lighting.intensity *= config.rendering.light_scale;

        Ok(Self {
            world,
            lighting,
            clear_color: config.rendering.background_color.unwrap_or(scene.clear_color),
            camera,
            controller,
            viewport,
        })
    }

    /// Update viewport-dependent layout after a resize
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.controller.set_viewport(viewport);
    }

    /// Route a pointer event; a completed tap or click selects
    pub fn handle_pointer<D>(&mut self, phase: PointerPhase, event: &PointerEvent, display: &mut D)
    where
        D: SelectionDisplay + ?Sized,
    {
        if let Some(point) = self.controller.process_pointer(phase, event) {
            select_at(point, &self.view(), display);
        }
    }

    /// Route a movement key; returns whether it was consumed
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        self.controller.process_keyboard(key, state)
    }

    /// Select whatever is under the viewport centre
    pub fn select_center<D: SelectionDisplay + ?Sized>(&self, display: &mut D) {
        select_center(&self.view(), display);
    }

    /// Return the camera to its spawn pose
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        log::info!("Camera reset to spawn");
    }

    /// Apply one frame of input and integrate the camera
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
        self.camera.update();
    }

    /// World-space triangles for the renderer
    pub fn geometry(&self) -> SceneGeometry {
        SceneGeometry::from_world(&self.world)
    }

    fn view(&self) -> SceneView<'_> {
        SceneView::new(&self.world, &self.camera, self.viewport)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }
}
