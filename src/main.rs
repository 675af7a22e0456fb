//! Wardroom - walkable hospital-room scene
//!
//! Walk with the on-screen joystick or WASD, look by dragging on the right
//! half of the window, tap or click equipment to see what it is.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use wardroom::config::AppConfig;
use wardroom::input::{InputAction, InputMapper};
use wardroom::scene::{demo_scene, load_scene};
use wardroom::systems::{FrameSystem, RenderError, RenderSystem, WindowSystem};
use wardroom_core::Scene;
use wardroom_input::{PointerEvent, PointerPhase};
use wardroom_math::Vec2;
use wardroom_render::{AdaptiveScaler, ResolutionTarget};

/// Main application state
struct App {
    config: AppConfig,
    scene: Scene,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    frame: Option<FrameSystem>,
    scaler: AdaptiveScaler,
    /// Last cursor position in physical pixels
    cursor: Vec2,
    left_held: bool,
}

impl App {
    fn new() -> Self {
        // Load configuration
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let scene = load_scene(&config.scene);
        let scaler = AdaptiveScaler::new(config.scaling.to_scaler_config(), Instant::now());

        Self {
            config,
            scene,
            window: None,
            render: None,
            frame: None,
            scaler,
            cursor: Vec2::ZERO,
            left_held: false,
        }
    }

    /// Build the per-frame state, falling back to the demo scene
    fn create_frame(&self, viewport: Vec2) -> Option<FrameSystem> {
        match FrameSystem::new(&self.scene, &self.config, viewport) {
            Ok(frame) => Some(frame),
            Err(e) => {
                log::warn!("Scene '{}' cannot be built: {}; using demo scene", self.scene.name, e);
                FrameSystem::new(&demo_scene(), &self.config, viewport)
                    .map_err(|e| log::error!("Demo scene cannot be built: {}", e))
                    .ok()
            }
        }
    }

    /// Route a pointer event to the frame system
    fn pointer(&mut self, phase: PointerPhase, event: PointerEvent) {
        if let (Some(frame), Some(window)) = (self.frame.as_mut(), self.window.as_mut()) {
            frame.handle_pointer(phase, &event, window);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(frame), Some(render)) = (self.frame.as_mut(), self.render.as_mut()) else {
            return;
        };

        frame.update();

        match render.render_frame(frame.camera(), frame.lighting(), frame.clear_color()) {
            Ok(()) => {
                if self.config.scaling.enabled {
                    let sampled = self.scaler.last_fps();
                    self.scaler.frame_rendered(Instant::now(), render);
                    if self.config.debug.log_fps && self.scaler.last_fps() != sampled {
                        if let Some(fps) = self.scaler.last_fps() {
                            log::info!("{:.1} fps at divisor {:.2}", fps, render.scaling_level());
                        }
                    }
                }
            }
            Err(RenderError::SurfaceLost) => render.reconfigure(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(window.window().clone(), self.config.window.vsync) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let Some(frame) = self.create_frame(window.viewport()) else {
            event_loop.exit();
            return;
        };
        render.upload_geometry(&frame.geometry());

        if self.config.scaling.enabled {
            self.scaler = AdaptiveScaler::new(self.config.scaling.to_scaler_config(), Instant::now());
            self.scaler
                .apply_initial(&self.config.scaling.device_hints(), &mut render);
        }

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
        self.frame = Some(frame);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let now = Instant::now();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    return;
                }
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                if let Some(frame) = &mut self.frame {
                    frame.set_viewport(Vec2::new(
                        physical_size.width as f32,
                        physical_size.height as f32,
                    ));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };

                if !event.repeat {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(InputAction::Exit) => {
                            event_loop.exit();
                            return;
                        }
                        Some(InputAction::Select) => {
                            if let (Some(frame), Some(window)) = (&self.frame, self.window.as_mut()) {
                                frame.select_center(window);
                            }
                        }
                        Some(InputAction::ResetCamera) => {
                            if let Some(frame) = &mut self.frame {
                                frame.reset_camera();
                            }
                        }
                        Some(InputAction::ToggleFullscreen) => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        None => {}
                    }
                }

                // Pass to frame system for movement keys
                if let Some(frame) = &mut self.frame {
                    frame.handle_key(key, event.state);
                }
            }

            WindowEvent::Touch(touch) => {
                let (phase, pointer) = PointerEvent::from_touch(&touch, now);
                self.pointer(phase, pointer);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let pointer = PointerEvent::mouse(self.cursor.x, self.cursor.y, self.left_held, now);
                self.pointer(PointerPhase::Move, pointer);
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.left_held = state == ElementState::Pressed;
                let phase = if self.left_held { PointerPhase::Down } else { PointerPhase::Up };
                let pointer = PointerEvent::mouse(self.cursor.x, self.cursor.y, true, now);
                self.pointer(phase, pointer);
            }

            WindowEvent::CursorLeft { .. } => {
                if self.left_held {
                    self.left_held = false;
                    let pointer = PointerEvent::mouse(self.cursor.x, self.cursor.y, true, now);
                    self.pointer(PointerPhase::Cancel, pointer);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Wardroom");

    // Create event loop
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
