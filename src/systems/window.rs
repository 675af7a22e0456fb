//! Window management system
//!
//! Handles window creation, fullscreen toggle, and the title that shows the
//! current selection.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use wardroom_input::SelectionDisplay;
use wardroom_math::Vec2;

use crate::config::WindowConfig;

/// Title placeholder when nothing is selected
pub const NO_SELECTION: &str = "None";

/// Manages the application window and its selection title
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    selection: Option<String>,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(selection_title(&config.title, None))
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
            selection: None,
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Inner size in physical pixels
    pub fn viewport(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    /// Currently displayed selection
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl SelectionDisplay for WindowSystem {
    fn show(&mut self, label: Option<&str>) {
        if self.selection.as_deref() != label {
            log::info!("Selected: {}", label.unwrap_or(NO_SELECTION));
        }
        self.selection = label.map(str::to_owned);
        self.window.set_title(&selection_title(&self.base_title, label));
    }
}

/// Window title for a selection
pub fn selection_title(base: &str, label: Option<&str>) -> String {
    format!("{} - Selected: {}", base, label.unwrap_or(NO_SELECTION))
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
