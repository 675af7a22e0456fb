//! Application systems
//!
//! Window, render and per-frame state kept apart from main.rs so each can be
//! tested on its own.

mod frame;
mod render;
mod window;

pub use frame::FrameSystem;
pub use render::{RenderError, RenderSystem};
pub use window::{selection_title, WindowError, WindowSystem, NO_SELECTION};
