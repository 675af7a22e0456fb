//! Wardroom - walkable hospital-room scene
//!
//! Library half of the `wardroom` binary: configuration, key mapping,
//! scene construction and the window/render/frame systems.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
