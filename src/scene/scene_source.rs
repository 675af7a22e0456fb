//! Startup scene selection

use std::path::Path;

use wardroom_core::{Scene, SceneValidator};

use super::demo_scene;
use crate::config::SceneConfig;

/// Load the configured scene, falling back to the demo when it is unusable
///
/// A scene is unusable when it cannot be read or parsed, fails validation
/// (when enabled), or cannot be instantiated.
pub fn load_scene(config: &SceneConfig) -> Scene {
    if config.demo {
        log::info!("Demo scene requested");
        return demo_scene();
    }
    load_scene_or_demo(&config.path, config.validate)
}

/// Load a scene file, or the demo scene with a warning
pub fn load_scene_or_demo(path: &Path, validate: bool) -> Scene {
    let scene = match Scene::load(path) {
        Ok(scene) => scene,
        Err(e) => {
            log::warn!("Failed to load scene {}: {}; using demo scene", path.display(), e);
            return demo_scene();
        }
    };

    if validate {
        if let Err(errors) = SceneValidator::validate_or_error(&scene) {
            for error in &errors {
                log::warn!("Scene '{}': {}", scene.name, error);
            }
            log::warn!("Scene {} is invalid; using demo scene", path.display());
            return demo_scene();
        }
    }

    if let Err(e) = scene.instantiate() {
        log::warn!("Scene {} cannot be built: {}; using demo scene", path.display(), e);
        return demo_scene();
    }

    log::info!(
        "Loaded scene '{}' from {} ({} entities)",
        scene.name,
        path.display(),
        scene.entities.len()
    );
    scene
}
