//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`WARD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use wardroom_input::TrackerConfig;
use wardroom_render::{DeviceHints, ScalerConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Touch, joystick and mouse configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Adaptive resolution configuration
    #[serde(default)]
    pub scaling: ScalingConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Scene file configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`WARD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        } else {
            log::warn!("{} not found, using built-in defaults", default_path.display());
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // WARD_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("WARD_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Base window title; the selection is appended to it
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Wardroom".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Movement speed per frame of input
    pub speed: f32,
    /// Fraction of velocity kept each frame
    pub inertia: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Maximum absolute pitch in radians
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 0.18,
            inertia: 0.9,
            fov: 0.8,
            near: 0.1,
            far: 100.0,
            pitch_limit: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

/// Touch, joystick and mouse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Joystick control radius in pixels
    pub joystick_radius: f32,
    /// Gap between the joystick control and the bottom-left window corner
    pub joystick_margin: f32,
    /// Drag distance that gives a full-strength joystick vector
    pub joystick_max_radius: f32,
    /// Touch look radians per pixel
    pub look_sensitivity: f32,
    /// Pitch bound for touch look in radians
    pub look_pitch_limit: f32,
    /// Mouse drag radians per pixel
    pub mouse_sensitivity: f32,
    /// Movement in pixels that turns a tap into a drag
    pub tap_slop: f32,
    /// Longest press that still counts as a tap, in milliseconds
    pub tap_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            joystick_radius: 60.0,
            joystick_margin: 24.0,
            joystick_max_radius: 40.0,
            look_sensitivity: 0.0025,
            look_pitch_limit: 1.3,
            mouse_sensitivity: 1.0 / 4000.0,
            tap_slop: 12.0,
            tap_timeout_ms: 250,
        }
    }
}

impl InputConfig {
    /// Tap classification settings for the pointer tracker
    pub fn to_tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            tap_slop: self.tap_slop,
            tap_timeout: Duration::from_millis(self.tap_timeout_ms),
        }
    }
}

/// Adaptive resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Disable to always render at native resolution
    pub enabled: bool,
    /// Frame-rate sample window in milliseconds
    pub sample_interval_ms: u64,
    pub low_fps: f32,
    pub high_fps: f32,
    pub step_up: f32,
    pub step_down: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub epsilon: f32,
    pub low_memory_gb: f32,
    pub low_memory_scale: f32,
    pub low_core_count: usize,
    pub low_core_scale: f32,
    pub coarse_pointer_scale: f32,
    /// Device memory hint in gigabytes (unknown when unset)
    pub device_memory_gb: Option<f32>,
    /// Logical core count override (detected when unset)
    pub logical_cores: Option<usize>,
    /// Treat the primary pointer as a finger
    pub coarse_pointer: bool,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        let scaler = ScalerConfig::default();
        Self {
            enabled: true,
            sample_interval_ms: scaler.sample_interval.as_millis() as u64,
            low_fps: scaler.low_fps,
            high_fps: scaler.high_fps,
            step_up: scaler.step_up,
            step_down: scaler.step_down,
            min_scale: scaler.min_scale,
            max_scale: scaler.max_scale,
            epsilon: scaler.epsilon,
            low_memory_gb: scaler.low_memory_gb,
            low_memory_scale: scaler.low_memory_scale,
            low_core_count: scaler.low_core_count,
            low_core_scale: scaler.low_core_scale,
            coarse_pointer_scale: scaler.coarse_pointer_scale,
            device_memory_gb: None,
            logical_cores: None,
            coarse_pointer: false,
        }
    }
}

impl ScalingConfig {
    /// Thresholds and bounds for the scaler
    pub fn to_scaler_config(&self) -> ScalerConfig {
        ScalerConfig {
            sample_interval: Duration::from_millis(self.sample_interval_ms),
            low_fps: self.low_fps,
            high_fps: self.high_fps,
            step_up: self.step_up,
            step_down: self.step_down,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            epsilon: self.epsilon,
            low_memory_gb: self.low_memory_gb,
            low_memory_scale: self.low_memory_scale,
            low_core_count: self.low_core_count,
            low_core_scale: self.low_core_scale,
            coarse_pointer_scale: self.coarse_pointer_scale,
        }
    }

    /// Detected device hints with configured overrides applied
    pub fn device_hints(&self) -> DeviceHints {
        let detected = DeviceHints::detect();
        DeviceHints {
            device_memory_gb: self.device_memory_gb.or(detected.device_memory_gb),
            logical_cores: self.logical_cores.or(detected.logical_cores),
            coarse_pointer: self.coarse_pointer || detected.coarse_pointer,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Multiplier on the scene's hemispheric light intensity
    pub light_scale: f32,
    /// Overrides the scene's background color [r, g, b, a] when set
    pub background_color: Option<[f32; 4]>,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            light_scale: 1.0,
            background_color: None,
        }
    }
}

/// Scene file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene to load at startup
    pub path: PathBuf,
    /// Ignore `path` and show the built-in demo scene
    pub demo: bool,
    /// Run the scene validator after loading
    pub validate: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scenes/hospital_room.ron"),
            demo: false,
            validate: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log the measured frame rate with every scaler sample
    pub log_fps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { log_fps: false }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.input.joystick_max_radius, 40.0);
        assert_eq!(config.scaling.max_scale, 2.5);
        assert_eq!(config.scene.path, PathBuf::from("scenes/hospital_room.ron"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("sample_interval_ms"));
        assert!(toml.contains("joystick_radius"));
    }

    #[test]
    fn test_scaler_config_round_trip() {
        let scaling = ScalingConfig::default();
        assert_eq!(scaling.to_scaler_config(), ScalerConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[scaling]\nlow_fps = 30.0\n").unwrap();
        assert_eq!(config.scaling.low_fps, 30.0);
        assert_eq!(config.scaling.high_fps, 58.0);
        assert_eq!(config.window.title, "Wardroom");
    }

    #[test]
    fn test_device_hint_overrides() {
        let scaling = ScalingConfig {
            device_memory_gb: Some(3.0),
            logical_cores: Some(8),
            coarse_pointer: true,
            ..ScalingConfig::default()
        };
        let hints = scaling.device_hints();
        assert_eq!(hints.device_memory_gb, Some(3.0));
        assert_eq!(hints.logical_cores, Some(8));
        assert!(hints.coarse_pointer);
    }

    #[test]
    fn test_tracker_config() {
        let tracker = InputConfig::default().to_tracker_config();
        assert_eq!(tracker.tap_slop, 12.0);
        assert_eq!(tracker.tap_timeout, Duration::from_millis(250));
    }
}
