//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use wardroom::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("WARD_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("WARD_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_numbers() {
    std::env::set_var("WARD_SCALING__LOW_FPS", "30");
    std::env::set_var("WARD_INPUT__TAP_TIMEOUT_MS", "400");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("WARD_SCALING__LOW_FPS");
    std::env::remove_var("WARD_INPUT__TAP_TIMEOUT_MS");

    assert_eq!(config.scaling.low_fps, 30.0);
    assert_eq!(config.input.tap_timeout_ms, 400);
    assert_eq!(config.scaling.to_scaler_config().low_fps, 30.0);
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("WARD_WINDOW__TITLE");

    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.window.title, builtin.window.title);
    assert_eq!(config.input.joystick_radius, builtin.input.joystick_radius);
    assert_eq!(config.scaling.to_scaler_config(), builtin.scaling.to_scaler_config());
    assert_eq!(config.scene.path, builtin.scene.path);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 1280);
    assert!(config.scaling.enabled);
}
