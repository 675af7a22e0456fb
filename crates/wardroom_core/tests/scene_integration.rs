//! Integration tests for the shipped hospital room scene
//!
//! These tests verify the scene file pipeline end to end:
//! 1. The RON file parses and passes validation
//! 2. Instantiation resolves parents, materials and owning labels
//! 3. Picking through the instantiated world resolves to equipment labels
//! 4. A scene survives a save/load cycle

use wardroom_core::{pick, Ray, Scene, SceneValidator, Vec3};

const HOSPITAL_ROOM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes/hospital_room.ron");

fn load_room() -> Scene {
    Scene::load(HOSPITAL_ROOM).expect("hospital room scene should load")
}

// ==================== Loading Tests ====================

#[test]
fn test_hospital_room_validates() {
    let scene = load_room();
    let errors = SceneValidator::validate(&scene);
    assert!(errors.is_empty(), "Expected a clean scene, got: {:?}", errors);
}

#[test]
fn test_hospital_room_has_five_labelled_groups() {
    let scene = load_room();
    let mut labels: Vec<&str> = scene
        .entities
        .iter()
        .filter_map(|e| e.label.as_deref())
        .collect();
    labels.sort_unstable();

    assert_eq!(
        labels,
        vec!["Bed", "Defib/Cart Zone", "IV Pole/Pump", "Monitor", "Ventilator"]
    );
}

#[test]
fn test_hospital_room_lighting_and_background() {
    let scene = load_room();
    assert!((scene.lighting.intensity - 0.8).abs() < 1e-6);
    let spot = scene.lighting.spot.expect("scene should have a spot light");
    assert!((spot.exponent - 8.0).abs() < 1e-6);
    assert_eq!(scene.clear_color, [0.05, 0.08, 0.12, 1.0]);
    assert!(scene.materials["screen"].is_emissive());
}

// ==================== Instantiation Tests ====================

#[test]
fn test_children_inherit_group_labels() {
    let world = load_room().instantiate().expect("scene should instantiate");

    let expectations = [
        ("mattress", Some("Bed")),
        ("monitorScreen", Some("Monitor")),
        ("ventTube", Some("Ventilator")),
        ("ivBag", Some("IV Pole/Pump")),
        ("defibPaddles", Some("Defib/Cart Zone")),
        ("floor", None),
        ("backWall", None),
    ];
    for (name, label) in expectations {
        let key = world
            .find_by_name(name)
            .unwrap_or_else(|| panic!("entity '{}' should exist", name));
        assert_eq!(world.owning_label(key), label, "owning label of '{}'", name);
    }
}

#[test]
fn test_child_world_position_includes_group_offset() {
    let world = load_room().instantiate().unwrap();
    let headboard = world.find_by_name("headboard").unwrap();
    let pose = world.world_pose(headboard).unwrap();
    assert!((pose.translation - Vec3::new(-2.5, 0.85, 2.9)).length() < 1e-5);
}

// ==================== Picking Tests ====================

#[test]
fn test_pick_from_spawn_hits_monitor() {
    let scene = load_room();
    let world = scene.instantiate().unwrap();

    let eye = Vec3::from_array(scene.camera.position);
    let screen_centre = Vec3::new(-0.2, 1.4, 0.5);
    let hit = pick(&world, &Ray::new(eye, screen_centre - eye)).expect("ray should hit");

    assert_eq!(world.owning_label(hit.entity), Some("Monitor"));
}

#[test]
fn test_pick_wall_has_no_label() {
    let world = load_room().instantiate().unwrap();
    let hit = pick(&world, &Ray::new(Vec3::new(0.0, 2.5, 0.0), Vec3::X)).expect("ray should hit");

    assert_eq!(world.get_entity(hit.entity).unwrap().name(), Some("rightWall"));
    assert_eq!(world.owning_label(hit.entity), None);
}

// ==================== Persistence Tests ====================

#[test]
fn test_scene_save_and_reload() {
    let scene = load_room();
    let path = std::env::temp_dir().join(format!("wardroom_scene_{}.ron", std::process::id()));

    scene.save(&path).expect("scene should save");
    let reloaded = Scene::load(&path).expect("saved scene should load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded, scene);
}
