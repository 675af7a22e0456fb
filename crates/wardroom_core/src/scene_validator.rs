//! Scene validation
//!
//! Validates scenes for common authoring errors before they are
//! instantiated. The [`SceneValidator`] reports every issue it finds rather
//! than stopping at the first, so a broken scene file can be fixed in one go.

use std::collections::{HashMap, HashSet};

use crate::scene::Scene;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene has no entities
    EmptyScene,
    /// Duplicate entity name found
    DuplicateName(String),
    /// Parent name is missing or declared after the child
    UnknownParent { entity: String, parent: String },
    /// Material name not present in the material table
    UnknownMaterial { entity: String, material: String },
    /// Primitive with a zero, negative or non-finite dimension
    InvalidDimensions(String),
    /// Labelled entity with nothing pickable underneath, so the label can never be selected
    UnreachableLabel(String),
    /// Camera spawn at extreme coordinates (any component absolute value > 10000)
    ExtremeCameraPosition([f32; 3]),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScene => write!(f, "Scene has no entities"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate entity name: '{}'", name)
            }
            ValidationError::UnknownParent { entity, parent } => {
                write!(f, "Entity '{}' has unknown or later-declared parent '{}'", entity, parent)
            }
            ValidationError::UnknownMaterial { entity, material } => {
                write!(f, "Entity '{}' uses unknown material '{}'", entity, material)
            }
            ValidationError::InvalidDimensions(name) => {
                write!(f, "Entity '{}' has invalid shape dimensions", name)
            }
            ValidationError::UnreachableLabel(name) => {
                write!(f, "Entity '{}' is labelled but nothing under it is pickable", name)
            }
            ValidationError::ExtremeCameraPosition(pos) => {
                write!(
                    f,
                    "Extreme camera position: [{}, {}, {}] (component abs > 10000)",
                    pos[0], pos[1], pos[2]
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::warn!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.entities.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let mut seen_names = HashSet::new();
        for entity in &scene.entities {
            if !seen_names.insert(entity.name.as_str()) {
                errors.push(ValidationError::DuplicateName(entity.name.clone()));
            }
        }

        // Parents must be declared before children
        let mut declared = HashSet::new();
        for entity in &scene.entities {
            if let Some(parent) = &entity.parent {
                if !declared.contains(parent.as_str()) {
                    errors.push(ValidationError::UnknownParent {
                        entity: entity.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            declared.insert(entity.name.as_str());
        }

        for entity in &scene.entities {
            if let Some(material) = &entity.material {
                if !scene.materials.contains_key(material) {
                    errors.push(ValidationError::UnknownMaterial {
                        entity: entity.name.clone(),
                        material: material.clone(),
                    });
                }
            }
            if let Some(shape) = &entity.shape {
                if !shape.has_valid_dimensions() {
                    errors.push(ValidationError::InvalidDimensions(entity.name.clone()));
                }
            }
        }

        errors.extend(Self::unreachable_labels(scene));

        let spawn = scene.camera.position;
        if spawn.iter().any(|c| c.abs() > 10000.0) {
            errors.push(ValidationError::ExtremeCameraPosition(spawn));
        }

        errors
    }

    /// Labelled entities with no pickable shape in their subtree
    fn unreachable_labels(scene: &Scene) -> Vec<ValidationError> {
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, entity) in scene.entities.iter().enumerate() {
            if let Some(parent) = &entity.parent {
                children.entry(parent.as_str()).or_default().push(i);
            }
        }

        let mut errors = Vec::new();
        for (i, entity) in scene.entities.iter().enumerate() {
            if entity.label.as_deref().map_or(true, str::is_empty) {
                continue;
            }

            let mut reachable = false;
            let mut visited = HashSet::new();
            let mut stack = vec![i];
            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                let e = &scene.entities[current];
                if e.pickable && e.shape.is_some() {
                    reachable = true;
                    break;
                }
                if let Some(kids) = children.get(e.name.as_str()) {
                    stack.extend(kids.iter().copied());
                }
            }

            if !reachable {
                errors.push(ValidationError::UnreachableLabel(entity.name.clone()));
            }
        }
        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
