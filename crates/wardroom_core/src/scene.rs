//! Scene serialization
//!
//! A Scene is the declarative description of a room: camera spawn, lighting,
//! a named material table and a flat list of entity templates that refer to
//! their parent group and material by name. Scenes are stored as RON files
//! and turned into a [`World`] with [`Scene::instantiate`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::entity::{EntityTemplate, Material};
use crate::world::WorldError;
use crate::World;

/// Where the camera starts and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpawn {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraSpawn {
    fn default() -> Self {
        Self {
            position: [0.0, 1.6, -6.0],
            target: [0.0, 1.4, 0.0],
        }
    }
}

/// A cone light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    /// Full cone angle in radians
    pub angle: f32,
    /// Falloff exponent toward the cone edge
    pub exponent: f32,
    pub intensity: f32,
}

/// Scene lighting: a hemispheric sky light plus an optional spot light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    /// Direction the hemispheric light's sky side faces
    #[serde(default = "default_sky_direction")]
    pub sky_direction: [f32; 3],
    /// Hemispheric light intensity
    pub intensity: f32,
    #[serde(default)]
    pub spot: Option<SpotLight>,
}

fn default_sky_direction() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            sky_direction: default_sky_direction(),
            intensity: 1.0,
            spot: None,
        }
    }
}

fn default_clear_color() -> [f32; 4] {
    [0.2, 0.2, 0.3, 1.0]
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub camera: CameraSpawn,
    #[serde(default)]
    pub lighting: Lighting,
    /// Background color [r, g, b, a]
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],
    /// Materials available to entities by name
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,
    /// Entity templates; parents must come before their children
    pub entities: Vec<EntityTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: CameraSpawn::default(),
            lighting: Lighting::default(),
            clear_color: default_clear_color(),
            materials: BTreeMap::new(),
            entities: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneLoadError> {
        Ok(ron::from_str(contents)?)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(false)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a named material
    pub fn with_material(mut self, name: impl Into<String>, material: Material) -> Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Add an entity template to this scene
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    /// Build a world from the templates
    ///
    /// Parent and material names are resolved in declaration order, so a
    /// parent must be declared before any of its children.
    pub fn instantiate(&self) -> Result<World, SceneError> {
        let mut world = World::with_capacity(self.entities.len());

        for template in &self.entities {
            let material = match &template.material {
                Some(name) => *self.materials.get(name).ok_or_else(|| SceneError::UnknownMaterial {
                    entity: template.name.clone(),
                    material: name.clone(),
                })?,
                None => Material::default(),
            };

            if let Some(shape) = &template.shape {
                if !shape.has_valid_dimensions() {
                    return Err(SceneError::InvalidShape(template.name.clone()));
                }
            }

            let entity = template.to_entity(material);
            match &template.parent {
                Some(parent_name) => {
                    let parent = world.find_by_name(parent_name).ok_or_else(|| {
                        SceneError::UnknownParent {
                            entity: template.name.clone(),
                            parent: parent_name.clone(),
                        }
                    })?;
                    world.add_child(parent, entity)?;
                }
                None => {
                    world.add_entity(entity)?;
                }
            }
        }

        log::debug!(
            "Instantiated scene '{}' with {} entities",
            self.name,
            world.entity_count()
        );
        Ok(world)
    }
}

/// Error turning a scene into a world
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Parent name not declared earlier in the scene
    UnknownParent { entity: String, parent: String },
    /// Material name not in the material table
    UnknownMaterial { entity: String, material: String },
    /// Primitive with a zero, negative or non-finite dimension
    InvalidShape(String),
    /// Structural world error (e.g. duplicate names)
    World(WorldError),
}

impl From<WorldError> for SceneError {
    fn from(e: WorldError) -> Self {
        SceneError::World(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::UnknownParent { entity, parent } => {
                write!(f, "Entity '{}' refers to unknown parent '{}'", entity, parent)
            }
            SceneError::UnknownMaterial { entity, material } => {
                write!(f, "Entity '{}' refers to unknown material '{}'", entity, material)
            }
            SceneError::InvalidShape(name) => {
                write!(f, "Entity '{}' has invalid shape dimensions", name)
            }
            SceneError::World(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SceneError {}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
