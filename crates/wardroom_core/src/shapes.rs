//! Serializable shape templates
//!
//! Each variant stores the construction parameters of one primitive. Shapes
//! are created in local space, centered on the origin; the entity transform
//! places them in the world.

use serde::{Serialize, Deserialize};
use wardroom_math::{Aabb, Cuboid, Cylinder, Ground, Primitive};

/// Serializable shape template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeTemplate {
    /// Flat horizontal rectangle (X by Z) at local Y = 0
    Ground {
        width: f32,
        depth: f32,
    },
    /// Box with full extents along X, Y and Z
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Capped cylinder along local Y
    Cylinder {
        height: f32,
        diameter: f32,
    },
}

impl ShapeTemplate {
    /// Create the primitive described by this template
    pub fn create_shape(&self) -> Box<dyn Primitive> {
        match *self {
            ShapeTemplate::Ground { width, depth } => Box::new(Ground::new(width, depth)),
            ShapeTemplate::Box { width, height, depth } => {
                Box::new(Cuboid::new(width, height, depth))
            }
            ShapeTemplate::Cylinder { height, diameter } => {
                Box::new(Cylinder::new(height, diameter))
            }
        }
    }

    /// Local-space pick volume
    pub fn local_bounds(&self) -> Aabb {
        self.create_shape().local_bounds()
    }

    /// Check that every dimension is finite and positive
    pub fn has_valid_dimensions(&self) -> bool {
        let dims: &[f32] = match self {
            ShapeTemplate::Ground { width, depth } => &[*width, *depth],
            ShapeTemplate::Box { width, height, depth } => &[*width, *height, *depth],
            ShapeTemplate::Cylinder { height, diameter } => &[*height, *diameter],
        };
        dims.iter().all(|d| d.is_finite() && *d > 0.0)
    }

    /// Get the shape type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeTemplate::Ground { .. } => "Ground",
            ShapeTemplate::Box { .. } => "Box",
            ShapeTemplate::Cylinder { .. } => "Cylinder",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_bounds() {
        let bounds = ShapeTemplate::Box { width: 2.0, height: 4.0, depth: 6.0 }.local_bounds();
        assert_eq!(bounds.max.x, 1.0);
        assert_eq!(bounds.max.y, 2.0);
        assert_eq!(bounds.max.z, 3.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(ShapeTemplate::Cylinder { height: 1.0, diameter: 0.2 }.has_valid_dimensions());
        assert!(!ShapeTemplate::Cylinder { height: 0.0, diameter: 0.2 }.has_valid_dimensions());
        assert!(!ShapeTemplate::Ground { width: f32::NAN, depth: 1.0 }.has_valid_dimensions());
    }

    #[test]
    fn test_ron_round_trip() {
        let shape = ShapeTemplate::Box { width: 2.2, height: 0.4, depth: 3.0 };
        let text = ron::to_string(&shape).unwrap();
        let back: ShapeTemplate = ron::from_str(&text).unwrap();
        assert_eq!(shape, back);
    }

    #[test]
    fn test_parse_handwritten_ron() {
        let shape: ShapeTemplate = ron::from_str("Cylinder(height: 1.4, diameter: 0.2)").unwrap();
        assert_eq!(shape.type_name(), "Cylinder");
    }
}
