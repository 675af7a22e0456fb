//! Ray picking against world entities
//!
//! Each pickable shaped entity is tested in its own local frame: the ray is
//! moved into local space with the inverse of the entity's world pose and
//! slab-tested against the primitive's local bounds. Poses are rigid, so the
//! local hit distance equals the world distance.

use wardroom_math::{Ray, Vec3};

use crate::{EntityKey, World};

/// The nearest surface hit by a pick ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// The entity that was hit
    pub entity: EntityKey,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// Find the nearest pickable entity along a world-space ray
pub fn pick(world: &World, ray: &Ray) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (key, entity) in world.iter_with_keys() {
        if !entity.pickable {
            continue;
        }
        let Some(shape) = entity.shape else {
            continue;
        };
        let Some(pose) = world.world_pose(key) else {
            continue;
        };

        let local_ray = Ray {
            origin: pose.inverse_transform_point(ray.origin),
            direction: pose.inverse_transform_vector(ray.direction),
        };
        let Some(distance) = shape.local_bounds().intersect(&local_ray) else {
            continue;
        };

        if best.map_or(true, |b| distance < b.distance) {
            best = Some(PickHit {
                entity: key,
                distance,
                point: ray.at(distance),
            });
        }
    }

    best
}
