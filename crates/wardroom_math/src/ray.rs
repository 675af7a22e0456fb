//! Rays and axis-aligned bounding boxes for picking

use crate::Vec3;

/// A half-line starting at `origin`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Point at parameter `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given half extents
    #[inline]
    pub fn from_half_extents(half: Vec3) -> Self {
        Self::new(-half, half)
    }

    /// Check whether a point lies inside (inclusive)
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Slab test: distance along the ray to the first intersection
    ///
    /// Returns `None` on a miss or when the box is entirely behind the origin.
    /// Returns `Some(0.0)` when the origin is inside the box. Degenerate
    /// (zero-thickness) boxes such as ground planes are supported.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin.axis(axis);
            let dir = ray.direction.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab: must already be inside it
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_box_in_front() {
        let aabb = Aabb::from_half_extents(Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = aabb.intersect(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let aabb = Aabb::from_half_extents(Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert_eq!(aabb.intersect(&ray), None);
    }

    #[test]
    fn test_ray_misses_to_the_side() {
        let aabb = Aabb::from_half_extents(Vec3::ONE);
        let ray = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);
        assert_eq!(aabb.intersect(&ray), None);
    }

    #[test]
    fn test_flat_box_hit_from_above() {
        let ground = Aabb::new(Vec3::new(-6.0, 0.0, -5.0), Vec3::new(6.0, 0.0, 5.0));
        let ray = Ray::new(Vec3::new(0.0, 1.6, 0.0), -Vec3::Y);
        let t = ground.intersect(&ray).unwrap();
        assert!((t - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_origin_inside_returns_zero() {
        let aabb = Aabb::from_half_extents(Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(aabb.intersect(&ray), Some(0.0));
    }
}
