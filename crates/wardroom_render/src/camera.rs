//! First-person walkthrough camera
//!
//! The camera has a position, a yaw about world +Y and a pitch about its
//! right axis (positive pitch looks down). Movement is velocity based: input
//! adds to a per-frame velocity which is integrated once per frame and then
//! damped by `inertia`, giving the glide-to-a-stop feel of a universal camera.

use wardroom_core::CameraSpawn;
use wardroom_input::CameraControl;
use wardroom_math::{mat4, Mat4, Ray, Vec2, Vec3};

/// Velocity components below `speed * VELOCITY_EPSILON` snap to zero
const VELOCITY_EPSILON: f32 = 0.001;

/// First-person camera
#[derive(Clone, Debug)]
pub struct FirstPersonCamera {
    /// World-space eye position
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    /// Velocity integrated on the next update
    velocity: Vec3,

    // Starting pose for reset
    spawn_position: Vec3,
    spawn_yaw: f32,
    spawn_pitch: f32,

    /// Movement speed added per frame of input
    pub speed: f32,
    /// Fraction of velocity kept after each frame
    pub inertia: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Absolute pitch bound applied on every rotation
    pub pitch_limit: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FirstPersonCamera {
    /// Create a camera at `position` looking along +Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            spawn_position: position,
            spawn_yaw: 0.0,
            spawn_pitch: 0.0,
            speed: 0.18,
            inertia: 0.9,
            fov: 0.8,
            near: 0.1,
            far: 100.0,
            pitch_limit: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }

    /// Create a camera at a scene's spawn, looking at its target
    pub fn from_spawn(spawn: &CameraSpawn) -> Self {
        let mut camera = Self::new(Vec3::from_array(spawn.position));
        camera.set_target(Vec3::from_array(spawn.target));
        camera.mark_spawn();
        camera
    }

    /// Remember the current pose as the one `reset` returns to
    pub fn mark_spawn(&mut self) {
        self.spawn_position = self.position;
        self.spawn_yaw = self.yaw;
        self.spawn_pitch = self.pitch;
    }

    /// Turn to look at a world-space point
    pub fn set_target(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() == 0.0 {
            return;
        }
        self.yaw = dir.x.atan2(dir.z);
        self.pitch = (-dir.y).atan2(dir.x.hypot(dir.z)).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Return to the spawn pose and stop
    pub fn reset(&mut self) {
        self.position = self.spawn_position;
        self.yaw = self.spawn_yaw;
        self.pitch = self.spawn_pitch;
        self.velocity = Vec3::ZERO;
    }

    /// Integrate one frame of velocity and apply inertia
    pub fn update(&mut self) {
        self.position += self.velocity;
        self.velocity *= self.inertia;

        let threshold = self.speed * VELOCITY_EPSILON;
        if self.velocity.x.abs() < threshold {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < threshold {
            self.velocity.y = 0.0;
        }
        if self.velocity.z.abs() < threshold {
            self.velocity.z = 0.0;
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, -sp, cy * cp)
    }

    /// Unit right direction (always horizontal)
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    /// Unit up direction
    pub fn up(&self) -> Vec3 {
        self.forward().cross(self.right())
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::view_from_basis(self.position, self.right(), self.up(), self.forward())
    }

    /// View-to-clip matrix for a viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov, aspect, self.near, self.far)
    }

    /// Combined world-to-clip matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }

    /// World-space ray through a point in viewport pixels (origin top-left)
    pub fn screen_ray(&self, point: Vec2, viewport: Vec2) -> Ray {
        let width = viewport.x.max(1.0);
        let height = viewport.y.max(1.0);
        let ndc_x = 2.0 * point.x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / height;

        let tan_half = (self.fov / 2.0).tan();
        let aspect = width / height;
        let direction = self.forward()
            + self.right() * (ndc_x * tan_half * aspect)
            + self.up() * (ndc_y * tan_half);

        Ray::new(self.position, direction)
    }
}

impl CameraControl for FirstPersonCamera {
    fn forward(&self) -> Vec3 {
        FirstPersonCamera::forward(self)
    }

    fn right(&self) -> Vec3 {
        FirstPersonCamera::right(self)
    }

    fn add_velocity(&mut self, delta: Vec3) {
        self.velocity += delta;
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }

    fn clamp_pitch(&mut self, limit: f32) {
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_basis() {
        let camera = FirstPersonCamera::default();
        assert!(approx(camera.forward(), Vec3::Z));
        assert!(approx(camera.right(), Vec3::X));
        assert!(approx(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut camera = FirstPersonCamera::default();
        camera.rotate(0.0, 0.5);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn test_yaw_turns_toward_right() {
        let mut camera = FirstPersonCamera::default();
        camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        assert!(approx(camera.forward(), Vec3::X));
        assert!(approx(camera.right(), -Vec3::Z));
    }

    #[test]
    fn test_set_target_faces_point() {
        let spawn = CameraSpawn::default();
        let camera = FirstPersonCamera::from_spawn(&spawn);
        let expected = (Vec3::from_array(spawn.target) - Vec3::from_array(spawn.position)).normalized();
        assert!(approx(camera.forward(), expected));
        assert!(camera.pitch() > 0.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut camera = FirstPersonCamera::default();
        camera.rotate(0.0, 10.0);
        assert!((camera.pitch() - camera.pitch_limit).abs() < 1e-6);
        camera.clamp_pitch(1.3);
        assert!((camera.pitch() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_integrates_and_decays() {
        let mut camera = FirstPersonCamera::default();
        camera.add_velocity(Vec3::new(0.0, 0.0, 0.18));
        camera.update();
        assert!((camera.position.z - 0.18).abs() < 1e-6);
        assert!((camera.velocity().z - 0.162).abs() < 1e-6);

        for _ in 0..200 {
            camera.update();
        }
        assert_eq!(camera.velocity(), Vec3::ZERO);
        // Geometric series: total distance approaches 0.18 / (1 - 0.9)
        assert!(camera.position.z < 1.8 + 1e-3);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut camera = FirstPersonCamera::from_spawn(&CameraSpawn::default());
        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        camera.add_velocity(Vec3::X);
        camera.update();
        camera.rotate(1.0, 0.2);
        camera.reset();

        assert!(approx(camera.position, Vec3::new(0.0, 1.6, -6.0)));
        assert_eq!((camera.yaw(), camera.pitch()), (yaw, pitch));
        assert_eq!(camera.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_centre_ray_is_forward() {
        let mut camera = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.rotate(0.3, 0.2);
        let ray = camera.screen_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert!(approx(ray.origin, camera.position));
        assert!(approx(ray.direction, camera.forward()));
    }

    #[test]
    fn test_corner_rays_match_projection() {
        // A point along the top-right corner ray projects to NDC (1, 1)
        let camera = FirstPersonCamera::default();
        let ray = camera.screen_ray(Vec2::new(800.0, 0.0), Vec2::new(800.0, 600.0));
        let clip = mat4::transform_point(&camera.view_projection(800.0 / 600.0), ray.at(10.0));
        assert!((clip[0] / clip[3] - 1.0).abs() < 1e-4);
        assert!((clip[1] / clip[3] - 1.0).abs() < 1e-4);
        let depth = clip[2] / clip[3];
        assert!((0.0..=1.0).contains(&depth));
    }
}
