//! Screen-space picking through the camera

use wardroom_core::{pick, EntityKey, World};
use wardroom_input::ScenePicker;
use wardroom_math::Vec2;

use crate::camera::FirstPersonCamera;

/// A world seen through a camera at a viewport size
pub struct SceneView<'a> {
    pub world: &'a World,
    pub camera: &'a FirstPersonCamera,
    /// Viewport size in surface pixels
    pub viewport: Vec2,
}

impl<'a> SceneView<'a> {
    pub fn new(world: &'a World, camera: &'a FirstPersonCamera, viewport: Vec2) -> Self {
        Self { world, camera, viewport }
    }
}

impl ScenePicker for SceneView<'_> {
    type Handle = EntityKey;

    fn pick(&self, point: Vec2) -> Option<EntityKey> {
        let ray = self.camera.screen_ray(point, self.viewport);
        pick(self.world, &ray).map(|hit| hit.entity)
    }

    fn owning_label(&self, handle: EntityKey) -> Option<&str> {
        self.world.owning_label(handle)
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardroom_core::{Entity, ShapeTemplate};
    use wardroom_input::{select_at, select_center, SelectionDisplay};
    use wardroom_math::Vec3;

    #[derive(Default)]
    struct Title(Option<Option<String>>);

    impl SelectionDisplay for Title {
        fn show(&mut self, label: Option<&str>) {
            self.0 = Some(label.map(str::to_owned));
        }
    }

    fn pump_world() -> World {
        let mut world = World::new();
        let group = world
            .add_entity(Entity::group().with_label("IV Pole/Pump").at(Vec3::new(0.0, 0.0, 5.0)))
            .unwrap();
        world
            .add_child(group, Entity::new(ShapeTemplate::Box { width: 1.0, height: 1.0, depth: 1.0 }))
            .unwrap();
        world
    }

    #[test]
    fn test_center_pick_reports_group_label() {
        let world = pump_world();
        let camera = FirstPersonCamera::default();
        let view = SceneView::new(&world, &camera, Vec2::new(800.0, 600.0));

        let mut title = Title::default();
        select_center(&view, &mut title);
        assert_eq!(title.0, Some(Some("IV Pole/Pump".to_string())));
    }

    #[test]
    fn test_miss_reports_none() {
        let world = pump_world();
        let camera = FirstPersonCamera::default();
        let view = SceneView::new(&world, &camera, Vec2::new(800.0, 600.0));

        let mut title = Title::default();
        select_at(Vec2::new(0.0, 0.0), &view, &mut title);
        assert_eq!(title.0, Some(None));
    }

    #[test]
    fn test_pick_returns_child_key() {
        let world = pump_world();
        let camera = FirstPersonCamera::default();
        let view = SceneView::new(&world, &camera, Vec2::new(640.0, 480.0));

        let key = view.pick(Vec2::new(320.0, 240.0)).unwrap();
        assert!(world.get_entity(key).is_some_and(|e| !e.is_group()));
        assert_eq!(view.viewport_size(), Vec2::new(640.0, 480.0));
    }
}
