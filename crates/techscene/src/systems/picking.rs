use glam::Vec3;
use crate::api::types::ObjectId;
use crate::components::motion::MotionParams;
use crate::components::object::Transform;
use crate::core::scene::SceneRegistry;
use crate::renderer::camera::Camera3D;

/// Ray/sphere intersection. Returns the distance along `ray_dir`
/// (assumed normalized) to the near hit, or None if missed or behind.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest interactive object along the ray.
///
/// `transforms` are the animated transforms of the registry's objects, in
/// registry order. Each object is tested as a sphere of
/// `pick_radius * scale` around its animated centre.
pub fn pick(
    registry: &SceneRegistry,
    transforms: &[Transform],
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<ObjectId> {
    let mut best: Option<(f32, ObjectId)> = None;
    for (object, transform) in registry.iter().zip(transforms) {
        if !object.category.is_interactive() {
            continue;
        }
        let radius = MotionParams::for_category(object.category).pick_radius * transform.scale;
        if let Some(dist) = ray_sphere(ray_origin, ray_dir, transform.position, radius) {
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, object.id));
            }
        }
    }
    best.map(|(_, id)| id)
}

/// Hit-test a viewport pixel against the scene.
pub fn pick_screen(
    registry: &SceneRegistry,
    transforms: &[Transform],
    camera: &Camera3D,
    px: f32,
    py: f32,
    viewport: [f32; 2],
) -> Option<ObjectId> {
    let (origin, dir) = camera.screen_ray(px, py, viewport);
    pick(registry, transforms, origin, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Category;
    use crate::components::object::SceneObject;

    fn scene(objects: Vec<SceneObject>) -> (SceneRegistry, Vec<Transform>) {
        let transforms = objects.iter().map(|o| Transform::at(o.base_position)).collect();
        (SceneRegistry::new(objects).unwrap(), transforms)
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 3.0, 5.0), 2.0).is_none());
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
    }

    #[test]
    fn nearest_object_wins() {
        let (reg, tr) = scene(vec![
            SceneObject::new(ObjectId(1), Category::Database, Vec3::new(0.0, 0.0, -5.0), "Far"),
            SceneObject::new(ObjectId(2), Category::Database, Vec3::new(0.0, 0.0, 2.0), "Near"),
        ]);
        let hit = pick(&reg, &tr, Vec3::new(0.0, 0.0, 12.0), -Vec3::Z);
        assert_eq!(hit, Some(ObjectId(2)));
    }

    #[test]
    fn central_sphere_is_transparent_to_picking() {
        let (reg, tr) = scene(vec![
            SceneObject::new(ObjectId(1), Category::CentralSphere, Vec3::ZERO, "Core"),
            SceneObject::new(ObjectId(2), Category::ServerRack, Vec3::new(0.0, 0.0, -6.0), "Rack"),
        ]);
        let hit = pick(&reg, &tr, Vec3::new(0.0, 0.0, 12.0), -Vec3::Z);
        assert_eq!(hit, Some(ObjectId(2)));
    }

    #[test]
    fn screen_center_picks_object_on_axis() {
        let (reg, tr) = scene(vec![SceneObject::new(
            ObjectId(7),
            Category::LogoBadge,
            Vec3::ZERO,
            "Rust",
        )]);
        let camera = Camera3D::new(800.0 / 600.0);
        let viewport = [800.0, 600.0];
        assert_eq!(pick_screen(&reg, &tr, &camera, 400.0, 300.0, viewport), Some(ObjectId(7)));
        assert_eq!(pick_screen(&reg, &tr, &camera, 5.0, 5.0, viewport), None);
    }
}
