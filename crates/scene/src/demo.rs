//! Built-in demo scene: orbiting spheres over a spinning floor.

use glam::{Vec3, Vec4};

use crate::primitive::Primitive;
use crate::registry::{Animation, Scene};

/// Number of objects [`DemoAnimation`] expects to find.
pub const DEMO_OBJECT_COUNT: usize = 8;

const ORBIT_RADIUS: f32 = 3.0;
const ORBIT_PHASE: f64 = 0.75;

/// Scripted motion for [`demo_scene`].
///
/// Addresses objects by index, so it idles once the editor has removed
/// enough of them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoAnimation;

impl Animation for DemoAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn animate(&mut self, objects: &mut [Primitive], elapsed: f64) {
        if objects.len() < DEMO_OBJECT_COUNT {
            return;
        }

        let orbit = |phase: f64, sign: f32| {
            let angle = elapsed + phase;
            (
                sign * ORBIT_RADIUS * angle.cos() as f32,
                sign * ORBIT_RADIUS * angle.sin() as f32,
            )
        };
        let orbits = [
            (1, orbit(ORBIT_PHASE, 1.0)),
            (2, orbit(-ORBIT_PHASE, -1.0)),
            (3, orbit(-ORBIT_PHASE, 1.0)),
            (4, orbit(ORBIT_PHASE, -1.0)),
        ];
        for (index, (x, y)) in orbits {
            let z = objects[index].position.z;
            objects[index].position = Vec3::new(x, y, z);
        }

        objects[5].angular_velocity = Vec3::Y;
        let wobble = elapsed * 3.0;
        objects[6].rotation = Vec3::new(wobble.sin() as f32 * 0.25, 0.0, wobble.cos() as f32 * 0.25);
        objects[7].angular_velocity = Vec3::X;
    }
}

/// Objects of the demo scene in their canonical order.
#[must_use]
pub fn demo_objects() -> Vec<Primitive> {
    let sphere = |color: Vec4, reflectivity: f32| Primitive::sphere(Vec3::ZERO, Vec3::ZERO, color, reflectivity, 1.0);
    vec![
        sphere(Vec4::new(1.0, 0.1, 0.1, 1.0), 0.9),
        sphere(Vec4::new(0.1, 1.0, 0.1, 1.0), 0.2),
        sphere(Vec4::new(0.1, 0.1, 1.0, 1.0), 0.2),
        sphere(Vec4::new(1.0, 1.0, 0.1, 1.0), 0.2),
        sphere(Vec4::new(0.1, 1.0, 1.0, 1.0), 0.2),
        Primitive::cuboid(
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::ZERO,
            Vec4::new(0.1, 0.1, 1.0, 1.0),
            0.2,
            Vec3::new(10.0, 0.1, 10.0),
        ),
        Primitive::torus(Vec3::new(-3.0, 0.0, 0.0), Vec3::ZERO, Vec4::new(1.0, 0.1, 1.0, 1.0), 0.2, 1.5, 0.25),
        Primitive::capsule(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec4::new(1.0, 1.0, 0.1, 1.0), 0.2, 0.5, 2.0),
    ]
}

/// Demo scene with [`DemoAnimation`] installed.
#[must_use]
pub fn demo_scene() -> Scene {
    let mut scene = Scene::new();
    for object in demo_objects() {
        // Eight objects always fit.
        if let Err(err) = scene.add_object(object) {
            tracing::error!("demo scene: {err}");
        }
    }
    scene.set_animation(DemoAnimation);
    scene
}
