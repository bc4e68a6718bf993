use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use scene::camera::PITCH_LIMIT;
use scene::{Camera, InputFrame, MovementKeys};

fn assert_orthonormal(camera: &Camera) {
    let (f, r, u) = (camera.forward(), camera.right(), camera.up());
    for v in [f, r, u] {
        assert!((v.length() - 1.0).abs() < 1e-4, "not unit: {v:?}");
    }
    assert!(f.dot(r).abs() < 1e-4);
    assert!(f.dot(u).abs() < 1e-4);
    assert!(r.dot(u).abs() < 1e-4);
    // right x up points backwards, the same handedness at every orientation
    assert!((r.cross(u) + f).length() < 1e-3);
}

#[test]
fn pitch_stays_inside_the_poles() {
    let mut camera = Camera::default();
    let deltas = [
        Vec2::new(0.0, -1.0e9),
        Vec2::new(3.0e4, 2.0e6),
        Vec2::new(-12.0, -7.5e5),
        Vec2::new(0.0, 1.0e12),
        Vec2::new(1.0, -3.0),
    ];
    for delta in deltas {
        camera.update_from_input(MovementKeys::default(), delta, 0.016, true);
        assert!(camera.pitch() > -FRAC_PI_2 && camera.pitch() < FRAC_PI_2);
        assert!(camera.pitch().abs() <= PITCH_LIMIT);
        assert_orthonormal(&camera);
    }
}

#[test]
fn mouse_right_turns_yaw_down() {
    let mut camera = Camera::default();
    camera.sensitivity = 0.01;
    let yaw = camera.yaw();
    camera.update_from_input(MovementKeys::default(), Vec2::new(10.0, 0.0), 0.0, true);
    assert!((camera.yaw() - (yaw - 0.1)).abs() < 1e-6);
}

#[test]
fn mouse_up_pitches_camera_up() {
    let mut camera = Camera::default();
    camera.sensitivity = 0.01;
    camera.update_from_input(MovementKeys::default(), Vec2::new(0.0, -20.0), 0.0, true);
    assert!((camera.pitch() - 0.2).abs() < 1e-6);
    assert!(camera.forward().y > 0.0);
}

#[test]
fn basis_is_orthonormal_across_orientations() {
    let mut camera = Camera::default();
    for step in 0..64 {
        let t = step as f32 * 0.37;
        camera.set_orientation(t * 3.0, (t * 1.9).sin() * 2.0);
        assert_orthonormal(&camera);
    }
}

#[test]
fn forward_key_moves_along_view_direction() {
    let mut camera = Camera::new(Vec3::ZERO, 0.0, 0.0);
    camera.speed = 4.0;
    let input = InputFrame {
        keys: MovementKeys { forward: true, ..Default::default() },
        mouse_delta: Vec2::ZERO,
        captured: true,
    };
    camera.apply_input(&input, 0.5);
    // Yaw 0 looks down +Z.
    assert!((camera.position - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
}

#[test]
fn uncaptured_input_frame_is_ignored() {
    let mut camera = Camera::default();
    let before = camera.clone();
    let input = InputFrame {
        keys: MovementKeys { back: true, left: true, ..Default::default() },
        mouse_delta: Vec2::new(100.0, 100.0),
        captured: false,
    };
    camera.apply_input(&input, 1.0);
    assert_eq!(camera, before);
}
