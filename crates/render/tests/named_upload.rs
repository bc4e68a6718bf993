use glam::Vec3;
use render::RaymarchUniforms;
use scene::demo::demo_scene;
use scene::{pack_and_upload, Camera, RenderSettings, Scene, MAX_OBJECTS};

#[test]
fn demo_frame_lands_in_block_fields() {
    let scene = demo_scene();
    let mut block = RaymarchUniforms::default();
    let frame = pack_and_upload(&scene, &RenderSettings::default(), &mut block).unwrap();
    Camera::default().upload(&mut block).unwrap();

    assert_eq!(block.obj_count, 8);
    assert_eq!(block.sun_dir, [0.3, 0.7, 0.0]);
    assert_eq!(block.sun_color, [1.0, 0.95, 0.8]);
    assert_eq!(block.cam_pos, [0.0, 0.0, 20.0]);
    assert_eq!(block.fov, 60.0);

    for i in 0..frame.count {
        assert_eq!(block.obj_pos[i], frame.positions[i].extend(0.0).to_array());
        assert_eq!(block.obj_color[i], frame.colors[i].to_array());
        assert_eq!(block.obj_type[i][0], frame.types[i]);
        assert_eq!(block.obj_reflect[i][0], frame.reflectivity[i]);
        assert_eq!(block.sphere_radii[i][0], frame.sphere_radii[i]);
        let col = frame.inverse_rotations[i].y_axis;
        assert_eq!(block.obj_inv_rot[i][1], col.extend(0.0).to_array());
    }
    // floor box and torus carry their extra parameters
    assert_eq!(block.box_sizes[5], [10.0, 0.1, 10.0, 0.0]);
    assert_eq!(&block.torus_radii[6][..2], &[frame.torus_radii[6].x, frame.torus_radii[6].y]);
    assert!(block.obj_pos[frame.count..].iter().all(|slot| *slot == [0.0; 4]));
}

#[test]
fn shrinking_scene_clears_stale_slots() {
    let mut scene = demo_scene();
    let mut block = RaymarchUniforms::default();
    pack_and_upload(&scene, &RenderSettings::default(), &mut block).unwrap();

    while scene.len() > 2 {
        let last = *scene.ids().last().unwrap();
        scene.remove_object(last).unwrap();
    }
    pack_and_upload(&scene, &RenderSettings::default(), &mut block).unwrap();

    assert_eq!(block.obj_count, 2);
    for i in 2..MAX_OBJECTS {
        assert_eq!(block.obj_type[i], [0; 4]);
        assert_eq!(block.box_sizes[i], [0.0; 4]);
        assert_eq!(block.torus_radii[i], [0.0; 4]);
        assert_eq!(block.obj_inv_rot[i], [[0.0; 4]; 3]);
    }
}

#[test]
fn empty_scene_still_writes_lighting() {
    let mut block = RaymarchUniforms::default();
    let settings = RenderSettings {
        sun_direction: Vec3::new(0.0, 1.0, 0.0),
        ..RenderSettings::default()
    };
    pack_and_upload(&Scene::new(), &settings, &mut block).unwrap();
    assert_eq!(block.obj_count, 0);
    assert_eq!(block.sun_dir, [0.0, 1.0, 0.0]);
}
