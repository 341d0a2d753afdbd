// Host-side tests for population orchestration and per-frame render state.

use glam::{Mat4, Quat, Vec2, Vec3};
use tree_core::*;

const DT: f32 = 1.0 / 60.0;

/// Small scene so tests stay quick.
fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.foliage.count = 200;
    config.spiral_light.count = 40;
    config.ball.count = 12;
    config.gift_box.count = 8;
    config.star.count = 10;
    config.crystal.count = 6;
    config.candy.count = 6;
    config
}

fn photos(n: usize) -> Vec<PhotoAsset> {
    (0..n).map(|i| PhotoAsset::new(format!("photo-{i}.png"))).collect()
}

fn formed() -> ControlSignal {
    ControlSignal {
        mix_target: 1.0,
        pointer: Vec2::ZERO,
    }
}

#[test]
fn every_kind_gets_a_population_and_a_strategy() {
    let scene = Scene::new(small_config());
    for kind in OrnamentKind::ALL {
        assert!(scene.population(kind).is_some(), "{}", kind.label());
    }
    let state = scene.render_state();
    assert_eq!(state.batches.len(), OrnamentKind::ALL.len() - 1);
    assert!(state.batch(OrnamentKind::Photo).is_none());
    assert_eq!(
        scene.population(OrnamentKind::Ball).map(Population::len),
        Some(12)
    );
}

#[test]
fn photo_population_follows_the_supplied_images() {
    let mut scene = Scene::new(small_config());
    let photo_len = |s: &Scene| s.population(OrnamentKind::Photo).map_or(0, Population::len);
    assert_eq!(photo_len(&scene), PHOTO_DEFAULT_COUNT);

    scene.set_photos(photos(5));
    assert_eq!(photo_len(&scene), 5);

    scene.set_photos(Vec::new());
    assert_eq!(photo_len(&scene), 10);

    scene.set_photos(photos(45));
    assert_eq!(photo_len(&scene), PHOTO_LIMIT);
    assert_eq!(scene.photo_assets().len(), PHOTO_LIMIT);

    let state = scene.tick(&formed(), DT);
    assert_eq!(state.photos.len(), PHOTO_LIMIT);
}

#[test]
fn layouts_are_never_regenerated_mid_life() {
    let mut scene = Scene::new(small_config());
    let before: Vec<Vec<ObjectDatum>> = scene
        .populations()
        .iter()
        .map(|p| p.objects().to_vec())
        .collect();

    let mut signal = formed();
    for i in 0..240 {
        signal.mix_target = if (i / 40) % 2 == 0 { 1.0 } else { 0.0 };
        signal.pointer = Vec2::new((i as f32 * 0.1).sin(), (i as f32 * 0.07).cos());
        scene.tick(&signal, DT);
    }
    // same photo count: assets change, layout does not
    scene.set_photos(photos(PHOTO_DEFAULT_COUNT));
    scene.tick(&signal, DT);

    for (population, old) in scene.populations().iter().zip(&before) {
        assert_eq!(population.objects(), old.as_slice(), "{}", population.kind().label());
    }
}

#[test]
fn star_orientation_switches_once_blend_passes_the_threshold() {
    let mut scene = Scene::new(small_config());
    let mut saw_baseline = false;
    let mut saw_radial = false;
    for _ in 0..300 {
        let state = scene.tick(&formed(), DT).clone();
        let stars = scene.population(OrnamentKind::Star).expect("stars");
        let blend = stars.blend();
        let group = state.camera.group_rotation();
        let batch = state.batch(OrnamentKind::Star).expect("star batch");
        for (raw, datum) in batch.instances.iter().zip(stars.objects()) {
            let (_, rotation, _) = Mat4::from_cols_array_2d(&raw.model).to_scale_rotation_translation();
            let local = local_transform(OrnamentKind::Star, datum, blend);
            let expected = if blend > ORIENT_BLEND_THRESHOLD {
                saw_radial = true;
                let outward = Vec3::new(local.translation.x, 0.0, local.translation.z).normalize();
                assert!((rotation * Vec3::Z).dot(group * outward) > 0.999);
                group * local.rotation
            } else {
                saw_baseline = true;
                group * euler_rotation(datum.static_rotation)
            };
            assert!(rotation.dot(expected).abs() > 0.999);
        }
    }
    assert!(saw_baseline && saw_radial);
}

#[test]
fn scene_blend_reaches_the_target() {
    let mut scene = Scene::new(small_config());
    for _ in 0..400 {
        scene.tick(&formed(), DT);
    }
    for population in scene.populations() {
        assert!((population.blend() - 1.0).abs() < 0.01, "{}", population.kind().label());
    }
    let state = scene.render_state();
    let group = state.camera.group_rotation();
    let balls = scene.population(OrnamentKind::Ball).expect("balls");
    let batch = state.batch(OrnamentKind::Ball).expect("ball batch");
    for (raw, datum) in batch.instances.iter().zip(balls.objects()) {
        assert!(raw.translation().distance(group * datum.target_position) < 0.1);
    }
}

#[test]
fn photos_blend_independently() {
    let mut scene = Scene::new(small_config());
    for _ in 0..30 {
        scene.tick(&formed(), DT);
    }
    let photos = scene.population(OrnamentKind::Photo).expect("photos");
    let blends: Vec<f32> = (0..photos.len()).map(|i| photos.object_blend(i)).collect();
    let min = blends.iter().cloned().fold(f32::MAX, f32::min);
    let max = blends.iter().cloned().fold(f32::MIN, f32::max);
    assert!(max - min > 1e-3, "photo blends moved in lockstep");
    assert!(matches!(photos.blend_mode(), BlendMode::PerObject(m) if m.len() == photos.len()));
}

#[test]
fn missing_assets_render_placeholders() {
    let mut scene = Scene::new(small_config());
    scene.set_photos(photos(6));
    scene.set_photo_state(1, AssetState::Ready { width: 800, height: 600 });
    scene.set_photo_state(2, AssetState::Failed);
    scene.set_photo_state(99, AssetState::Failed);

    let state = scene.tick(&formed(), DT);
    assert_eq!(state.photos.len(), 6);
    assert_eq!(state.photos[0].content, PhotoContent::Placeholder(0));
    assert_eq!(state.photos[1].content, PhotoContent::Image { aspect: 800.0 / 600.0 });
    assert_eq!(state.photos[2].content, PhotoContent::Placeholder(2));
    assert_eq!(state.photos[5].content, PhotoContent::Placeholder(5 % PLACEHOLDERS.len()));
    for photo in &state.photos {
        assert!(photo.frame.frame_size.max_element() <= FRAME_MAX_SIDE + 1e-4);
    }
}

#[test]
fn empty_configuration_degrades_quietly() {
    let mut config = SceneConfig::default();
    for kind in OrnamentKind::ALL {
        let population = config.population_mut(kind);
        population.count = 0;
        population.palette.clear();
    }
    let mut scene = Scene::new(config);
    let state = scene.tick(&formed(), 5.0);
    assert!(state.batches.iter().all(InstanceBatch::is_empty));
    assert_eq!(state.photos.len(), PHOTO_DEFAULT_COUNT);
    let photos = scene.population(OrnamentKind::Photo).expect("photos");
    assert!(photos.objects().iter().all(|o| o.color == DEFAULT_COLOR));
}

#[test]
fn same_seed_same_scene() {
    let a = Scene::new(small_config());
    let b = Scene::new(small_config());
    for (pa, pb) in a.populations().iter().zip(b.populations()) {
        assert_eq!(pa.objects(), pb.objects());
    }
    let mut c = Scene::new(small_config());
    c.reseed(12345);
    let stars_a = a.population(OrnamentKind::Star).expect("stars");
    let stars_c = c.population(OrnamentKind::Star).expect("stars");
    assert_ne!(stars_a.objects(), stars_c.objects());
}

#[test]
fn rebuilt_photo_population_keeps_its_blend() {
    let mut scene = Scene::new(small_config());
    for _ in 0..400 {
        scene.tick(&formed(), DT);
    }
    scene.set_photos(photos(3));
    let photos = scene.population(OrnamentKind::Photo).expect("photos");
    assert_eq!(photos.len(), 3);
    assert!(photos.blend() > 0.95);
}

#[test]
fn group_rotation_is_shared_by_every_batch() {
    let mut scene = Scene::new(small_config());
    let state = scene.tick(&formed(), DT);
    assert!(state.camera.group_angle > 0.0);
    assert_eq!(state.camera.target, Vec3::ZERO);
    let q = state.camera.group_rotation();
    assert!(q.dot(Quat::from_rotation_y(state.camera.group_angle)).abs() > 0.9999);
}

#[test]
fn render_pose_tracks_the_camera_rig() {
    let mut scene = Scene::new(small_config());
    let signal = ControlSignal {
        mix_target: 1.0,
        pointer: Vec2::new(0.6, -0.3),
    };
    for _ in 0..90 {
        scene.tick(&signal, DT);
    }
    let rig = scene.camera_rig();
    let pose = scene.render_state().camera;
    assert_eq!(pose, rig.pose());
    assert_eq!(pose.group_angle, rig.group_angle);
    assert!(rig.rotation_velocity > 0.0);
}
