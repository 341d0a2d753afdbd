// Host-side tests for the procedural layout generators.

use glam::Vec3;
use rand::prelude::*;
use tree_core::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn radial(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

/// Distance from the cone surface, measured radially at the point's height.
fn cone_error(p: Vec3, tree: &TreeShape) -> f32 {
    let expected_r = (tree.height * 0.5 - p.y) / tree.height * tree.radius;
    (radial(p) - expected_r).abs()
}

#[test]
fn zero_count_yields_empty_arrays() {
    let shapes = Shapes::default();
    for kind in OrnamentKind::ALL {
        let layout = generate_layout(&mut rng(), kind, 0, &shapes);
        assert!(layout.target.is_empty());
        assert!(layout.chaos.is_empty());
        assert!(generate_objects(&mut rng(), kind, 0, &[], &shapes).is_empty());
    }
}

#[test]
fn layouts_have_parallel_lengths() {
    let shapes = Shapes::default();
    for kind in OrnamentKind::ALL {
        let layout = generate_layout(&mut rng(), kind, 37, &shapes);
        assert_eq!(layout.target.len(), 37);
        assert_eq!(layout.chaos.len(), 37);
    }
}

#[test]
fn foliage_sits_on_the_cone_surface() {
    let tree = TreeShape::default();
    let mut r = rng();
    for _ in 0..2000 {
        let p = cone_surface_point(&mut r, &tree);
        assert!(p.y <= tree.height * 0.5 + 1e-4 && p.y >= -tree.height * 0.5 - 1e-4);
        assert!(cone_error(p, &tree) < 1e-3, "off surface: {p:?}");
    }
}

#[test]
fn cone_sampling_favors_the_wide_base() {
    let tree = TreeShape::default();
    let mut r = rng();
    let lower = (0..4000)
        .map(|_| cone_surface_point(&mut r, &tree))
        .filter(|p| p.y < 0.0)
        .count();
    // the lower half of the cone holds three quarters of its surface
    assert!(lower > 2700 && lower < 3300, "lower half count {lower}");
}

#[test]
fn ornaments_are_pushed_outside_the_foliage() {
    let shapes = Shapes::default();
    let stars = generate_layout(&mut rng(), OrnamentKind::Star, 200, &shapes);
    for p in &stars.target {
        assert!(cone_error(*p / STAR_PUSH_OUT, &shapes.tree) < 1e-3);
    }
    let balls = generate_layout(&mut rng(), OrnamentKind::Ball, 200, &shapes);
    for p in &balls.target {
        assert!(cone_error(*p / ORNAMENT_PUSH_OUT, &shapes.tree) < 1e-3);
    }
}

#[test]
fn standard_chaos_stays_inside_the_explosion_sphere() {
    let shapes = Shapes::default();
    let layout = generate_layout(&mut rng(), OrnamentKind::Crystal, 3000, &shapes);
    let mut max_len = 0.0f32;
    for p in &layout.chaos {
        assert!(p.length() <= CHAOS_SPHERE_RADIUS + 1e-3);
        max_len = max_len.max(p.length());
    }
    assert!(max_len > CHAOS_SPHERE_RADIUS * 0.8);
}

#[test]
fn photo_chaos_forms_a_wall_outside_the_tree() {
    let shapes = Shapes::default();
    let layout = generate_layout(&mut rng(), OrnamentKind::Photo, 1000, &shapes);
    for p in &layout.chaos {
        let r = radial(*p);
        assert!(r > shapes.tree.radius);
        assert!(r >= shapes.photo_wall.radius[0] - 1e-3 && r <= shapes.photo_wall.radius[1] + 1e-3);
        assert!(p.y >= shapes.photo_wall.height[0] && p.y <= shapes.photo_wall.height[1]);
    }
}

#[test]
fn spiral_climbs_and_narrows() {
    let spiral = SpiralShape::default();
    let mut r = rng();
    let points: Vec<Vec3> = (0..100).map(|i| spiral_point(&mut r, i, 100, &spiral)).collect();
    for pair in points.windows(2) {
        assert!(pair[1].y > pair[0].y);
    }
    assert!(radial(points[0]) > radial(points[99]));
    assert!(points[0].y > -spiral.height * 0.5 && points[99].y < spiral.height * 0.5);
}

#[test]
fn scale_magnitude_is_jittered_around_the_base() {
    let shapes = Shapes::default();
    for kind in [OrnamentKind::Ball, OrnamentKind::Star, OrnamentKind::Candy] {
        let base = kind.base_scale();
        for o in generate_objects(&mut rng(), kind, 300, &[], &shapes) {
            let m = o.target_scale.y / base.y;
            assert!((SCALE_JITTER[0] - 1e-4..=SCALE_JITTER[1] + 1e-4).contains(&m));
            assert_eq!(o.chaos_scale, o.target_scale);
            assert_eq!(o.chaos_tilt, 0.0);
        }
    }
    let candy = OrnamentKind::Candy.base_scale();
    assert!(candy.y > candy.x * 3.0, "candy canes should be sticks");
    assert!(OrnamentKind::Star.base_scale().x > OrnamentKind::Ball.base_scale().x);
}

#[test]
fn photos_float_larger_and_tilted_when_scattered() {
    let shapes = Shapes::default();
    let photos = generate_objects(&mut rng(), OrnamentKind::Photo, 300, &[], &shapes);
    let mut tilted = 0;
    for o in &photos {
        let ratio = o.chaos_scale.x / o.target_scale.x;
        assert!(ratio >= PHOTO_CHAOS_SCALE[0] - 1e-4 && ratio <= PHOTO_CHAOS_SCALE[1] + 1e-4);
        assert!(o.chaos_tilt.abs() <= PHOTO_MAX_TILT);
        if o.chaos_tilt.abs() > 0.01 {
            tilted += 1;
        }
        assert!(o.blend_rate >= MIX_BLEND_RATE * PHOTO_RATE_JITTER[0] - 1e-4);
        assert!(o.blend_rate <= MIX_BLEND_RATE * PHOTO_RATE_JITTER[1] + 1e-4);
    }
    assert!(tilted > 200);
}

#[test]
fn colors_come_from_the_palette_with_replacement() {
    let palette = [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    let objects = generate_objects(&mut rng(), OrnamentKind::Ball, 50, &palette, &Shapes::default());
    assert_eq!(objects.len(), 50);
    assert!(objects.iter().all(|o| palette.contains(&o.color)));
}

#[test]
fn empty_palette_falls_back_to_the_default_color() {
    let objects = generate_objects(&mut rng(), OrnamentKind::Box, 10, &[], &Shapes::default());
    assert!(objects.iter().all(|o| o.color == DEFAULT_COLOR));
}

#[test]
fn only_tumbling_kinds_get_a_random_baseline() {
    let shapes = Shapes::default();
    for kind in OrnamentKind::ALL {
        let objects = generate_objects(&mut rng(), kind, 20, &[], &shapes);
        let any_rotated = objects.iter().any(|o| o.static_rotation != Vec3::ZERO);
        assert_eq!(any_rotated, kind.tumbles(), "{}", kind.label());
    }
}
