// Host-side tests for scene configuration loading and validation.

use std::path::Path;

use tree_core::*;

#[test]
fn empty_object_is_the_default_scene() {
    let config = SceneConfig::from_json_str("{}").expect("defaults are valid");
    assert_eq!(config, SceneConfig::default());
    assert!(SceneConfig::default().validate().is_ok());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let text = r#"{
        "seed": 42,
        "tree": { "height": 14.0 },
        "box": { "count": 3, "palette": [[1.0, 0.0, 0.0]] },
        "star": { "count": 0 }
    }"#;
    let config = SceneConfig::from_json_str(text).expect("valid config");
    let defaults = SceneConfig::default();
    assert_eq!(config.seed, 42);
    assert_eq!(config.tree.height, 14.0);
    assert_eq!(config.tree.radius, defaults.tree.radius);
    assert_eq!(config.population(OrnamentKind::Box).count, 3);
    assert_eq!(config.gift_box.palette, vec![[1.0, 0.0, 0.0]]);
    assert_eq!(config.star.count, 0);
    assert_eq!(config.star.palette, defaults.star.palette);
    assert_eq!(config.foliage, defaults.foliage);
    assert_eq!(config.spiral, defaults.spiral);
}

#[test]
fn palette_only_override_keeps_the_default_count() {
    let config = SceneConfig::from_json_str(r#"{ "ball": { "palette": [[1, 0, 0]] } }"#)
        .expect("valid config");
    assert_eq!(config.ball.count, SceneConfig::default().ball.count);
    assert_eq!(config.ball.palette, vec![[1.0, 0.0, 0.0]]);

    let scene = Scene::new(config);
    let balls = scene.population(OrnamentKind::Ball).expect("balls");
    assert_eq!(balls.len(), SceneConfig::default().ball.count);
    assert!(balls.objects().iter().all(|o| o.color == [1.0, 0.0, 0.0]));
}

#[test]
fn count_only_override_keeps_the_default_palette() {
    let config = SceneConfig::from_json_str(r#"{ "star": { "count": 5 } }"#).expect("valid config");
    let defaults = SceneConfig::default();
    assert_eq!(config.star.count, 5);
    assert_eq!(config.star.palette, defaults.star.palette);
    assert!(!config.star.palette.is_empty());
}

#[test]
fn explicit_empty_palette_is_honored() {
    let config = SceneConfig::from_json_str(r#"{ "candy": { "palette": [] } }"#).expect("valid config");
    assert!(config.candy.palette.is_empty());
    assert_eq!(config.candy.count, SceneConfig::default().candy.count);
}

#[test]
fn non_positive_shapes_are_rejected() {
    let err = SceneConfig::from_json_str(r#"{ "tree": { "radius": 0.0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive { field: "tree.radius", .. }
    ));
    let err = SceneConfig::from_json_str(r#"{ "spiral": { "turns": -1.0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive { field: "spiral.turns", .. }
    ));
}

#[test]
fn inverted_ranges_are_rejected() {
    let text = r#"{ "photo_wall": { "height": [8.0, -6.0] } }"#;
    let err = SceneConfig::from_json_str(text).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvertedRange { field: "photo_wall.height", .. }
    ));
}

#[test]
fn photo_wall_must_clear_the_tree() {
    let text = r#"{ "photo_wall": { "radius": [3.0, 9.0] } }"#;
    let err = SceneConfig::from_json_str(text).unwrap_err();
    assert!(matches!(err, ConfigError::PhotoWallInsideTree { .. }));
    assert!(err.to_string().contains("photo wall"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = SceneConfig::from_json_str("{ \"seed\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = SceneConfig::from_json_str(r#"{ "ball": { "count": -4 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_reports_its_path() {
    let err = SceneConfig::load(Path::new("/nonexistent/scene.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/scene.json"));
}

#[test]
fn config_round_trips_through_json() {
    let config = SceneConfig::default();
    let text = serde_json::to_string(&config).expect("serializable");
    assert!(text.contains("\"box\""));
    assert_eq!(SceneConfig::from_json_str(&text).expect("valid"), config);
}
