//! Scene configuration: population sizes, palettes and shape parameters.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. A missing file is never required; `SceneConfig::default()` is a
//! complete scene.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::distribution::{PhotoWall, Shapes, SpiralShape, TreeShape};
use crate::kind::OrnamentKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid scene config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} range is inverted: [{lo}, {hi}]")]
    InvertedRange {
        field: &'static str,
        lo: f32,
        hi: f32,
    },
    #[error("photo wall inner radius {inner} must lie outside the tree radius {tree}")]
    PhotoWallInsideTree { inner: f32, tree: f32 },
}

/// Size and colors for one population.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PopulationConfig {
    pub count: usize,
    pub palette: Vec<[f32; 3]>,
}

impl PopulationConfig {
    fn new(count: usize, palette: &[[f32; 3]]) -> Self {
        Self {
            count,
            palette: palette.to_vec(),
        }
    }
}

/// A population section as written in a config file. Absent fields keep
/// the kind's default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PopulationOverride {
    count: Option<usize>,
    palette: Option<Vec<[f32; 3]>>,
}

impl PopulationOverride {
    fn apply(self, base: PopulationConfig) -> PopulationConfig {
        PopulationConfig {
            count: self.count.unwrap_or(base.count),
            palette: self.palette.unwrap_or(base.palette),
        }
    }
}

/// On-disk form of [`SceneConfig`]; merged onto the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SceneFile {
    seed: Option<u64>,
    tree: TreeShape,
    spiral: SpiralShape,
    photo_wall: PhotoWall,
    foliage: PopulationOverride,
    spiral_light: PopulationOverride,
    ball: PopulationOverride,
    #[serde(rename = "box")]
    gift_box: PopulationOverride,
    star: PopulationOverride,
    crystal: PopulationOverride,
    candy: PopulationOverride,
    photo: PopulationOverride,
}

impl From<SceneFile> for SceneConfig {
    fn from(file: SceneFile) -> Self {
        let defaults = SceneConfig::default();
        Self {
            seed: file.seed.unwrap_or(defaults.seed),
            tree: file.tree,
            spiral: file.spiral,
            photo_wall: file.photo_wall,
            foliage: file.foliage.apply(defaults.foliage),
            spiral_light: file.spiral_light.apply(defaults.spiral_light),
            ball: file.ball.apply(defaults.ball),
            gift_box: file.gift_box.apply(defaults.gift_box),
            star: file.star.apply(defaults.star),
            crystal: file.crystal.apply(defaults.crystal),
            candy: file.candy.apply(defaults.candy),
            photo: file.photo.apply(defaults.photo),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SceneFile")]
pub struct SceneConfig {
    /// Base seed; each population derives its own generator from it.
    pub seed: u64,
    pub tree: TreeShape,
    pub spiral: SpiralShape,
    pub photo_wall: PhotoWall,
    pub foliage: PopulationConfig,
    pub spiral_light: PopulationConfig,
    pub ball: PopulationConfig,
    #[serde(rename = "box")]
    pub gift_box: PopulationConfig,
    pub star: PopulationConfig,
    pub crystal: PopulationConfig,
    pub candy: PopulationConfig,
    /// Photo count follows the supplied images; only the frame palette is used.
    pub photo: PopulationConfig,
}

const FOLIAGE_GREENS: [[f32; 3]; 4] = [
    [0.02, 0.32, 0.12],
    [0.04, 0.42, 0.16],
    [0.08, 0.52, 0.22],
    [0.12, 0.38, 0.10],
];
const WARM_LIGHTS: [[f32; 3]; 2] = [[1.0, 0.85, 0.45], [1.0, 0.72, 0.3]];
const BAUBLES: [[f32; 3]; 4] = [
    [0.85, 0.08, 0.12],
    [0.95, 0.75, 0.25],
    [0.8, 0.82, 0.88],
    [0.1, 0.25, 0.7],
];
const GIFT_WRAP: [[f32; 3]; 3] = [[0.75, 0.1, 0.15], [0.15, 0.45, 0.25], [0.95, 0.9, 0.8]];
const STAR_GOLD: [[f32; 3]; 1] = [[1.0, 0.84, 0.3]];
const ICE: [[f32; 3]; 2] = [[0.7, 0.9, 1.0], [0.85, 0.95, 1.0]];
const CANDY: [[f32; 3]; 2] = [[0.95, 0.95, 0.95], [0.9, 0.1, 0.15]];
const FRAME_WHITE: [[f32; 3]; 2] = [[0.98, 0.97, 0.94], [0.95, 0.93, 0.88]];

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_7EE5,
            tree: TreeShape::default(),
            spiral: SpiralShape::default(),
            photo_wall: PhotoWall::default(),
            foliage: PopulationConfig::new(6000, &FOLIAGE_GREENS),
            spiral_light: PopulationConfig::new(360, &WARM_LIGHTS),
            ball: PopulationConfig::new(90, &BAUBLES),
            gift_box: PopulationConfig::new(50, &GIFT_WRAP),
            star: PopulationConfig::new(30, &STAR_GOLD),
            crystal: PopulationConfig::new(50, &ICE),
            candy: PopulationConfig::new(40, &CANDY),
            photo: PopulationConfig::new(0, &FRAME_WHITE),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ordered(field: &'static str, range: [f32; 2]) -> Result<(), ConfigError> {
    if range[0] <= range[1] {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            field,
            lo: range[0],
            hi: range[1],
        })
    }
}

impl SceneConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject shapes that cannot describe a tree. Counts and palettes are
    /// never rejected; zero and empty degrade to empty or default output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tree.height", self.tree.height)?;
        positive("tree.radius", self.tree.radius)?;
        positive("spiral.height", self.spiral.height)?;
        positive("spiral.turns", self.spiral.turns)?;
        ordered("photo_wall.radius", self.photo_wall.radius)?;
        ordered("photo_wall.height", self.photo_wall.height)?;
        if self.photo_wall.radius[0] <= self.tree.radius {
            return Err(ConfigError::PhotoWallInsideTree {
                inner: self.photo_wall.radius[0],
                tree: self.tree.radius,
            });
        }
        Ok(())
    }

    pub fn population(&self, kind: OrnamentKind) -> &PopulationConfig {
        match kind {
            OrnamentKind::Foliage => &self.foliage,
            OrnamentKind::SpiralLight => &self.spiral_light,
            OrnamentKind::Ball => &self.ball,
            OrnamentKind::Box => &self.gift_box,
            OrnamentKind::Star => &self.star,
            OrnamentKind::Crystal => &self.crystal,
            OrnamentKind::Candy => &self.candy,
            OrnamentKind::Photo => &self.photo,
        }
    }

    pub fn population_mut(&mut self, kind: OrnamentKind) -> &mut PopulationConfig {
        match kind {
            OrnamentKind::Foliage => &mut self.foliage,
            OrnamentKind::SpiralLight => &mut self.spiral_light,
            OrnamentKind::Ball => &mut self.ball,
            OrnamentKind::Box => &mut self.gift_box,
            OrnamentKind::Star => &mut self.star,
            OrnamentKind::Crystal => &mut self.crystal,
            OrnamentKind::Candy => &mut self.candy,
            OrnamentKind::Photo => &mut self.photo,
        }
    }

    pub fn shapes(&self) -> Shapes {
        Shapes {
            tree: self.tree,
            spiral: self.spiral,
            photo_wall: self.photo_wall,
        }
    }
}
