//! Procedural layouts for a population: where each object sits when the tree
//! is formed, where it drifts to in chaos, and the per-object scale, tilt and
//! color that stay fixed for the object's lifetime.

use glam::Vec3;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::constants::*;
use crate::kind::{ChaosLayout, OrnamentKind, TargetLayout};

/// Cone the foliage covers and the ornaments hang on.
///
/// The cone is centered on the origin: apex at `+height / 2`, base at
/// `-height / 2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeShape {
    pub height: f32,
    pub radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            radius: TREE_RADIUS,
        }
    }
}

/// Helix wound around the tree for the light strip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralShape {
    pub height: f32,
    pub radius_bottom: f32,
    pub radius_top: f32,
    pub turns: f32,
}

impl Default for SpiralShape {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            radius_bottom: SPIRAL_RADIUS_BOTTOM,
            radius_top: SPIRAL_RADIUS_TOP,
            turns: SPIRAL_TURNS,
        }
    }
}

/// Cylindrical band the scattered photos float in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoWall {
    pub radius: [f32; 2],
    pub height: [f32; 2],
}

impl Default for PhotoWall {
    fn default() -> Self {
        Self {
            radius: PHOTO_WALL_RADIUS,
            height: PHOTO_WALL_HEIGHT,
        }
    }
}

/// All shape parameters a generator call may need.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shapes {
    pub tree: TreeShape,
    pub spiral: SpiralShape,
    pub photo_wall: PhotoWall,
}

/// Immutable per-object data produced once at population creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectDatum {
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub chaos_scale: Vec3,
    pub target_scale: Vec3,
    /// Euler XYZ in radians.
    pub static_rotation: Vec3,
    pub color: [f32; 3],
    /// In-plane tilt while scattered; photos only.
    pub chaos_tilt: f32,
    /// Smoothing rate for objects that own their blend.
    pub blend_rate: f32,
}

/// Parallel formed/scattered position arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub target: Vec<Vec3>,
    pub chaos: Vec<Vec3>,
}

/// Area-uniform point on the lateral surface of the tree cone.
pub fn cone_surface_point<R: Rng + ?Sized>(rng: &mut R, tree: &TreeShape) -> Vec3 {
    // Surface area grows linearly with distance from the apex, so sample
    // that distance with a sqrt to keep density even.
    let u = rng.gen::<f32>().sqrt();
    let angle = rng.gen_range(0.0..TAU);
    let y = tree.height * 0.5 - u * tree.height;
    let r = u * tree.radius;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Point `index` of `count` evenly spaced along the spiral, bottom to top.
pub fn spiral_point<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    count: usize,
    spiral: &SpiralShape,
) -> Vec3 {
    let t = (index as f32 + 0.5) / count.max(1) as f32;
    let angle = t * spiral.turns * TAU;
    let radius = spiral.radius_bottom + (spiral.radius_top - spiral.radius_bottom) * t
        + rng.gen_range(-SPIRAL_RADIAL_JITTER..=SPIRAL_RADIAL_JITTER);
    let y = -spiral.height * 0.5 + t * spiral.height;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Uniform point inside a sphere centered on the origin.
pub fn sphere_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let z = rng.gen_range(-1.0f32..=1.0);
    let theta = rng.gen_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let dir = Vec3::new(ring * theta.cos(), z, ring * theta.sin());
    dir * radius * rng.gen::<f32>().cbrt()
}

/// Point in the cylindrical band around the tree used by scattered photos.
pub fn photo_wall_point<R: Rng + ?Sized>(rng: &mut R, wall: &PhotoWall) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = sample_band(rng, wall.radius);
    let y = sample_band(rng, wall.height);
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

#[inline]
fn sample_band<R: Rng + ?Sized>(rng: &mut R, band: [f32; 2]) -> f32 {
    let (lo, hi) = if band[0] <= band[1] {
        (band[0], band[1])
    } else {
        (band[1], band[0])
    };
    if hi - lo <= f32::EPSILON {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

/// Formed and scattered positions for `count` objects of `kind`.
pub fn generate_layout<R: Rng + ?Sized>(
    rng: &mut R,
    kind: OrnamentKind,
    count: usize,
    shapes: &Shapes,
) -> Layout {
    let mut layout = Layout {
        target: Vec::with_capacity(count),
        chaos: Vec::with_capacity(count),
    };
    for i in 0..count {
        let target = match kind.target_layout() {
            TargetLayout::ConeSurface => cone_surface_point(rng, &shapes.tree),
            TargetLayout::PushedCone(push) => cone_surface_point(rng, &shapes.tree) * push,
            TargetLayout::Spiral => spiral_point(rng, i, count, &shapes.spiral),
        };
        let chaos = match kind.chaos_layout() {
            ChaosLayout::Sphere => sphere_point(rng, CHAOS_SPHERE_RADIUS),
            ChaosLayout::PhotoWall => photo_wall_point(rng, &shapes.photo_wall),
        };
        layout.target.push(target);
        layout.chaos.push(chaos);
    }
    layout
}

/// Full immutable data for a population, generated once.
pub fn generate_objects<R: Rng + ?Sized>(
    rng: &mut R,
    kind: OrnamentKind,
    count: usize,
    palette: &[[f32; 3]],
    shapes: &Shapes,
) -> Vec<ObjectDatum> {
    let Layout { target, chaos } = generate_layout(rng, kind, count, shapes);
    let base = kind.base_scale();
    target
        .into_iter()
        .zip(chaos)
        .map(|(target_position, chaos_position)| {
            let magnitude = rng.gen_range(SCALE_JITTER[0]..=SCALE_JITTER[1]);
            let target_scale = base * magnitude;
            let is_photo = kind == OrnamentKind::Photo;
            let chaos_scale = if is_photo {
                target_scale * rng.gen_range(PHOTO_CHAOS_SCALE[0]..=PHOTO_CHAOS_SCALE[1])
            } else {
                target_scale
            };
            let static_rotation = if kind.tumbles() {
                Vec3::new(
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.0..TAU),
                )
            } else {
                Vec3::ZERO
            };
            let (chaos_tilt, blend_rate) = if is_photo {
                (
                    rng.gen_range(-PHOTO_MAX_TILT..=PHOTO_MAX_TILT),
                    MIX_BLEND_RATE * rng.gen_range(PHOTO_RATE_JITTER[0]..=PHOTO_RATE_JITTER[1]),
                )
            } else {
                (0.0, MIX_BLEND_RATE)
            };
            let color = palette.choose(rng).copied().unwrap_or(DEFAULT_COLOR);
            ObjectDatum {
                chaos_position,
                target_position,
                chaos_scale,
                target_scale,
                static_rotation,
                color,
                chaos_tilt,
                blend_rate,
            }
        })
        .collect()
}
