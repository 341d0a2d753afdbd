use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{ORNAMENT_PUSH_OUT, STAR_PUSH_OUT};

/// Every population the scene knows how to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentKind {
    Foliage,
    SpiralLight,
    Ball,
    Box,
    Star,
    Crystal,
    Candy,
    Photo,
}

/// How a population's transforms reach the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStrategy {
    /// One instance buffer write for the whole population per frame.
    Batched,
    /// One draw per object; needed when each object owns its own imagery.
    Individual,
}

/// Where a kind's formed position comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetLayout {
    /// Raw point on the cone surface.
    ConeSurface,
    /// Cone point scaled outward by the given factor.
    PushedCone(f32),
    Spiral,
}

/// Where a kind's scattered position comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaosLayout {
    Sphere,
    PhotoWall,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 8] = [
        OrnamentKind::Foliage,
        OrnamentKind::SpiralLight,
        OrnamentKind::Ball,
        OrnamentKind::Box,
        OrnamentKind::Star,
        OrnamentKind::Crystal,
        OrnamentKind::Candy,
        OrnamentKind::Photo,
    ];

    pub fn render_strategy(self) -> RenderStrategy {
        match self {
            OrnamentKind::Photo => RenderStrategy::Individual,
            _ => RenderStrategy::Batched,
        }
    }

    pub fn target_layout(self) -> TargetLayout {
        match self {
            OrnamentKind::Foliage => TargetLayout::ConeSurface,
            OrnamentKind::SpiralLight => TargetLayout::Spiral,
            OrnamentKind::Star => TargetLayout::PushedCone(STAR_PUSH_OUT),
            _ => TargetLayout::PushedCone(ORNAMENT_PUSH_OUT),
        }
    }

    pub fn chaos_layout(self) -> ChaosLayout {
        match self {
            OrnamentKind::Photo => ChaosLayout::PhotoWall,
            _ => ChaosLayout::Sphere,
        }
    }

    /// Base shape multiplied by each object's random magnitude.
    pub fn base_scale(self) -> Vec3 {
        match self {
            OrnamentKind::Foliage => Vec3::splat(0.06),
            OrnamentKind::SpiralLight => Vec3::splat(0.09),
            OrnamentKind::Ball => Vec3::splat(0.28),
            OrnamentKind::Box => Vec3::splat(0.26),
            OrnamentKind::Star => Vec3::splat(0.45),
            OrnamentKind::Crystal => Vec3::splat(0.22),
            OrnamentKind::Candy => Vec3::new(0.08, 0.42, 0.08),
            OrnamentKind::Photo => Vec3::ONE,
        }
    }

    /// Kinds hung at a random angle; the rest keep an upright baseline.
    pub fn tumbles(self) -> bool {
        matches!(
            self,
            OrnamentKind::Ball | OrnamentKind::Box | OrnamentKind::Crystal | OrnamentKind::Candy
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            OrnamentKind::Foliage => "foliage",
            OrnamentKind::SpiralLight => "spiral_light",
            OrnamentKind::Ball => "ball",
            OrnamentKind::Box => "box",
            OrnamentKind::Star => "star",
            OrnamentKind::Crystal => "crystal",
            OrnamentKind::Candy => "candy",
            OrnamentKind::Photo => "photo",
        }
    }
}
