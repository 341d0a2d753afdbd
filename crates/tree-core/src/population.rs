use rand::Rng;

use crate::distribution::{generate_objects, ObjectDatum, Shapes};
use crate::kind::{OrnamentKind, RenderStrategy};
use crate::smoothing::{smooth, BlendState};

/// Blend and tilt owned by a single photo card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoMotion {
    pub blend: BlendState,
    pub tilt: f32,
}

/// Either one blend for the whole population or one per object.
#[derive(Clone, Debug, PartialEq)]
pub enum BlendMode {
    Shared(BlendState),
    PerObject(Vec<PhotoMotion>),
}

/// A group of same-kind objects generated once from one configuration.
#[derive(Clone, Debug)]
pub struct Population {
    kind: OrnamentKind,
    objects: Vec<ObjectDatum>,
    blend: BlendMode,
}

impl Population {
    /// Runs the generation step. The result is cached for the population's
    /// lifetime and never regenerated.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        kind: OrnamentKind,
        count: usize,
        palette: &[[f32; 3]],
        shapes: &Shapes,
        initial_blend: f32,
    ) -> Self {
        let objects = generate_objects(rng, kind, count, palette, shapes);
        let blend = match kind.render_strategy() {
            RenderStrategy::Batched => BlendMode::Shared(BlendState {
                current: initial_blend,
                ..BlendState::default()
            }),
            RenderStrategy::Individual => BlendMode::PerObject(
                objects
                    .iter()
                    .map(|o| PhotoMotion {
                        blend: BlendState::new(initial_blend, o.blend_rate),
                        tilt: o.chaos_tilt * (1.0 - initial_blend.clamp(0.0, 1.0)),
                    })
                    .collect(),
            ),
        };
        log::debug!(
            "[population] generated kind={} count={}",
            kind.label(),
            objects.len()
        );
        Self {
            kind,
            objects,
            blend,
        }
    }

    pub fn kind(&self) -> OrnamentKind {
        self.kind
    }

    pub fn objects(&self) -> &[ObjectDatum] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn blend_mode(&self) -> &BlendMode {
        &self.blend
    }

    /// Shared blend, or the mean of per-object blends.
    pub fn blend(&self) -> f32 {
        match &self.blend {
            BlendMode::Shared(state) => state.current,
            BlendMode::PerObject(motions) if motions.is_empty() => 0.0,
            BlendMode::PerObject(motions) => {
                motions.iter().map(|m| m.blend.current).sum::<f32>() / motions.len() as f32
            }
        }
    }

    pub fn object_blend(&self, index: usize) -> f32 {
        match &self.blend {
            BlendMode::Shared(state) => state.current,
            BlendMode::PerObject(motions) => motions.get(index).map_or(0.0, |m| m.blend.current),
        }
    }

    /// Advance every blend toward `target`. Photo tilts ease toward
    /// their scattered tilt as the blend drops and toward zero as it rises.
    pub fn tick_blend(&mut self, target: f32, dt: f32) {
        match &mut self.blend {
            BlendMode::Shared(state) => {
                state.tick(target, dt);
            }
            BlendMode::PerObject(motions) => {
                for (motion, datum) in motions.iter_mut().zip(&self.objects) {
                    let b = motion.blend.tick(target, dt);
                    let tilt_target = datum.chaos_tilt * (1.0 - b.clamp(0.0, 1.0));
                    motion.tilt = smooth(motion.tilt, tilt_target, motion.blend.rate, dt);
                }
            }
        }
    }
}
