//! Population orchestration: owns every population, the camera rig and the
//! photo asset list, and turns the latest control signal into one frame of
//! render state per tick.

use fnv::FnvHashMap;
use glam::Quat;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::camera::{CameraPose, CameraRig};
use crate::config::SceneConfig;
use crate::constants::PHOTO_LIMIT;
use crate::control::ControlSignal;
use crate::kind::{OrnamentKind, RenderStrategy};
use crate::photo::{
    frame_geometry, photo_population_size, AssetState, PhotoAsset, PhotoContent, PhotoFrame,
};
use crate::population::{BlendMode, Population};
use crate::transform::{photo_transform, InstanceBatch, InstanceRaw, InstanceTransform};

/// A photo card drawn on its own, with its imagery resolved for this frame.
#[derive(Clone, Debug)]
pub struct PhotoInstance {
    pub index: usize,
    pub transform: InstanceTransform,
    pub instance: InstanceRaw,
    pub blend: f32,
    pub frame: PhotoFrame,
    pub content: PhotoContent,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub batches: SmallVec<[InstanceBatch; 8]>,
    pub photos: Vec<PhotoInstance>,
    pub camera: CameraPose,
}

impl RenderState {
    pub fn batch(&self, kind: OrnamentKind) -> Option<&InstanceBatch> {
        self.batches.iter().find(|b| b.kind == kind)
    }

    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(InstanceBatch::len).sum::<usize>() + self.photos.len()
    }
}

/// Derive a population's generator seed from the scene seed.
#[inline]
fn population_seed(seed: u64, kind: OrnamentKind, generation: u64) -> u64 {
    let slot = OrnamentKind::ALL.iter().position(|k| *k == kind).unwrap_or(0) as u64;
    seed ^ (slot + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ generation.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

pub struct Scene {
    config: SceneConfig,
    populations: Vec<Population>,
    by_kind: FnvHashMap<OrnamentKind, usize>,
    photo_assets: Vec<PhotoAsset>,
    photo_generation: u64,
    rig: CameraRig,
    render: RenderState,
}

impl Scene {
    /// Build every population from `config`. Never fails: zero counts give
    /// empty populations and empty palettes give default-colored objects.
    pub fn new(config: SceneConfig) -> Self {
        let mut scene = Self {
            config,
            populations: Vec::with_capacity(OrnamentKind::ALL.len()),
            by_kind: FnvHashMap::default(),
            photo_assets: Vec::new(),
            photo_generation: 0,
            rig: CameraRig::default(),
            render: RenderState {
                batches: SmallVec::new(),
                photos: Vec::new(),
                camera: CameraRig::default().pose(),
            },
        };
        scene.regenerate_all();
        scene
    }

    fn generate(&self, kind: OrnamentKind, count: usize, initial_blend: f32) -> Population {
        let generation = if kind == OrnamentKind::Photo {
            self.photo_generation
        } else {
            0
        };
        let mut rng = StdRng::seed_from_u64(population_seed(self.config.seed, kind, generation));
        Population::generate(
            &mut rng,
            kind,
            count,
            &self.config.population(kind).palette,
            &self.config.shapes(),
            initial_blend,
        )
    }

    fn regenerate_all(&mut self) {
        self.populations.clear();
        self.by_kind.clear();
        self.render.batches.clear();
        for kind in OrnamentKind::ALL {
            let count = match kind {
                OrnamentKind::Photo => photo_population_size(self.photo_assets.len()),
                _ => self.config.population(kind).count,
            };
            let population = self.generate(kind, count, 0.0);
            if kind.render_strategy() == RenderStrategy::Batched {
                self.render
                    .batches
                    .push(InstanceBatch::new(kind, population.len()));
            }
            self.by_kind.insert(kind, self.populations.len());
            self.populations.push(population);
        }
        let total: usize = self.populations.iter().map(Population::len).sum();
        log::info!(
            "[scene] generated {} populations, {} objects (seed={:#x})",
            self.populations.len(),
            total,
            self.config.seed
        );
    }

    /// Replace the seed and regenerate every population from scratch.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.regenerate_all();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn population(&self, kind: OrnamentKind) -> Option<&Population> {
        self.by_kind.get(&kind).map(|&i| &self.populations[i])
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn camera_rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn photo_assets(&self) -> &[PhotoAsset] {
        &self.photo_assets
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// Install a new image list. The photo population is torn down and
    /// regenerated only when its size changes.
    pub fn set_photos(&mut self, mut assets: Vec<PhotoAsset>) {
        if assets.len() > PHOTO_LIMIT {
            log::warn!(
                "[scene] {} photos supplied, keeping the first {}",
                assets.len(),
                PHOTO_LIMIT
            );
            assets.truncate(PHOTO_LIMIT);
        }
        let old_size = photo_population_size(self.photo_assets.len());
        let new_size = photo_population_size(assets.len());
        self.photo_assets = assets;
        if old_size == new_size {
            return;
        }
        let Some(&slot) = self.by_kind.get(&OrnamentKind::Photo) else {
            return;
        };
        let carried_blend = self.populations[slot].blend();
        self.photo_generation += 1;
        self.populations[slot] = self.generate(OrnamentKind::Photo, new_size, carried_blend);
        log::info!("[scene] photo population rebuilt: {} -> {}", old_size, new_size);
    }

    /// Record a load result for photo `index`. Unknown indices are ignored.
    pub fn set_photo_state(&mut self, index: usize, state: AssetState) {
        match self.photo_assets.get_mut(index) {
            Some(asset) => asset.state = state,
            None => log::warn!("[scene] load result for unknown photo {}", index),
        }
    }

    /// One frame: advance the camera rig and every blend, then rebuild the
    /// render state from immutable object data.
    pub fn tick(&mut self, signal: &ControlSignal, dt: f32) -> &RenderState {
        let pose = self.rig.tick(signal.pointer, dt);
        let group = pose.group_rotation();

        for population in &mut self.populations {
            population.tick_blend(signal.mix_target, dt);
        }

        for batch in &mut self.render.batches {
            if let Some(&slot) = self.by_kind.get(&batch.kind) {
                let population = &self.populations[slot];
                batch.rebuild(population.objects(), population.blend(), group);
            }
        }

        self.render.photos.clear();
        if let Some(&slot) = self.by_kind.get(&OrnamentKind::Photo) {
            write_photos(
                &self.populations[slot],
                &self.photo_assets,
                group,
                pose,
                &mut self.render.photos,
            );
        }
        self.render.camera = pose;
        &self.render
    }
}

fn write_photos(
    population: &Population,
    assets: &[PhotoAsset],
    group: Quat,
    pose: CameraPose,
    out: &mut Vec<PhotoInstance>,
) {
    let BlendMode::PerObject(motions) = population.blend_mode() else {
        return;
    };
    for (index, (datum, motion)) in population.objects().iter().zip(motions).enumerate() {
        let content = PhotoContent::resolve(index, assets.get(index));
        let transform = photo_transform(datum, motion.blend.t(), motion.tilt, group, pose.eye);
        out.push(PhotoInstance {
            index,
            transform,
            instance: transform.to_raw(datum.color),
            blend: motion.blend.current,
            frame: frame_geometry(content.aspect()),
            content,
        });
    }
}
