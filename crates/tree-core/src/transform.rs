//! Per-frame blended transforms and the GPU-ready instance records they
//! are written into.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::constants::ORIENT_BLEND_THRESHOLD;
use crate::distribution::ObjectDatum;
use crate::kind::OrnamentKind;

/// Decomposed world transform of one rendered object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl InstanceTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn to_raw(&self, color: [f32; 3]) -> InstanceRaw {
        InstanceRaw {
            model: self.matrix().to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

/// Instance buffer element: column-major model matrix plus RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }

    /// Width and height of the unit quad after the model's scale.
    pub fn sprite_size(&self) -> (f32, f32) {
        let x = Vec3::from_slice(&self.model[0][..3]).length();
        let y = Vec3::from_slice(&self.model[1][..3]).length();
        (x, y)
    }
}

/// Unit quad corners in drawing order.
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

/// World-space corners of a batched sprite. Center and size come from the
/// instance; the axes come from the camera, so group rotation never turns a
/// sprite edge-on. Mirrors `vs_sprite` in the scene shader.
pub fn sprite_corners(instance: &InstanceRaw, right: Vec3, up: Vec3) -> [Vec3; 4] {
    let center = instance.translation();
    let (w, h) = instance.sprite_size();
    QUAD_CORNERS.map(|[cx, cy]| center + right * (cx * w) + up * (cy * h))
}

/// `chaos * (1 - t) + target * t`; exact at both ends.
#[inline]
pub fn lerp_exact(chaos: Vec3, target: Vec3, t: f32) -> Vec3 {
    chaos * (1.0 - t) + target * t
}

#[inline]
pub fn euler_rotation(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
}

/// Rotation whose local +Z points along `forward` with +Y kept as upright as
/// possible. `None` when `forward` is zero or vertical.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let f = forward.try_normalize()?;
    let right = Vec3::Y.cross(f).try_normalize()?;
    let up = f.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, f)))
}

/// Faces +Z away from the vertical axis through `position`.
#[inline]
pub fn radial_rotation(position: Vec3) -> Option<Quat> {
    look_rotation(Vec3::new(position.x, 0.0, position.z))
}

/// Blended transform for every kind except photos, in group-local space.
pub fn local_transform(kind: OrnamentKind, datum: &ObjectDatum, blend: f32) -> InstanceTransform {
    let t = blend.clamp(0.0, 1.0);
    let translation = lerp_exact(datum.chaos_position, datum.target_position, t);
    let scale = lerp_exact(datum.chaos_scale, datum.target_scale, t);
    let baseline = euler_rotation(datum.static_rotation);
    let rotation = match kind {
        OrnamentKind::Star if t > ORIENT_BLEND_THRESHOLD => {
            radial_rotation(translation).unwrap_or(baseline)
        }
        _ => baseline,
    };
    InstanceTransform {
        translation,
        rotation,
        scale,
    }
}

/// Applies the group's spin about the vertical axis.
#[inline]
pub fn to_world(group: Quat, local: InstanceTransform) -> InstanceTransform {
    InstanceTransform {
        translation: group * local.translation,
        rotation: group * local.rotation,
        scale: local.scale,
    }
}

/// World transform for a photo card.
///
/// Formed cards face outward from the trunk. Scattered cards turn toward
/// `eye` and roll by `tilt` in their own plane.
pub fn photo_transform(
    datum: &ObjectDatum,
    blend: f32,
    tilt: f32,
    group: Quat,
    eye: Vec3,
) -> InstanceTransform {
    let t = blend.clamp(0.0, 1.0);
    let local_pos = lerp_exact(datum.chaos_position, datum.target_position, t);
    let scale = lerp_exact(datum.chaos_scale, datum.target_scale, t);
    let translation = group * local_pos;
    let baseline = group * euler_rotation(datum.static_rotation);
    let rotation = if t > ORIENT_BLEND_THRESHOLD {
        radial_rotation(local_pos)
            .map(|r| group * r)
            .unwrap_or(baseline)
    } else {
        look_rotation(eye - translation)
            .map(|r| r * Quat::from_rotation_z(tilt))
            .unwrap_or(baseline)
    };
    InstanceTransform {
        translation,
        rotation,
        scale,
    }
}

/// One instance buffer's worth of transforms for a batched population.
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    pub kind: OrnamentKind,
    pub instances: Vec<InstanceRaw>,
}

impl InstanceBatch {
    pub fn new(kind: OrnamentKind, capacity: usize) -> Self {
        Self {
            kind,
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Rewrites the whole batch from immutable object data in one pass.
    pub fn rebuild(&mut self, objects: &[ObjectDatum], blend: f32, group: Quat) {
        let kind = self.kind;
        self.instances.clear();
        self.instances.extend(
            objects
                .iter()
                .map(|datum| to_world(group, local_transform(kind, datum, blend)).to_raw(datum.color)),
        );
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
