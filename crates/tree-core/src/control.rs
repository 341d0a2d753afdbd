use glam::Vec2;

use crate::constants::GESTURE_X_GAIN;

/// Latest values written by the input collaborator; read once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSignal {
    /// 0 = scattered, 1 = formed. Fractional targets are honored.
    pub mix_target: f32,
    pub pointer: Vec2,
}

impl Default for ControlSignal {
    fn default() -> Self {
        Self {
            mix_target: 1.0,
            pointer: Vec2::ZERO,
        }
    }
}

/// One classified frame from the hand tracker (or a pointer standing in for it).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub is_detected: bool,
    /// Open palm scatters the tree; a fist assembles it.
    pub is_open: bool,
    /// Normalized hand position, roughly [-1, 1] on both axes.
    pub position: Vec2,
}

impl ControlSignal {
    /// Fold a gesture sample in. Undetected samples keep the last values.
    pub fn apply_gesture(&mut self, sample: &GestureSample) {
        if !sample.is_detected {
            return;
        }
        self.mix_target = if sample.is_open { 0.0 } else { 1.0 };
        self.pointer = Vec2::new(sample.position.x * GESTURE_X_GAIN, sample.position.y);
    }

    pub fn set_mix_target(&mut self, target: f32) {
        self.mix_target = target.clamp(0.0, 1.0);
    }
}
