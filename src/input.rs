use glam::Vec2;
use tree_core::GestureSample;

/// Pointer and keyboard state standing in for the hand tracker.
///
/// Holding the left button (or toggling with Space) reads as a closed fist,
/// which assembles the tree; otherwise the hand is open and the tree
/// scatters. Leaving the window reads as "no hand detected".
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub ndc: Vec2,
    pub inside: bool,
    pub button_down: bool,
    pub fist_latched: bool,
}

impl PointerState {
    pub fn set_cursor(&mut self, x_px: f32, y_px: f32, width: u32, height: u32) {
        self.ndc = cursor_ndc(x_px, y_px, width, height);
        self.inside = true;
    }

    pub fn toggle_latch(&mut self) {
        self.fist_latched = !self.fist_latched;
    }

    pub fn gesture(&self) -> GestureSample {
        GestureSample {
            is_detected: self.inside,
            is_open: !(self.button_down || self.fist_latched),
            position: self.ndc,
        }
    }
}

/// Window pixel coordinates to [-1, 1] with +Y up.
#[inline]
pub fn cursor_ndc(x_px: f32, y_px: f32, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new(
        ((2.0 * x_px / w) - 1.0).clamp(-1.0, 1.0),
        (1.0 - (2.0 * y_px / h)).clamp(-1.0, 1.0),
    )
}
