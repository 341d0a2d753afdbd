//! The single smoothing law shared by every animated quantity.
//!
//! Mix blending, pointer input, camera position and photo tilt all settle
//! with `current += (target - current) * min(rate * dt, 1)`, evaluated on a
//! frame delta clamped to [`MAX_FRAME_DT`].

use crate::constants::{MAX_FRAME_DT, MIX_BLEND_RATE};
use glam::{Vec2, Vec3};

/// Clamp a raw frame delta to the range the smoothing law accepts.
///
/// Negative or NaN deltas count as zero so a stalled or misreported clock
/// never moves anything backwards.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

#[inline]
fn step_fraction(rate: f32, dt: f32) -> f32 {
    (rate * clamp_dt(dt)).clamp(0.0, 1.0)
}

/// Exponential approach of `current` toward `target`; never overshoots.
#[inline]
pub fn smooth(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * step_fraction(rate, dt)
}

#[inline]
pub fn smooth_vec2(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    current + (target - current) * step_fraction(rate, dt)
}

#[inline]
pub fn smooth_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * step_fraction(rate, dt)
}

/// Smoothed mix value tracking an external target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendState {
    pub current: f32,
    pub rate: f32,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            current: 0.0,
            rate: MIX_BLEND_RATE,
        }
    }
}

impl BlendState {
    pub fn new(current: f32, rate: f32) -> Self {
        Self { current, rate }
    }

    /// Advance one frame toward `target` and return the new blend.
    pub fn tick(&mut self, target: f32, dt: f32) -> f32 {
        self.current = smooth(self.current, target, self.rate, dt);
        self.current
    }

    /// Blend clamped to the unit interval, as consumed by interpolation.
    #[inline]
    pub fn t(&self) -> f32 {
        self.current.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_and_negative_dt_do_not_move() {
        assert_eq!(smooth(0.3, 1.0, 2.0, f32::NAN), 0.3);
        assert_eq!(smooth(0.3, 1.0, 2.0, -1.0), 0.3);
    }

    #[test]
    fn high_rate_lands_on_target_without_overshoot() {
        assert_eq!(smooth(0.0, 1.0, 1000.0, 0.1), 1.0);
        assert_eq!(smooth_vec3(Vec3::ZERO, Vec3::ONE, 50.0, 0.05), Vec3::ONE);
    }
}
