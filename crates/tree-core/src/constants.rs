use glam::Vec3;

// Shared tuning constants for the core and the native viewer.

// Frame timing
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; longer stalls are treated as this

// Smoothing rates (per second)
pub const MIX_BLEND_RATE: f32 = 2.0;
pub const POINTER_SMOOTH_RATE: f32 = 3.0;
pub const CAMERA_SMOOTH_RATE: f32 = 2.0;
pub const PHOTO_RATE_JITTER: [f32; 2] = [0.75, 1.25]; // multiplier range on MIX_BLEND_RATE

// Tree profile (cone centered on the origin, apex up)
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS: f32 = 4.6;

// Spiral light strip
pub const SPIRAL_TURNS: f32 = 7.0;
pub const SPIRAL_RADIUS_BOTTOM: f32 = 4.9;
pub const SPIRAL_RADIUS_TOP: f32 = 0.35;
pub const SPIRAL_RADIAL_JITTER: f32 = 0.08;

// Ornament placement relative to the foliage surface
pub const ORNAMENT_PUSH_OUT: f32 = 1.08;
pub const STAR_PUSH_OUT: f32 = 1.15;

// Chaos layouts
pub const CHAOS_SPHERE_RADIUS: f32 = 25.0;
pub const PHOTO_WALL_RADIUS: [f32; 2] = [TREE_RADIUS + 3.0, TREE_RADIUS + 9.0];
pub const PHOTO_WALL_HEIGHT: [f32; 2] = [-6.0, 8.0];

// Scale
pub const SCALE_JITTER: [f32; 2] = [0.8, 1.2];
pub const PHOTO_CHAOS_SCALE: [f32; 2] = [2.5, 3.5];
pub const PHOTO_MAX_TILT: f32 = 0.25; // radians, about 14 degrees

// Orientation switch-over
pub const ORIENT_BLEND_THRESHOLD: f32 = 0.8;

// Photo frames
pub const PHOTO_LIMIT: usize = 30;
pub const PHOTO_DEFAULT_COUNT: usize = 10;
pub const FRAME_MAX_SIDE: f32 = 1.2;
pub const FRAME_SIDE_MARGIN: f32 = 0.06;
pub const FRAME_BOTTOM_MARGIN: f32 = 0.24;

// Camera rig
pub const CAMERA_PARALLAX_X: f32 = 4.0;
pub const CAMERA_PARALLAX_Y: f32 = 2.0;
pub const CAMERA_BASE_DISTANCE: f32 = 22.0;
pub const CAMERA_DEPTH_PULLBACK: f32 = 0.5; // extra depth per unit of horizontal displacement
pub const CAMERA_FOVY_DEG: f32 = 45.0;

// Rotational momentum
pub const MOMENTUM_GAIN: f32 = 0.5;
pub const MOMENTUM_DECAY: f32 = 0.95; // per tick
pub const BASE_SPIN_PER_SEC: f32 = 0.12; // radians per second

// Gesture mapping
pub const GESTURE_X_GAIN: f32 = 1.2;

// Fallback color for empty palettes
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

#[inline]
pub fn camera_rest_position() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_BASE_DISTANCE)
}
