//! Camera parallax and rotational momentum.
//!
//! The rig has no discrete states. Every tick it smooths the pointer, eases
//! the camera toward a parallax position derived from it, and feeds the
//! change in horizontal input into a decaying spin velocity for the group.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::constants::*;
use crate::smoothing::{clamp_dt, smooth_vec2, smooth_vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_rest_position(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space camera right and up; sprites span these so they always
    /// face the viewer.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        (view.row(0).truncate(), view.row(1).truncate())
    }

    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }
}

/// Per-frame camera output consumed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub group_angle: f32,
}

impl CameraPose {
    pub fn group_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.group_angle)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub smoothed_input: Vec2,
    pub rotation_velocity: f32,
    pub last_smoothed_x: f32,
    pub position: Vec3,
    pub group_angle: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            smoothed_input: Vec2::ZERO,
            rotation_velocity: 0.0,
            last_smoothed_x: 0.0,
            position: camera_rest_position(),
            group_angle: 0.0,
        }
    }
}

/// Where the camera heads for a given smoothed input.
#[inline]
pub fn parallax_target(input: Vec2) -> Vec3 {
    let x = input.x * CAMERA_PARALLAX_X;
    let y = input.y * CAMERA_PARALLAX_Y;
    Vec3::new(x, y, CAMERA_BASE_DISTANCE + x.abs() * CAMERA_DEPTH_PULLBACK)
}

impl CameraRig {
    pub fn tick(&mut self, pointer: Vec2, dt: f32) -> CameraPose {
        self.smoothed_input = smooth_vec2(self.smoothed_input, pointer, POINTER_SMOOTH_RATE, dt);
        self.position = smooth_vec3(
            self.position,
            parallax_target(self.smoothed_input),
            CAMERA_SMOOTH_RATE,
            dt,
        );

        let delta = self.smoothed_input.x - self.last_smoothed_x;
        self.last_smoothed_x = self.smoothed_input.x;
        self.rotation_velocity = self.rotation_velocity * MOMENTUM_DECAY + delta * MOMENTUM_GAIN;
        self.group_angle = (self.group_angle
            + BASE_SPIN_PER_SEC * clamp_dt(dt)
            + self.rotation_velocity)
            % std::f32::consts::TAU;

        self.pose()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.position,
            target: Vec3::ZERO,
            group_angle: self.group_angle,
        }
    }
}
