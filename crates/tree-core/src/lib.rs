pub mod camera;
pub mod config;
pub mod constants;
pub mod control;
pub mod distribution;
pub mod kind;
pub mod photo;
pub mod population;
pub mod scene;
pub mod smoothing;
pub mod transform;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use control::*;
pub use distribution::*;
pub use kind::*;
pub use photo::*;
pub use population::*;
pub use scene::*;
pub use smoothing::*;
pub use transform::*;
