pub mod beam;
pub mod camera;
pub mod color;
pub mod constants;
pub mod gpu;
pub mod particle;
pub mod pointer;
pub mod scene;
pub mod wave;
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");

pub use camera::*;
pub use constants::*;
pub use scene::*;
