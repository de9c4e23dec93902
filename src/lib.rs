//! A CPU voxel path tracer with temporal anti-aliasing.
//!
//! The workspace is split the same way at every level: [`core`] holds rays, randomness and timing, [`map`] holds the
//! voxel chunk and the traversal that walks rays through it, and [`renderer`] turns a scene into resolved frames. This
//! crate adds file [`Config`] and a few procedural demo scenes.

mod config;
pub mod scene;

pub use config::Config;
pub use scene::DemoScene;

pub use voxtrace_core as core;
pub use voxtrace_map as map;
pub use voxtrace_renderer as renderer;
