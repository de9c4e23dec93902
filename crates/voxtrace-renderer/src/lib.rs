//! CPU voxel path tracer with temporal anti-aliasing.
//!
//! Each frame runs two passes over the canvas. The trace pass shoots one jittered ray per pixel from the [`Camera`],
//! follows it through the [`VoxelScene`](crate::map::VoxelScene) with [`trace_path`], and records the color and the
//! screen-space motion of the first surface hit. The resolve pass then blends every pixel with the previous frame's
//! output, reprojected along that motion and clamped to the pixel's neighborhood. [`FrameRenderer`] owns the buffers
//! and runs both passes.

mod camera;
mod config;
mod error;
mod frame;
mod integrator;
mod jitter;
mod renderer;
mod resolve;
mod transform;
mod velocity;

pub use camera::*;
pub use config::*;
pub use error::*;
pub use frame::*;
pub use integrator::*;
pub use jitter::*;
pub use renderer::*;
pub use resolve::*;
pub use transform::*;
pub use velocity::*;

pub use voxtrace_core as core;
pub use voxtrace_map as map;
