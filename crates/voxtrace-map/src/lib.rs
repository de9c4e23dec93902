//! The voxtrace map data model.
//!
//! # Voxels
//!
//! A map is a single [`Chunk`](crate::Chunk) of 32^3 voxels. Each [`Voxel`](crate::Voxel) is either empty or active, and
//! an active voxel's [`PaletteId8`](crate::PaletteId8) selects its color from a [`Palette8`](crate::Palette8). Only 256
//! colors are supported in a single map.
//!
//! # Placement
//!
//! The chunk is stretched over an axis-aligned box in world space described by [`ChunkBounds`](crate::ChunkBounds). The
//! box need not be a cube, so voxels may be anisotropic. Positions are tagged with [`WorldUnits`](crate::WorldUnits) or
//! [`GridUnits`](crate::GridUnits) wherever both spaces meet.
//!
//! # Ray Casting
//!
//! [`cast_through_chunk`](crate::cast_through_chunk) walks a ray through the grid voxel by voxel, and
//! [`VoxelScene::cast_ray`](crate::VoxelScene::cast_ray) uses it to find the first active voxel.

mod chunk;
mod config;
mod coordinates;
mod ndview;
mod palette;
mod scene;
mod traversal;
mod units;

pub use chunk::*;
pub use config::*;
pub use coordinates::*;
pub use ndview::*;
pub use palette::*;
pub use scene::*;
pub use traversal::*;
pub use units::*;

pub use voxtrace_core as core;
