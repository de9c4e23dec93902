use crate::{
    chunk::CHUNK_SHAPE_VEC3A,
    units::*,
};
use crate::core::glam::{const_vec3a, IVec3, Vec3A};
use crate::core::ilattice::prelude::Extent;

/// Default minimum corner of the chunk in world space.
pub const CHUNK_MIN: Vec3A = const_vec3a!([-1.0, -1.0, -3.0]);
/// Default maximum corner of the chunk in world space.
pub const CHUNK_MAX: Vec3A = const_vec3a!([1.0, 1.0, -1.0]);

/// Where the chunk's voxel grid sits in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkBounds {
    min: Vec3A,
    max: Vec3A,
}

impl Default for ChunkBounds {
    fn default() -> Self {
        Self {
            min: CHUNK_MIN,
            max: CHUNK_MAX,
        }
    }
}

impl ChunkBounds {
    /// Returns `None` unless `max` is strictly greater than `min` on every axis.
    pub fn new(min: Vec3A, max: Vec3A) -> Option<Self> {
        max.cmpgt(min).all().then(|| Self { min, max })
    }

    pub fn min(&self) -> Vec3A {
        self.min
    }

    pub fn max(&self) -> Vec3A {
        self.max
    }

    pub fn extent(&self) -> WorldUnits<Extent<Vec3A>> {
        WorldUnits(Extent::from_min_and_lub(self.min, self.max))
    }

    /// Voxel density along each axis.
    pub fn voxels_per_unit(&self) -> Vec3A {
        CHUNK_SHAPE_VEC3A / (self.max - self.min)
    }

    /// Inclusive of the boundary.
    pub fn contains(&self, p: WorldUnits<Vec3A>) -> bool {
        p.0.cmpge(self.min).all() && p.0.cmple(self.max).all()
    }

    pub fn world_to_grid(&self, p: WorldUnits<Vec3A>) -> GridUnits<Vec3A> {
        GridUnits((p.0 - self.min) * self.voxels_per_unit())
    }

    pub fn grid_to_world(&self, p: GridUnits<Vec3A>) -> WorldUnits<Vec3A> {
        WorldUnits(p.0 / self.voxels_per_unit() + self.min)
    }

    /// World-space center of the voxel at `coords`.
    pub fn voxel_center(&self, coords: GridUnits<IVec3>) -> WorldUnits<Vec3A> {
        self.grid_to_world(coords.map(|c| c.as_vec3a() + Vec3A::splat(0.5)))
    }
}
