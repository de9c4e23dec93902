use crate::{
    chunk::{Chunk, CHUNK_EDGE_LENGTH},
    coordinates::ChunkBounds,
    units::*,
    Voxel,
};
use crate::core::geometry::Ray;
use crate::core::glam::{IVec3, Vec3A};

/// The voxel where a traversal stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelHit {
    pub coords: IVec3,
    pub voxel: Voxel,
    /// Ray parameter where the ray enters the voxel.
    pub t: f32,
    pub position: Vec3A,
    /// Axis-aligned normal of the entered face; always opposes the ray direction.
    pub normal: Vec3A,
}

/// Marches the ray through `chunk` one voxel at a time (3D DDA), calling `visitor` on each voxel it enters, in order.
/// Return `false` from the visitor to stop the traversal at that voxel.
///
/// Rays that miss the chunk's bounding box within `[t_min, t_max]` never call the visitor. At most `max_steps` voxels
/// are visited; running out of steps or leaving the grid returns `None`.
pub fn cast_through_chunk(
    ray: &Ray,
    bounds: &ChunkBounds,
    chunk: &Chunk,
    t_min: f32,
    t_max: f32,
    max_steps: u32,
    mut visitor: impl FnMut(IVec3, Voxel) -> bool,
) -> Option<VoxelHit> {
    let WorldUnits(extent) = bounds.extent();
    let window = ray.cast_at_extent(extent, t_min, t_max)?;
    let t_entry = window.entry_time(t_min);

    let GridUnits(grid_start) = bounds.world_to_grid(WorldUnits(ray.position_at(t_entry)));
    // Same parameter as the world-space ray, offset by `t_entry`.
    let grid_direction = ray.direction() * bounds.voxels_per_unit();

    let start = grid_start.to_array();
    let direction = grid_direction.to_array();
    let mut voxel = [0i32; 3];
    let mut step = [0i32; 3];
    let mut t_delta = [f32::INFINITY; 3];
    let mut t_next = [f32::INFINITY; 3];
    for axis in 0..3 {
        voxel[axis] = (start[axis].floor() as i32).clamp(0, CHUNK_EDGE_LENGTH - 1);
        let inverse = 1.0 / direction[axis];
        if !inverse.is_finite() {
            // Zero or subnormal: this axis never steps.
            continue;
        }
        t_delta[axis] = inverse.abs();
        if direction[axis] > 0.0 {
            step[axis] = 1;
            t_next[axis] = ((voxel[axis] + 1) as f32 - start[axis]).max(0.0) * t_delta[axis];
        } else {
            step[axis] = -1;
            t_next[axis] = (start[axis] - voxel[axis] as f32).max(0.0) * t_delta[axis];
        }
    }

    // Parameter (relative to `t_entry`) where the ray entered the current voxel. After the first step this is always
    // `t_next[axis] - t_delta[axis]` for the last stepped axis.
    let mut t_cell = 0.0;
    let mut last_axis = window.entry_axis;
    for _ in 0..max_steps {
        let coords = IVec3::from(voxel);
        let value = chunk.voxel_view()[coords];
        if !visitor(coords, value) {
            let t = t_entry + t_cell;
            if t > t_max {
                return None;
            }
            let mut normal = [0.0; 3];
            normal[last_axis] = -step[last_axis] as f32;
            return Some(VoxelHit {
                coords,
                voxel: value,
                t,
                position: ray.position_at(t).max(bounds.min()).min(bounds.max()),
                normal: Vec3A::from(normal),
            });
        }

        let axis = if t_next[0] < t_next[1] {
            if t_next[0] < t_next[2] {
                0
            } else {
                2
            }
        } else if t_next[1] < t_next[2] {
            1
        } else {
            2
        };
        if step[axis] == 0 {
            // Every remaining axis has a zero direction; the ray can't leave this voxel.
            return None;
        }

        t_cell = t_next[axis];
        voxel[axis] += step[axis];
        if voxel[axis] < 0 || voxel[axis] >= CHUNK_EDGE_LENGTH {
            return None;
        }
        t_next[axis] += t_delta[axis];
        last_axis = axis;
    }

    None
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
