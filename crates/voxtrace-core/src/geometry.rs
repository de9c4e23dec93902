use crate::glam::{Vec3A, Vec4};
use crate::ilattice::prelude::Extent;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3A,
    direction: Vec3A,
    inverse_direction: Vec3A,
}

impl Ray {
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self {
            origin,
            direction,
            inverse_direction: 1.0 / direction,
        }
    }

    pub fn direction(&self) -> Vec3A {
        self.direction
    }

    /// Components are `±inf` where the direction is zero.
    pub fn inverse_direction(&self) -> Vec3A {
        self.inverse_direction
    }

    pub fn position_at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// If the ray crosses box `aabb` at some time in `[t_min, t_max]`, returns the entrance and exit times of the ray.
    ///
    /// Implemented as the "slab method". An axis where the direction is zero (or too small to invert) never divides; the
    /// slab is either unbounded (origin inside it, boundaries inclusive) or the whole test misses. This keeps NaNs out of the
    /// comparisons.
    pub fn cast_at_extent(
        &self,
        aabb: Extent<Vec3A>,
        t_min: f32,
        t_max: f32,
    ) -> Option<TimeWindow> {
        let start = aabb.minimum.to_array();
        let end = aabb.least_upper_bound().to_array();
        let origin = self.origin.to_array();
        let direction = self.direction.to_array();
        let inverse_direction = self.inverse_direction.to_array();

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut entry_axis = 0;
        for axis in 0..3 {
            // Zero and subnormal components both have a non-finite inverse.
            let (axis_near, axis_far) = if !inverse_direction[axis].is_finite() {
                if origin[axis] < start[axis] || origin[axis] > end[axis] {
                    return None;
                }
                (f32::NEG_INFINITY, f32::INFINITY)
            } else {
                let t1 = (start[axis] - origin[axis]) * inverse_direction[axis];
                let t2 = (end[axis] - origin[axis]) * inverse_direction[axis];
                (t1.min(t2), t1.max(t2))
            };
            if axis_near > t_near {
                t_near = axis_near;
                entry_axis = axis;
            }
            t_far = t_far.min(axis_far);
        }

        (t_near <= t_far && t_far >= t_min && t_near <= t_max).then(|| TimeWindow {
            t_near,
            t_far,
            entry_axis,
        })
    }

    /// Coarse intersection with box `aabb`. The normal points from the box center to the hit position.
    pub fn hit_extent(&self, aabb: Extent<Vec3A>, t_min: f32, t_max: f32) -> Option<HitRecord> {
        let window = self.cast_at_extent(aabb, t_min, t_max)?;
        let t = window.entry_time(t_min);
        let position = self.position_at(t);
        let center = aabb.minimum + 0.5 * aabb.shape;

        Some(HitRecord {
            position,
            t,
            normal: (position - center).normalize_or_zero(),
            color: Vec4::ZERO,
        })
    }
}

/// The interval of ray times spent inside a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    pub t_near: f32,
    pub t_far: f32,
    /// The axis whose slab was entered last, i.e. the face the ray came through.
    pub entry_axis: usize,
}

impl TimeWindow {
    /// The time the ray is first inside the box, never earlier than `t_min`.
    pub fn entry_time(&self, t_min: f32) -> f32 {
        self.t_near.max(t_min)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    pub position: Vec3A,
    /// Ray parameter of the hit.
    pub t: f32,
    pub normal: Vec3A,
    pub color: Vec4,
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
