use crate::config::RenderConfig;
use crate::core::geometry::{HitRecord, Ray};
use crate::core::glam::{const_vec3a, Vec3A, Vec4};
use crate::core::random::random_unit_vector;
use crate::map::{TraversalConfig, VoxelScene};

/// Scattered rays start this far off the surface, along the normal.
pub const SCATTER_EPSILON: f32 = 1e-4;

const SKY_ZENITH: Vec3A = const_vec3a!([0.5, 0.7, 1.0]);

/// The radiance carried back along one pixel's path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub color: Vec4,
    /// The first surface the path hit, if any.
    pub primary_hit: Option<HitRecord>,
}

/// Sky gradient from white at the horizon (and below) up to light blue.
pub fn background(direction: Vec3A) -> Vec3A {
    let unit = direction.normalize_or_zero();
    let a = 0.5 * (unit.y + 1.0);

    Vec3A::ONE.lerp(SKY_ZENITH, a)
}

/// Follows `ray` through up to `config.max_bounce_depth` diffuse bounces.
///
/// A path that escapes the scene picks up the attenuated background color. A path that runs out of bounces, and every
/// path of depth zero, is black. Alpha is always 1.
pub fn trace_path(
    scene: &VoxelScene,
    ray: &Ray,
    seed: &mut u32,
    config: &RenderConfig,
    traversal: &TraversalConfig,
) -> PathSample {
    let mut ray = *ray;
    let mut attenuation = Vec3A::ONE;
    let mut primary_hit = None;

    for bounce in 0..config.max_bounce_depth {
        let hit = match scene.cast_ray(&ray, 0.0, f32::INFINITY, traversal) {
            Some(hit) => hit,
            None => {
                return PathSample {
                    color: opaque(attenuation * background(ray.direction())),
                    primary_hit,
                };
            }
        };
        if bounce == 0 {
            primary_hit = Some(hit);
        }

        let mut direction = hit.normal + random_unit_vector(seed);
        if direction.length_squared() < 1e-8 {
            direction = hit.normal;
        }
        ray = Ray::new(hit.position + SCATTER_EPSILON * hit.normal, direction);

        attenuation *= config.scatter_attenuation;
        if config.tint_with_palette {
            attenuation *= Vec3A::new(hit.color.x, hit.color.y, hit.color.z);
        }
    }

    PathSample {
        color: opaque(Vec3A::ZERO),
        primary_hit,
    }
}

fn opaque(rgb: Vec3A) -> Vec4 {
    Vec4::new(rgb.x, rgb.y, rgb.z, 1.0)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
