use crate::{
    config::TraversalConfig, coordinates::ChunkBounds, palette::Color,
    traversal::cast_through_chunk, Chunk, Palette8,
};
use crate::core::geometry::{HitRecord, Ray};

/// Everything a ray can hit: one chunk of voxels, the colors its palette indices refer to, and where it sits in the
/// world.
#[derive(Clone, Debug)]
pub struct VoxelScene {
    pub chunk: Chunk,
    pub palette: Palette8<Color>,
    pub bounds: ChunkBounds,
}

impl VoxelScene {
    pub fn new(chunk: Chunk, palette: Palette8<Color>, bounds: ChunkBounds) -> Self {
        Self {
            chunk,
            palette,
            bounds,
        }
    }

    /// Finds the first active voxel along `ray` within `[t_min, t_max]`.
    ///
    /// The hit's color is the palette entry of the voxel; its normal is the axis-aligned normal of the face the ray
    /// entered through.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        config: &TraversalConfig,
    ) -> Option<HitRecord> {
        let hit = cast_through_chunk(
            ray,
            &self.bounds,
            &self.chunk,
            t_min,
            t_max,
            config.max_steps,
            |_, voxel| !voxel.is_active(),
        )?;

        Some(HitRecord {
            position: hit.position,
            t: hit.t,
            normal: hit.normal,
            color: self.palette[hit.voxel.palette_index()],
        })
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::core::approx::assert_relative_eq;
    use crate::core::glam::{IVec3, Vec3A, Vec4};
    use crate::Voxel;

    fn center_voxel_scene() -> VoxelScene {
        let mut chunk = Chunk::default();
        chunk.set_voxel(IVec3::splat(16), Voxel::solid(2)).unwrap();
        let palette = Palette8::from_colors([
            Vec4::ONE,
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        ]);
        VoxelScene::new(chunk, palette, ChunkBounds::default())
    }

    #[test]
    fn hit_center_voxel_head_on() {
        let scene = center_voxel_scene();
        let ray = Ray::new(Vec3A::new(0.03125, 0.03125, 0.0), Vec3A::new(0.0, 0.0, -1.0));

        let hit = scene
            .cast_ray(&ray, 0.0, f32::INFINITY, &TraversalConfig::default())
            .unwrap();
        assert_relative_eq!(hit.t, 1.9375);
        assert_eq!(hit.normal, Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(hit.color, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(hit.position.x, 0.03125);
        assert_relative_eq!(hit.position.z, -1.9375);
    }

    #[test]
    fn miss_beside_voxel() {
        let scene = center_voxel_scene();
        let ray = Ray::new(Vec3A::new(0.5, 0.5, 0.0), Vec3A::new(0.0, 0.0, -1.0));

        assert_eq!(scene.cast_ray(&ray, 0.0, f32::INFINITY, &TraversalConfig::default()), None);
    }

    #[test]
    fn casting_is_idempotent() {
        let scene = center_voxel_scene();
        let ray = Ray::new(Vec3A::new(0.01, 0.02, 0.0), Vec3A::new(0.01, 0.01, -1.0));
        let config = TraversalConfig::default();

        let first = scene.cast_ray(&ray, 0.0, f32::INFINITY, &config);
        let second = scene.cast_ray(&ray, 0.0, f32::INFINITY, &config);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn too_few_steps_is_a_miss() {
        let scene = center_voxel_scene();
        let ray = Ray::new(Vec3A::new(0.03125, 0.03125, 0.0), Vec3A::new(0.0, 0.0, -1.0));

        // The voxel is the 16th one along the ray.
        assert_eq!(
            scene.cast_ray(&ray, 0.0, f32::INFINITY, &TraversalConfig { max_steps: 15 }),
            None
        );
        assert!(scene
            .cast_ray(&ray, 0.0, f32::INFINITY, &TraversalConfig { max_steps: 16 })
            .is_some());
    }
}
