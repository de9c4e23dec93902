//! Procedural demo scenes.

use crate::core::glam::{const_ivec3, IVec3, Vec3A, Vec4};
use crate::core::random::pcg_hash;
use crate::map::{
    Chunk, ChunkBounds, Color, GridUnits, Palette8, Voxel, VoxelScene, CHUNK_EDGE_LENGTH,
};

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DemoScene {
    SingleVoxel,
    Sphere,
    Terrain,
}

const SINGLE_VOXEL_COORDS: IVec3 = const_ivec3!([16; 3]);

impl DemoScene {
    pub fn build(self, bounds: ChunkBounds, seed: u32) -> VoxelScene {
        match self {
            Self::SingleVoxel => {
                single_voxel(bounds, SINGLE_VOXEL_COORDS, Vec4::new(0.9, 0.3, 0.2, 1.0))
            }
            Self::Sphere => sphere(bounds, 12.0),
            Self::Terrain => terrain(bounds, seed),
        }
    }

    /// The world point a camera should look at to frame this scene.
    pub fn focus(self, bounds: ChunkBounds) -> Vec3A {
        match self {
            Self::SingleVoxel => bounds.voxel_center(GridUnits(SINGLE_VOXEL_COORDS)).into_inner(),
            Self::Sphere | Self::Terrain => 0.5 * (bounds.min() + bounds.max()),
        }
    }
}

/// One active voxel at `coords`, palette index 1.
pub fn single_voxel(bounds: ChunkBounds, coords: IVec3, color: Color) -> VoxelScene {
    let mut chunk = Chunk::default();
    if let Err(e) = chunk.set_voxel(coords, Voxel::solid(1)) {
        log::warn!("{}", e);
    }

    VoxelScene::new(chunk, Palette8::from_colors([Vec4::ONE, color]), bounds)
}

/// A ball of `radius` voxels in the middle of the chunk, colored by height.
pub fn sphere(bounds: ChunkBounds, radius: f32) -> VoxelScene {
    let center = Vec3A::splat(0.5 * CHUNK_EDGE_LENGTH as f32);
    let mut chunk = Chunk::default();
    chunk.fill_with(|p| {
        let offset = p.as_vec3a() + Vec3A::splat(0.5) - center;
        (offset.length() <= radius).then(|| Voxel::solid(p.y as u8))
    });

    VoxelScene::new(chunk, gradient_palette(), bounds)
}

/// Rolling hills with grass on top, dirt below and stone at the bottom.
pub fn terrain(bounds: ChunkBounds, seed: u32) -> VoxelScene {
    const GRASS: u8 = 1;
    const DIRT: u8 = 2;
    const STONE: u8 = 3;

    let height_at = |x: i32, z: i32| {
        let waves = 10.0 + 4.0 * (x as f32 * 0.3).sin() + 3.0 * (z as f32 * 0.22).cos();
        let bump = pcg_hash(seed ^ pcg_hash((x as u32) | ((z as u32) << 8))) % 2;
        waves as i32 + bump as i32
    };

    let mut chunk = Chunk::default();
    chunk.fill_with(|p| {
        let height = height_at(p.x, p.z);
        if p.y > height {
            None
        } else if p.y == height {
            Some(Voxel::solid(GRASS))
        } else if p.y + 3 > height {
            Some(Voxel::solid(DIRT))
        } else {
            Some(Voxel::solid(STONE))
        }
    });

    let palette = Palette8::from_rgba8(&[
        [255, 255, 255, 255],
        [77, 179, 51, 255],
        [115, 77, 38, 255],
        [128, 128, 128, 255],
    ]);

    VoxelScene::new(chunk, palette, bounds)
}

/// Smoothly varying colors for every palette index.
pub fn gradient_palette() -> Palette8<Color> {
    Palette8::from_colors((0..=255u8).map(|i| {
        let s = i as f32 / 32.0;
        Vec4::new(
            0.6 + 0.4 * s.sin(),
            0.6 + 0.4 * (s + 2.0).sin(),
            0.6 + 0.4 * (s + 4.0).sin(),
            1.0,
        )
    }))
}
