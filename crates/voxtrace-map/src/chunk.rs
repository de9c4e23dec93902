use crate::{ndview::NdView, palette::PaletteId8};
use crate::core::glam::{const_ivec3, const_vec3a, IVec3, Vec3A};
use crate::core::static_assertions::const_assert_eq;

use ndshape::{ConstPow2Shape3i32, ConstShape};
use thiserror::Error;

/// The standard 3D array shape for chunks.
pub type ChunkShape = ConstPow2Shape3i32<5, 5, 5>;
const_assert_eq!(ChunkShape::SIZE, 32 * 32 * 32);
pub const CHUNK_SIZE: usize = ChunkShape::SIZE as usize;
pub const CHUNK_EDGE_LENGTH: i32 = 32;
pub const CHUNK_SHAPE_IVEC3: IVec3 = const_ivec3!([32; 3]);
pub const CHUNK_SHAPE_VEC3A: Vec3A = const_vec3a!([32.0; 3]);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid voxel coords ({0}, {1}, {2}) in chunk")]
pub struct InvalidVoxelCoords(pub i32, pub i32, pub i32);

/// One grid cell: an occupancy flag and the index of its color in a [`Palette8`](crate::Palette8).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Voxel {
    active: bool,
    palette_index: PaletteId8,
}

impl Voxel {
    pub const EMPTY: Self = Self {
        active: false,
        palette_index: 0,
    };

    pub const fn new(active: bool, palette_index: PaletteId8) -> Self {
        Self {
            active,
            palette_index,
        }
    }

    pub const fn solid(palette_index: PaletteId8) -> Self {
        Self::new(true, palette_index)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn palette_index(&self) -> PaletteId8 {
        self.palette_index
    }

    /// `[active, palette_index, 0, 0]`, the layout of an `Rgba8Uint` texel.
    #[inline]
    pub fn texel(&self) -> [u8; 4] {
        [self.active as u8, self.palette_index, 0, 0]
    }
}

/// A cube of [`CHUNK_EDGE_LENGTH`]^3 voxels, linearized by [`ChunkShape`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    voxels: Box<[Voxel]>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            voxels: vec![Voxel::EMPTY; CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

impl Chunk {
    #[inline]
    pub fn contains(p: IVec3) -> bool {
        p.cmpge(IVec3::ZERO).all() && p.cmplt(CHUNK_SHAPE_IVEC3).all()
    }

    pub fn voxel_view(&self) -> NdView<&[Voxel], ChunkShape> {
        NdView::new(&self.voxels[..])
    }

    pub fn voxel_view_mut(&mut self) -> NdView<&mut [Voxel], ChunkShape> {
        NdView::new(&mut self.voxels[..])
    }

    /// Returns `None` when `p` is outside of the chunk.
    #[inline]
    pub fn get(&self, p: IVec3) -> Option<Voxel> {
        Self::contains(p).then(|| self.voxels[ChunkShape::linearize(p.to_array()) as usize])
    }

    pub fn set_voxel(&mut self, p: IVec3, voxel: Voxel) -> Result<(), InvalidVoxelCoords> {
        if !Self::contains(p) {
            return Err(InvalidVoxelCoords(p.x, p.y, p.z));
        }
        self.voxel_view_mut()[p] = voxel;
        Ok(())
    }

    /// Sets every voxel for which `f` returns `Some`.
    pub fn fill_with(&mut self, mut f: impl FnMut(IVec3) -> Option<Voxel>) {
        for (i, voxel) in self.voxels.iter_mut().enumerate() {
            let p = IVec3::from(ChunkShape::delinearize(i as i32));
            if let Some(v) = f(p) {
                *voxel = v;
            }
        }
    }

    pub fn num_active(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_active()).count()
    }

    /// Texels in linear order (x fastest, then y, then z) for uploading as a 3D texture.
    pub fn to_texels(&self) -> Vec<[u8; 4]> {
        self.voxels.iter().map(Voxel::texel).collect()
    }

    pub fn texel_bytes(&self) -> Vec<u8> {
        let texels = self.to_texels();
        bytemuck::cast_slice::<[u8; 4], u8>(&texels).to_vec()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
