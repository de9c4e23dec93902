use crate::core::glam::{const_vec4, Vec4};

use std::ops::{Index, IndexMut};

/// An identifier for one of the values in a given [`Palette8`].
pub type PaletteId8 = u8;

/// Number of entries in every [`Palette8`].
pub const PALETTE_SIZE: usize = 256;

/// Linear RGBA.
pub type Color = Vec4;

pub const OPAQUE_BLACK: Color = const_vec4!([0.0, 0.0, 0.0, 1.0]);

/// A mapping from [`PaletteId8`] to type `T`. Always holds exactly 256 values, so any [`PaletteId8`] is a valid index.
///
/// Use [`Index`] and [`IndexMut`] traits for access.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette8<T> {
    types: Vec<T>,
}

impl<T: Clone> Palette8<T> {
    /// Takes the first 256 `values`, padding with `fill` if there are fewer.
    pub fn new(values: impl IntoIterator<Item = T>, fill: T) -> Self {
        let mut types: Vec<T> = values.into_iter().take(PALETTE_SIZE).collect();
        types.resize(PALETTE_SIZE, fill);
        Self { types }
    }

    pub fn filled(value: T) -> Self {
        Self {
            types: vec![value; PALETTE_SIZE],
        }
    }
}

impl<T> Palette8<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.types.iter()
    }
}

impl Palette8<Color> {
    /// Missing entries are opaque black.
    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        Self::new(colors, OPAQUE_BLACK)
    }

    pub fn from_rgba8(colors: &[[u8; 4]]) -> Self {
        Self::from_colors(colors.iter().map(|&[r, g, b, a]| {
            Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
        }))
    }
}

impl<T> Index<PaletteId8> for Palette8<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: PaletteId8) -> &Self::Output {
        self.types.index(id as usize)
    }
}

impl<T> IndexMut<PaletteId8> for Palette8<T> {
    #[inline]
    fn index_mut(&mut self, id: PaletteId8) -> &mut Self::Output {
        self.types.index_mut(id as usize)
    }
}
