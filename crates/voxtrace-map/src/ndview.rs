use crate::core::glam::IVec3;

use ndshape::ConstShape;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// A 3-dimensional view over linear storage. Use [`Index`] and [`IndexMut`] to access values with `[i32; 3]` or
/// [`IVec3`] coordinates.
pub struct NdView<Data, S> {
    pub values: Data,
    shape: PhantomData<S>,
}

impl<Data, S> NdView<Data, S> {
    #[inline]
    pub fn new(values: Data) -> Self {
        Self {
            values,
            shape: PhantomData,
        }
    }
}

impl<T, Data, S> Index<[i32; 3]> for NdView<Data, S>
where
    Data: Deref<Target = [T]>,
    S: ConstShape<i32, 3>,
{
    type Output = T;

    #[inline]
    fn index(&self, index: [i32; 3]) -> &Self::Output {
        &self.values[S::linearize(index) as usize]
    }
}

impl<T, Data, S> IndexMut<[i32; 3]> for NdView<Data, S>
where
    Data: DerefMut<Target = [T]>,
    S: ConstShape<i32, 3>,
{
    #[inline]
    fn index_mut(&mut self, index: [i32; 3]) -> &mut Self::Output {
        &mut self.values[S::linearize(index) as usize]
    }
}

impl<T, Data, S> Index<IVec3> for NdView<Data, S>
where
    Data: Deref<Target = [T]>,
    S: ConstShape<i32, 3>,
{
    type Output = T;

    #[inline]
    fn index(&self, index: IVec3) -> &Self::Output {
        &self[index.to_array()]
    }
}

impl<T, Data, S> IndexMut<IVec3> for NdView<Data, S>
where
    Data: DerefMut<Target = [T]>,
    S: ConstShape<i32, 3>,
{
    #[inline]
    fn index_mut(&mut self, index: IVec3) -> &mut Self::Output {
        &mut self[index.to_array()]
    }
}
