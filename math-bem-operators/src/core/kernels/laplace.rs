//! Laplace 3D kernels
//!
//! Static Green's function `G = 1/(4πr)` and its normal derivatives.

use std::marker::PhantomData;

use crate::core::constants::PI4;
use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::kernels::{KernelFunctor, KernelValues, displacement, dot_normal};
use crate::core::scalar::{BemScalar, RealScalar, real_const};

/// Implements the 1 × 1 shape shared by all scalar kernels in this module
macro_rules! scalar_kernel_shape {
    () => {
        fn kernel_count(&self) -> usize {
            1
        }

        fn kernel_row_count(&self, _kernel_index: usize) -> usize {
            1
        }

        fn kernel_col_count(&self, _kernel_index: usize) -> usize {
            1
        }
    };
}

pub(crate) use scalar_kernel_shape;

/// Single-layer kernel `1 / (4π r)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Laplace3dSingleLayerPotentialKernelFunctor<T> {
    _marker: PhantomData<T>,
}

impl<T: RealScalar> Laplace3dSingleLayerPotentialKernelFunctor<T> {
    /// Create the kernel
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
    ) -> T {
        let (_, dist_sq) = displacement(&test, &trial);
        T::one() / (real_const::<T>(PI4) * dist_sq.sqrt())
    }
}

impl<T: RealScalar + BemScalar<Real = T>> KernelFunctor for Laplace3dSingleLayerPotentialKernelFunctor<T> {
    type Coordinate = T;
    type Value = T;

    fn add_geometrical_dependencies(
        &self,
        test_deps: &mut GeometricalDependencies,
        trial_deps: &mut GeometricalDependencies,
    ) {
        *test_deps |= GeometricalDependencies::GLOBALS;
        *trial_deps |= GeometricalDependencies::GLOBALS;
    }

    scalar_kernel_shape!();

    #[inline]
    fn evaluate(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
        result: &mut KernelValues<T>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}

/// Double-layer kernel `−d·n_y / (4π r³)`, trial normal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Laplace3dDoubleLayerPotentialKernelFunctor<T> {
    _marker: PhantomData<T>,
}

impl<T: RealScalar> Laplace3dDoubleLayerPotentialKernelFunctor<T> {
    /// Create the kernel
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
    ) -> T {
        let (d, dist_sq) = displacement(&test, &trial);
        let n_dot_d = dot_normal(&d, &trial);
        -n_dot_d / (real_const::<T>(PI4) * dist_sq * dist_sq.sqrt())
    }
}

impl<T: RealScalar + BemScalar<Real = T>> KernelFunctor for Laplace3dDoubleLayerPotentialKernelFunctor<T> {
    type Coordinate = T;
    type Value = T;

    fn add_geometrical_dependencies(
        &self,
        test_deps: &mut GeometricalDependencies,
        trial_deps: &mut GeometricalDependencies,
    ) {
        *test_deps |= GeometricalDependencies::GLOBALS;
        *trial_deps |= GeometricalDependencies::GLOBALS | GeometricalDependencies::NORMALS;
    }

    scalar_kernel_shape!();

    #[inline]
    fn evaluate(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
        result: &mut KernelValues<T>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}

/// Adjoint double-layer kernel `d·n_x / (4π r³)`, test normal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Laplace3dAdjointDoubleLayerPotentialKernelFunctor<T> {
    _marker: PhantomData<T>,
}

impl<T: RealScalar> Laplace3dAdjointDoubleLayerPotentialKernelFunctor<T> {
    /// Create the kernel
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
    ) -> T {
        let (d, dist_sq) = displacement(&test, &trial);
        let n_dot_d = dot_normal(&d, &test);
        n_dot_d / (real_const::<T>(PI4) * dist_sq * dist_sq.sqrt())
    }
}

impl<T: RealScalar + BemScalar<Real = T>> KernelFunctor
    for Laplace3dAdjointDoubleLayerPotentialKernelFunctor<T>
{
    type Coordinate = T;
    type Value = T;

    fn add_geometrical_dependencies(
        &self,
        test_deps: &mut GeometricalDependencies,
        trial_deps: &mut GeometricalDependencies,
    ) {
        *test_deps |= GeometricalDependencies::GLOBALS | GeometricalDependencies::NORMALS;
        *trial_deps |= GeometricalDependencies::GLOBALS;
    }

    scalar_kernel_shape!();

    #[inline]
    fn evaluate(
        &self,
        test: ConstGeometricalDataSlice<'_, T>,
        trial: ConstGeometricalDataSlice<'_, T>,
        result: &mut KernelValues<T>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}
