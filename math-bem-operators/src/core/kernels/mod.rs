//! Kernel functors for 3D Laplace and Helmholtz boundary integral operators
//!
//! A kernel functor is a small `Copy` value that
//! - declares which geometric attributes it reads on the test and trial side,
//! - reports the shape of the kernel values it produces,
//! - evaluates those values for one (test point, trial point) pair.
//!
//! The assembly engine is generic over [`KernelFunctor`], so evaluation is
//! monomorphised into the quadrature loop.
//!
//! ## Sign convention
//!
//! With `d = trial − test` and `r = |d|`, the double-layer kernels are the
//! normal derivative of the Green's function with respect to the trial point:
//!
//! - Laplace: `−d·n / (4π r³)`
//! - Helmholtz (`κ = i·k`): `d·n (1 − κr) e^{κr} / (−4π r³)`
//!
//! so that the combined-potential kernel equals `double_layer − κ·single_layer`
//! and reduces to the Laplace double layer as `k → 0`.

pub mod helmholtz;
pub mod helmholtz_combined;
pub mod laplace;

use ndarray::Array2;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::scalar::{BemScalar, RealScalar};

pub use helmholtz::{
    Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor, Helmholtz3dDoubleLayerPotentialKernelFunctor,
    Helmholtz3dSingleLayerPotentialKernelFunctor,
};
pub use helmholtz_combined::Helmholtz3dCombinedPotentialKernelFunctor;
pub use laplace::{
    Laplace3dAdjointDoubleLayerPotentialKernelFunctor, Laplace3dDoubleLayerPotentialKernelFunctor,
    Laplace3dSingleLayerPotentialKernelFunctor,
};

/// Number and dimensions of the kernel values a functor produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelShape {
    dims: Vec<(usize, usize)>,
}

impl KernelShape {
    /// Shape from explicit (rows, cols) per kernel
    pub fn new(dims: Vec<(usize, usize)>) -> Self {
        Self { dims }
    }

    /// A single 1 × 1 kernel
    pub fn scalar() -> Self {
        Self { dims: vec![(1, 1)] }
    }

    /// Number of kernels
    pub fn kernel_count(&self) -> usize {
        self.dims.len()
    }

    /// Rows of kernel `index`
    pub fn row_count(&self, index: usize) -> usize {
        self.dims[index].0
    }

    /// Columns of kernel `index`
    pub fn col_count(&self, index: usize) -> usize {
        self.dims[index].1
    }
}

/// Collection of 2D kernel value arrays, one per kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelValues<V> {
    values: Vec<Array2<V>>,
}

impl<V: BemScalar> KernelValues<V> {
    /// Zeroed storage matching `shape`
    pub fn for_shape(shape: &KernelShape) -> Self {
        let values = shape
            .dims
            .iter()
            .map(|&(rows, cols)| Array2::zeros((rows, cols)))
            .collect();
        Self { values }
    }

    /// Number of kernels
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no kernel is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> Index<usize> for KernelValues<V> {
    type Output = Array2<V>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<V> IndexMut<usize> for KernelValues<V> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

/// Pointwise kernel evaluation contract.
///
/// `evaluate` must write every entry of every kernel in `result` and may only
/// read the geometric attributes declared by `add_geometrical_dependencies`.
pub trait KernelFunctor: Copy + Send + Sync + Debug {
    /// Coordinate type of the geometry
    type Coordinate: RealScalar;
    /// Value type of the kernel
    type Value: BemScalar<Real = Self::Coordinate>;

    /// Add the attributes this kernel reads to the test and trial dependency sets
    fn add_geometrical_dependencies(
        &self,
        test_deps: &mut GeometricalDependencies,
        trial_deps: &mut GeometricalDependencies,
    );

    /// Number of kernels produced per evaluation
    fn kernel_count(&self) -> usize;

    /// Rows of kernel `kernel_index`
    fn kernel_row_count(&self, kernel_index: usize) -> usize;

    /// Columns of kernel `kernel_index`
    fn kernel_col_count(&self, kernel_index: usize) -> usize;

    /// Evaluate the kernels for one (test point, trial point) pair
    fn evaluate(
        &self,
        test: ConstGeometricalDataSlice<'_, Self::Coordinate>,
        trial: ConstGeometricalDataSlice<'_, Self::Coordinate>,
        result: &mut KernelValues<Self::Value>,
    );

    /// Dependency sets starting from empty ones: (test, trial)
    fn geometrical_dependencies(&self) -> (GeometricalDependencies, GeometricalDependencies) {
        let mut test = GeometricalDependencies::empty();
        let mut trial = GeometricalDependencies::empty();
        self.add_geometrical_dependencies(&mut test, &mut trial);
        (test, trial)
    }

    /// Shape of the kernel values
    fn shape(&self) -> KernelShape {
        KernelShape::new(
            (0..self.kernel_count())
                .map(|i| (self.kernel_row_count(i), self.kernel_col_count(i)))
                .collect(),
        )
    }
}

/// Differences `d = trial − test` summed in x, y, z order: returns (d, d·d)
#[inline]
pub(crate) fn displacement<T: RealScalar>(
    test: &ConstGeometricalDataSlice<'_, T>,
    trial: &ConstGeometricalDataSlice<'_, T>,
) -> ([T; 3], T) {
    let mut d = [T::zero(); 3];
    let mut dist_sq = T::zero();
    for (dim, dd) in d.iter_mut().enumerate() {
        *dd = trial.global(dim) - test.global(dim);
        dist_sq += *dd * *dd;
    }
    (d, dist_sq)
}

/// `d·n` for the normal of `point`, summed in x, y, z order
#[inline]
pub(crate) fn dot_normal<T: RealScalar>(d: &[T; 3], point: &ConstGeometricalDataSlice<'_, T>) -> T {
    let mut acc = T::zero();
    for (dim, &dd) in d.iter().enumerate() {
        acc += dd * point.normal(dim);
    }
    acc
}
