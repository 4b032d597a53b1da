//! Basis transformations and integrands
//!
//! Together with a [`KernelFunctor`](crate::core::kernels::KernelFunctor),
//! a test and a trial [`TransformationFunctor`] and an [`IntegrandFunctor`]
//! fully describe the local integrand of a boundary operator:
//!
//! ```text
//! ∫∫ I(T_test(φ_i)(x), K(x, y), T_trial(ψ_j)(y)) dy dx
//! ```

pub mod integrand;
pub mod transform;

use ndarray::Array1;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::kernels::KernelValues;
use crate::core::scalar::{BemScalar, RealScalar};
use crate::core::space::ConstBasisDataSlice;

pub use integrand::SimpleTestScalarKernelTrialIntegrandFunctor;
pub use transform::ScalarFunctionValueFunctor;

/// Transformed basis values, one 1D array per transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedValues<T> {
    values: Vec<Array1<T>>,
}

impl<T: RealScalar> TransformedValues<T> {
    /// Zeroed storage for transformations with the given result dimensions
    pub fn for_dimensions(dims: &[usize]) -> Self {
        Self {
            values: dims.iter().map(|&n| Array1::zeros(n)).collect(),
        }
    }

    /// Storage matching the result dimensions of `functor`
    pub fn for_functor<F: TransformationFunctor<Coordinate = T>>(functor: &F) -> Self {
        let dims: Vec<usize> = (0..functor.transformation_count())
            .map(|i| functor.result_dimension(i))
            .collect();
        Self::for_dimensions(&dims)
    }

    /// Number of transformations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no transformation is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Index<usize> for TransformedValues<T> {
    type Output = Array1<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<T> IndexMut<usize> for TransformedValues<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

/// Maps basis function values (and geometry) to the quantities an integrand consumes.
pub trait TransformationFunctor: Copy + Send + Sync + Debug {
    /// Coordinate and basis value type
    type Coordinate: RealScalar;

    /// Add the geometric attributes the transformation reads
    fn add_geometrical_dependencies(&self, deps: &mut GeometricalDependencies);

    /// Number of transformations produced
    fn transformation_count(&self) -> usize;

    /// Number of components of the basis functions this transformation accepts
    fn argument_dimension(&self) -> usize;

    /// Number of components of transformation `index`
    fn result_dimension(&self, index: usize) -> usize;

    /// Transform one basis function at one point
    fn evaluate(
        &self,
        basis: ConstBasisDataSlice<'_, Self::Coordinate>,
        geometry: ConstGeometricalDataSlice<'_, Self::Coordinate>,
        result: &mut TransformedValues<Self::Coordinate>,
    );
}

/// Combines transformed test values, kernel values and transformed trial values.
pub trait IntegrandFunctor: Copy + Send + Sync + Debug {
    /// Coordinate and transformed value type
    type Coordinate: RealScalar;
    /// Kernel value type
    type Kernel: BemScalar<Real = Self::Coordinate>;
    /// Integrand value type
    type Result: BemScalar<Real = Self::Coordinate>;

    /// Add the geometric attributes the integrand reads itself
    fn add_geometrical_dependencies(
        &self,
        _test_deps: &mut GeometricalDependencies,
        _trial_deps: &mut GeometricalDependencies,
    ) {
    }

    /// Integrand value at one (test point, trial point) pair
    fn evaluate(
        &self,
        test_geometry: ConstGeometricalDataSlice<'_, Self::Coordinate>,
        trial_geometry: ConstGeometricalDataSlice<'_, Self::Coordinate>,
        test_values: &TransformedValues<Self::Coordinate>,
        kernel_values: &KernelValues<Self::Kernel>,
        trial_values: &TransformedValues<Self::Coordinate>,
    ) -> Self::Result;
}
