//! Scalar function spaces on triangle grids
//!
//! A [`Space`] tells the assembly engine which global degrees of freedom live
//! on each element and how its local basis functions evaluate at quadrature
//! points. Spaces are shared as `Arc<dyn Space<T>>` and never mutated.

use ndarray::{Array2, Array3};
use std::fmt::Debug;
use std::sync::Arc;

use crate::core::grid::Grid;
use crate::core::scalar::RealScalar;

/// Basis function values on one element, indexed (component, function, point).
#[derive(Debug, Clone)]
pub struct BasisData<T> {
    /// Values (component × function × point)
    pub values: Array3<T>,
}

impl<T: RealScalar> BasisData<T> {
    /// Zeroed storage
    pub fn new(component_count: usize, function_count: usize, point_count: usize) -> Self {
        Self {
            values: Array3::zeros((component_count, function_count, point_count)),
        }
    }

    /// Number of components per basis function
    pub fn component_count(&self) -> usize {
        self.values.dim().0
    }

    /// Number of basis functions
    pub fn function_count(&self) -> usize {
        self.values.dim().1
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.values.dim().2
    }

    /// View onto one basis function at one point
    #[inline]
    pub fn slice(&self, function: usize, point: usize) -> ConstBasisDataSlice<'_, T> {
        ConstBasisDataSlice {
            data: self,
            function,
            point,
        }
    }
}

/// Read-only view onto one basis function at one point.
#[derive(Debug, Clone, Copy)]
pub struct ConstBasisDataSlice<'a, T> {
    data: &'a BasisData<T>,
    function: usize,
    point: usize,
}

impl<T: RealScalar> ConstBasisDataSlice<'_, T> {
    /// Component `component` of the basis function value
    #[inline]
    pub fn value(&self, component: usize) -> T {
        self.data.values[[component, self.function, self.point]]
    }

    /// Number of components
    pub fn component_count(&self) -> usize {
        self.data.component_count()
    }
}

/// A discrete function space on a grid.
pub trait Space<T: RealScalar>: Send + Sync + Debug {
    /// Grid the space is defined on
    fn grid(&self) -> &Arc<Grid<T>>;

    /// Number of components of each basis function
    fn codomain_dimension(&self) -> usize;

    /// Total number of degrees of freedom
    fn global_dof_count(&self) -> usize;

    /// Number of basis functions supported on `element`
    fn local_dof_count(&self, element: usize) -> usize;

    /// Global DOF index of each local basis function on `element`
    fn global_dofs(&self, element: usize) -> Vec<usize>;

    /// Evaluate the local basis of `element` at local points (2 × n)
    fn evaluate_basis(&self, element: usize, local_points: &Array2<T>) -> BasisData<T>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Piecewise constant scalar functions: one DOF per element.
#[derive(Debug, Clone)]
pub struct PiecewiseConstantScalarSpace<T> {
    grid: Arc<Grid<T>>,
}

impl<T: RealScalar> PiecewiseConstantScalarSpace<T> {
    /// Create the space on a grid
    pub fn new(grid: Arc<Grid<T>>) -> Self {
        Self { grid }
    }
}

impl<T: RealScalar> Space<T> for PiecewiseConstantScalarSpace<T> {
    fn grid(&self) -> &Arc<Grid<T>> {
        &self.grid
    }

    fn codomain_dimension(&self) -> usize {
        1
    }

    fn global_dof_count(&self) -> usize {
        self.grid.element_count()
    }

    fn local_dof_count(&self, _element: usize) -> usize {
        1
    }

    fn global_dofs(&self, element: usize) -> Vec<usize> {
        vec![element]
    }

    fn evaluate_basis(&self, _element: usize, local_points: &Array2<T>) -> BasisData<T> {
        let mut data = BasisData::new(1, 1, local_points.ncols());
        data.values.fill(T::one());
        data
    }

    fn name(&self) -> &'static str {
        "P0"
    }
}

/// Continuous piecewise linear scalar functions: one DOF per vertex.
#[derive(Debug, Clone)]
pub struct PiecewiseLinearContinuousScalarSpace<T> {
    grid: Arc<Grid<T>>,
}

impl<T: RealScalar> PiecewiseLinearContinuousScalarSpace<T> {
    /// Create the space on a grid
    pub fn new(grid: Arc<Grid<T>>) -> Self {
        Self { grid }
    }
}

impl<T: RealScalar> Space<T> for PiecewiseLinearContinuousScalarSpace<T> {
    fn grid(&self) -> &Arc<Grid<T>> {
        &self.grid
    }

    fn codomain_dimension(&self) -> usize {
        1
    }

    fn global_dof_count(&self) -> usize {
        self.grid.vertex_count()
    }

    fn local_dof_count(&self, _element: usize) -> usize {
        3
    }

    fn global_dofs(&self, element: usize) -> Vec<usize> {
        self.grid.element_vertices(element).to_vec()
    }

    fn evaluate_basis(&self, _element: usize, local_points: &Array2<T>) -> BasisData<T> {
        let n = local_points.ncols();
        let mut data = BasisData::new(1, 3, n);
        for p in 0..n {
            let s = local_points[[0, p]];
            let t = local_points[[1, p]];
            data.values[[0, 0, p]] = T::one() - s - t;
            data.values[[0, 1, p]] = s;
            data.values[[0, 2, p]] = t;
        }
        data
    }

    fn name(&self) -> &'static str {
        "P1"
    }
}
