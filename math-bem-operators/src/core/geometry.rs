//! Geometric data at quadrature points
//!
//! The assembly engine evaluates geometry for a batch of points on one
//! element and hands kernels one point at a time through
//! [`ConstGeometricalDataSlice`]. Only the attributes declared through
//! [`GeometricalDependencies`] are computed.

use bitflags::bitflags;
use ndarray::{Array1, Array2};

use crate::core::constants::NDIM;
use crate::core::scalar::RealScalar;

bitflags! {
    /// Geometric attributes a functor needs at each quadrature point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeometricalDependencies: u32 {
        /// Global (physical) coordinates
        const GLOBALS = 0b0001;
        /// Outward unit normals
        const NORMALS = 0b0010;
        /// Surface integration element |∂x/∂s × ∂x/∂t|
        const INTEGRATION_ELEMENTS = 0b0100;
    }
}

/// Geometry for a batch of points on one element.
///
/// Arrays for attributes that were not requested are empty; reading them
/// through a slice panics.
#[derive(Debug, Clone)]
pub struct GeometricalData<T> {
    /// Global coordinates (3 × n)
    pub globals: Array2<T>,
    /// Unit normals (3 × n)
    pub normals: Array2<T>,
    /// Integration elements (n)
    pub integration_elements: Array1<T>,
    point_count: usize,
    deps: GeometricalDependencies,
}

impl<T: RealScalar> GeometricalData<T> {
    /// Allocate zeroed storage for `point_count` points and the requested attributes
    pub fn new(point_count: usize, deps: GeometricalDependencies) -> Self {
        let columns = |flag| {
            if deps.contains(flag) {
                point_count
            } else {
                0
            }
        };

        Self {
            globals: Array2::zeros((NDIM, columns(GeometricalDependencies::GLOBALS))),
            normals: Array2::zeros((NDIM, columns(GeometricalDependencies::NORMALS))),
            integration_elements: Array1::zeros(columns(
                GeometricalDependencies::INTEGRATION_ELEMENTS,
            )),
            point_count,
            deps,
        }
    }

    /// Build geometry directly from point coordinates and optional normals
    ///
    /// Integration elements are set to one.
    pub fn from_points(globals: &[[T; 3]], normals: Option<&[[T; 3]]>) -> Self {
        let n = globals.len();
        let mut deps = GeometricalDependencies::GLOBALS | GeometricalDependencies::INTEGRATION_ELEMENTS;
        if normals.is_some() {
            deps |= GeometricalDependencies::NORMALS;
        }

        let mut data = Self::new(n, deps);
        for (p, x) in globals.iter().enumerate() {
            for dim in 0..NDIM {
                data.globals[[dim, p]] = x[dim];
            }
        }
        if let Some(normals) = normals {
            for (p, nrm) in normals.iter().enumerate().take(n) {
                for dim in 0..NDIM {
                    data.normals[[dim, p]] = nrm[dim];
                }
            }
        }
        data.integration_elements.fill(T::one());
        data
    }

    /// Number of points
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Attributes requested at construction
    pub fn dependencies(&self) -> GeometricalDependencies {
        self.deps
    }

    /// View onto one point
    #[inline]
    pub fn slice(&self, point: usize) -> ConstGeometricalDataSlice<'_, T> {
        ConstGeometricalDataSlice { data: self, point }
    }
}

/// Read-only view onto the geometry of a single quadrature point.
#[derive(Debug, Clone, Copy)]
pub struct ConstGeometricalDataSlice<'a, T> {
    data: &'a GeometricalData<T>,
    point: usize,
}

impl<T: RealScalar> ConstGeometricalDataSlice<'_, T> {
    /// Global coordinate `dim` (0, 1 or 2)
    ///
    /// # Panics
    /// If globals were not declared as a dependency.
    #[inline]
    pub fn global(&self, dim: usize) -> T {
        self.data.globals[[dim, self.point]]
    }

    /// Normal component `dim` (0, 1 or 2)
    ///
    /// # Panics
    /// If normals were not declared as a dependency.
    #[inline]
    pub fn normal(&self, dim: usize) -> T {
        self.data.normals[[dim, self.point]]
    }

    /// Integration element
    ///
    /// # Panics
    /// If integration elements were not declared as a dependency.
    #[inline]
    pub fn integration_element(&self) -> T {
        self.data.integration_elements[self.point]
    }

    /// Index of the point in its batch
    pub fn point_index(&self) -> usize {
        self.point
    }
}
