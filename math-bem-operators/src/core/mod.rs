//! Kernels, functors and assembly of 3D boundary integral operators
//!
//! ## Architecture
//!
//! - `scalar`: Real and complex value traits shared by kernels and matrices
//! - `constants`: Numerical constants
//! - `grid`: Flat triangle grids and element topology
//! - `geometry`: Geometric data at quadrature points and dependency flags
//! - `space`: Piecewise constant and piecewise linear scalar spaces
//! - `kernels`: Laplace and Helmholtz kernel functors, including the combined potential
//! - `functors`: Basis transformations and integrands
//! - `integration`: Quadrature rules for regular, adjacent and coincident element pairs
//! - `assembly`: Generic Galerkin assembly engine and boundary operator handles
//! - `operators`: Factories wiring kernels and functors into boundary operators
//! - `parallel`: Portable parallel iteration (rayon with `native`, sequential otherwise)
//! - `error`: Error type

pub mod assembly;
pub mod constants;
pub mod error;
pub mod functors;
pub mod geometry;
pub mod grid;
pub mod integration;
pub mod kernels;
pub mod operators;
pub mod parallel;
pub mod scalar;
pub mod space;

// Re-exports for convenience
pub use assembly::{
    AbstractBoundaryOperator, AssemblyOptions, BoundaryOperator, Context,
    DiscreteBoundaryOperator, GeneralElementarySingularIntegralOperator, Symmetry,
};
pub use error::{BemError, Result};
pub use functors::{
    IntegrandFunctor, ScalarFunctionValueFunctor, SimpleTestScalarKernelTrialIntegrandFunctor,
    TransformationFunctor, TransformedValues,
};
pub use geometry::{ConstGeometricalDataSlice, GeometricalData, GeometricalDependencies};
pub use grid::{ElementPairRelation, Grid};
pub use integration::QuadratureOptions;
pub use kernels::*;
pub use operators::*;
pub use scalar::{BemScalar, ComplexScalar, RealScalar};
pub use space::{
    BasisData, ConstBasisDataSlice, PiecewiseConstantScalarSpace,
    PiecewiseLinearContinuousScalarSpace, Space,
};
