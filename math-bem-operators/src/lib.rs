//! # BEM operators: kernels and boundary operators for 3D Laplace/Helmholtz problems
//!
//! Kernel functors, basis transformations and integrands that plug into a
//! generic Galerkin assembly engine for singular boundary integral operators.
//!
//! ## Features
//!
//! - Combined-potential Helmholtz kernel (double layer − i·k single layer) in one closed form
//! - Laplace and Helmholtz single-layer, double-layer and adjoint double-layer kernels
//! - Composable kernel / transformation / integrand functors, monomorphised in the assembly loop
//! - Piecewise constant and piecewise linear scalar spaces on flat triangle grids
//! - Parallel assembly with Rayon (`native` feature)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use math_audio_bem_operators::core::{
//!     Context, Grid, PiecewiseConstantScalarSpace, Space, helmholtz_3d_combined_boundary_operator,
//! };
//! use ndarray::array;
//! use num_complex::Complex64;
//!
//! let vertices = array![
//!     [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0],
//!     [0.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
//! ];
//! let elements = vec![
//!     [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
//!     [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
//! ];
//! let grid = Arc::new(Grid::new(vertices, elements).unwrap());
//! let space: Arc<dyn Space<f64>> = Arc::new(PiecewiseConstantScalarSpace::new(grid));
//!
//! let context = Arc::new(Context::default());
//! let op = helmholtz_3d_combined_boundary_operator(
//!     &context, &space, &space, &space, Complex64::new(1.0, 0.0), Some("combined"),
//! )
//! .unwrap();
//! let weak_form = op.weak_form().unwrap();
//! assert_eq!(weak_form.rows(), 8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)] // Scientific code often has many parameters

pub mod core;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
