//! Numerical constants shared by kernels and quadrature

use std::f64::consts::PI;

/// 4π
pub const PI4: f64 = 4.0 * PI;

/// Number of spatial dimensions
pub const NDIM: usize = 3;

/// Number of vertices of a flat triangle element
pub const NVERT: usize = 3;

/// Small epsilon for geometric comparisons (degenerate elements)
pub const EPSY: f64 = 1.0e-14;
