//! Combined-potential kernel of the 3D Helmholtz equation
//!
//! ```text
//! K(x, y) = (d·n (1 − κr) + κ d·d) e^{κr} / (−4π d·d r)
//! ```
//!
//! with `d = y − x` (trial minus test), `n` the trial normal, `r = |d|` and
//! `κ = i·k`. This is the Helmholtz double-layer kernel minus `κ` times the
//! single-layer kernel, evaluated in one expression.
//!
//! The operations run in the order of the formula: `(1 − κr)` is scaled by
//! the real `d·n`, then `κ d·d` is added. Reordering them changes the last
//! bits of the result.

use num_traits::Float;

use crate::core::constants::PI4;
use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::kernels::{KernelFunctor, KernelValues, displacement, dot_normal};
use crate::core::scalar::{ComplexScalar, real_const};

/// Pointwise evaluator of the Helmholtz combined-potential kernel.
///
/// Stores `κ = i·k` only. No guard is applied at `r = 0`; the assembly
/// engine never evaluates coincident points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmholtz3dCombinedPotentialKernelFunctor<V> {
    i_k: V,
}

impl<V: ComplexScalar> Helmholtz3dCombinedPotentialKernelFunctor<V> {
    /// Create the kernel for wave number `k`
    pub fn new(wave_number: V) -> Self {
        Self {
            i_k: V::i() * wave_number,
        }
    }

    /// The stored product `κ = i·k`
    pub fn i_k(&self) -> V {
        self.i_k
    }

    /// The wave number `k = −i·κ`
    pub fn wave_number(&self) -> V {
        -(V::i() * self.i_k)
    }

    /// Kernel value for one (test point, trial point) pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
    ) -> V {
        let (d, dist_sq) = displacement(&test, &trial);
        let n_dot_d = dot_normal(&d, &trial);
        let dist = dist_sq.sqrt();

        let i_k_r = self.i_k.mul_real(dist);
        let numerator = (V::one() - i_k_r).mul_real(n_dot_d) + self.i_k.mul_real(dist_sq);
        let denominator = -real_const::<V::Real>(PI4) * dist_sq * dist;

        (numerator * i_k_r.exp()).div_real(denominator)
    }
}

impl<V: ComplexScalar> KernelFunctor for Helmholtz3dCombinedPotentialKernelFunctor<V> {
    type Coordinate = V::Real;
    type Value = V;

    fn add_geometrical_dependencies(
        &self,
        test_deps: &mut GeometricalDependencies,
        trial_deps: &mut GeometricalDependencies,
    ) {
        *test_deps |= GeometricalDependencies::GLOBALS;
        *trial_deps |= GeometricalDependencies::GLOBALS | GeometricalDependencies::NORMALS;
    }

    fn kernel_count(&self) -> usize {
        1
    }

    fn kernel_row_count(&self, _kernel_index: usize) -> usize {
        1
    }

    fn kernel_col_count(&self, _kernel_index: usize) -> usize {
        1
    }

    #[inline]
    fn evaluate(
        &self,
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
        result: &mut KernelValues<V>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}
