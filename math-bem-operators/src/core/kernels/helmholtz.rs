//! Helmholtz 3D kernels
//!
//! Green's function `G = e^{κr} / (4πr)` with `κ = i·k` and its normal
//! derivatives. Each functor stores `κ` only.

use num_traits::Float;

use crate::core::constants::PI4;
use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::kernels::laplace::scalar_kernel_shape;
use crate::core::kernels::{KernelFunctor, KernelValues, displacement, dot_normal};
use crate::core::scalar::{ComplexScalar, real_const};

/// Single-layer kernel `e^{κr} / (4π r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmholtz3dSingleLayerPotentialKernelFunctor<V> {
    i_k: V,
}

impl<V: ComplexScalar> Helmholtz3dSingleLayerPotentialKernelFunctor<V> {
    /// Create the kernel for wave number `k`
    pub fn new(wave_number: V) -> Self {
        Self {
            i_k: V::i() * wave_number,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
    ) -> V {
        let (_, dist_sq) = displacement(&test, &trial);
        let dist = dist_sq.sqrt();
        self.i_k
            .mul_real(dist)
            .exp()
            .div_real(real_const::<V::Real>(PI4) * dist)
    }
}

impl<V: ComplexScalar> KernelFunctor for Helmholtz3dSingleLayerPotentialKernelFunctor<V> {
    type Coordinate = V::Real;
    type Value = V;

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
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
        result: &mut KernelValues<V>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}

/// Double-layer kernel `d·n_y (1 − κr) e^{κr} / (−4π r³)`, trial normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmholtz3dDoubleLayerPotentialKernelFunctor<V> {
    i_k: V,
}

impl<V: ComplexScalar> Helmholtz3dDoubleLayerPotentialKernelFunctor<V> {
    /// Create the kernel for wave number `k`
    pub fn new(wave_number: V) -> Self {
        Self {
            i_k: V::i() * wave_number,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
    ) -> V {
        let (d, dist_sq) = displacement(&test, &trial);
        let n_dot_d = dot_normal(&d, &trial);
        normal_derivative(self.i_k, n_dot_d, dist_sq).div_real(-real_const::<V::Real>(PI4))
    }
}

impl<V: ComplexScalar> KernelFunctor for Helmholtz3dDoubleLayerPotentialKernelFunctor<V> {
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

    scalar_kernel_shape!();

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

/// Adjoint double-layer kernel `d·n_x (1 − κr) e^{κr} / (4π r³)`, test normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor<V> {
    i_k: V,
}

impl<V: ComplexScalar> Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor<V> {
    /// Create the kernel for wave number `k`
    pub fn new(wave_number: V) -> Self {
        Self {
            i_k: V::i() * wave_number,
        }
    }

    /// Kernel value for one point pair
    #[inline]
    pub fn value(
        &self,
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
    ) -> V {
        let (d, dist_sq) = displacement(&test, &trial);
        let n_dot_d = dot_normal(&d, &test);
        normal_derivative(self.i_k, n_dot_d, dist_sq).div_real(real_const::<V::Real>(PI4))
    }
}

impl<V: ComplexScalar> KernelFunctor for Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor<V> {
    type Coordinate = V::Real;
    type Value = V;

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
        test: ConstGeometricalDataSlice<'_, V::Real>,
        trial: ConstGeometricalDataSlice<'_, V::Real>,
        result: &mut KernelValues<V>,
    ) {
        result[0][[0, 0]] = self.value(test, trial);
    }
}

/// `d·n (1 − κr) e^{κr} / r³`
#[inline]
fn normal_derivative<V: ComplexScalar>(i_k: V, n_dot_d: V::Real, dist_sq: V::Real) -> V {
    let dist = dist_sq.sqrt();
    let i_k_r = i_k.mul_real(dist);
    ((V::one() - i_k_r) * i_k_r.exp()).mul_real(n_dot_d / (dist_sq * dist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::GeometricalData;
    use crate::core::kernels::laplace::{
        Laplace3dAdjointDoubleLayerPotentialKernelFunctor, Laplace3dSingleLayerPotentialKernelFunctor,
    };
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    #[test]
    fn test_single_layer_matches_greens_function() {
        let k = 2.0;
        let kernel = Helmholtz3dSingleLayerPotentialKernelFunctor::new(Complex64::new(k, 0.0));
        let x = GeometricalData::from_points(&[[0.0, 0.0, 0.0]], None);
        let y = GeometricalData::from_points(&[[0.0, 0.0, 1.5]], None);

        let value = kernel.value(x.slice(0), y.slice(0));
        let expected = Complex64::new(0.0, k * 1.5).exp() / (4.0 * PI * 1.5);
        assert_relative_eq!(value.re, expected.re, epsilon = 1e-14);
        assert_relative_eq!(value.im, expected.im, epsilon = 1e-14);
        assert_relative_eq!(value.norm(), 1.0 / (6.0 * PI), epsilon = 1e-14);
    }

    #[test]
    fn test_low_frequency_limits() {
        let k = Complex64::new(1e-7, 0.0);
        let x = GeometricalData::from_points(&[[0.1, 0.0, 0.0]], Some(&[[0.0, 0.8, 0.6]]));
        let y = GeometricalData::from_points(&[[0.4, 1.2, -0.3]], Some(&[[1.0, 0.0, 0.0]]));

        let sl = Helmholtz3dSingleLayerPotentialKernelFunctor::new(k).value(x.slice(0), y.slice(0));
        let laplace_sl = Laplace3dSingleLayerPotentialKernelFunctor::<f64>::new().value(x.slice(0), y.slice(0));
        assert_relative_eq!(sl.re, laplace_sl, max_relative = 1e-6);

        let adl = Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor::new(k).value(x.slice(0), y.slice(0));
        let laplace_adl =
            Laplace3dAdjointDoubleLayerPotentialKernelFunctor::<f64>::new().value(x.slice(0), y.slice(0));
        assert_relative_eq!(adl.re, laplace_adl, max_relative = 1e-6);
    }

    #[test]
    fn test_double_layer_is_swapped_adjoint() {
        let k = Complex64::new(3.0, 0.2);
        let dl = Helmholtz3dDoubleLayerPotentialKernelFunctor::new(k);
        let adl = Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor::new(k);
        let x = GeometricalData::from_points(&[[0.0, 0.0, 0.0]], Some(&[[0.0, 0.0, 1.0]]));
        let y = GeometricalData::from_points(&[[0.5, -0.2, 0.9]], Some(&[[0.0, 1.0, 0.0]]));

        let a = dl.value(x.slice(0), y.slice(0));
        let b = adl.value(y.slice(0), x.slice(0));
        assert_relative_eq!(a.re, b.re, max_relative = 1e-14);
        assert_relative_eq!(a.im, b.im, max_relative = 1e-14);

        assert_eq!(dl.shape(), adl.shape());
        assert_ne!(dl.geometrical_dependencies(), adl.geometrical_dependencies());
    }
}
