//! Product of scalar test value, scalar kernel and scalar trial value

use std::marker::PhantomData;

use crate::core::functors::{IntegrandFunctor, TransformedValues};
use crate::core::geometry::ConstGeometricalDataSlice;
use crate::core::kernels::KernelValues;
use crate::core::scalar::{BemScalar, RealScalar};

/// `test[0][0] · kernel[0][(0, 0)] · trial[0][0]`.
///
/// `B` is the basis value type, `K` the kernel value type and `R` the result
/// type. A real kernel may be promoted to a complex result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimpleTestScalarKernelTrialIntegrandFunctor<B, K, R> {
    _marker: PhantomData<(B, K, R)>,
}

impl<B, K, R> SimpleTestScalarKernelTrialIntegrandFunctor<B, K, R>
where
    B: RealScalar,
    K: BemScalar<Real = B>,
    R: BemScalar<Real = B>,
{
    /// Create the integrand
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B, K, R> IntegrandFunctor for SimpleTestScalarKernelTrialIntegrandFunctor<B, K, R>
where
    B: RealScalar,
    K: BemScalar<Real = B>,
    R: BemScalar<Real = B>,
{
    type Coordinate = B;
    type Kernel = K;
    type Result = R;

    #[inline]
    fn evaluate(
        &self,
        _test_geometry: ConstGeometricalDataSlice<'_, B>,
        _trial_geometry: ConstGeometricalDataSlice<'_, B>,
        test_values: &TransformedValues<B>,
        kernel_values: &KernelValues<K>,
        trial_values: &TransformedValues<B>,
    ) -> R {
        let kernel = kernel_values[0][[0, 0]];
        R::from_re_im(kernel.re(), kernel.im()).mul_real(test_values[0][0] * trial_values[0][0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::GeometricalData;
    use crate::core::kernels::KernelShape;
    use num_complex::Complex64;

    #[test]
    fn test_product() {
        let integrand = SimpleTestScalarKernelTrialIntegrandFunctor::<f64, Complex64, Complex64>::new();
        let geometry = GeometricalData::from_points(&[[0.0, 0.0, 0.0]], None);

        let mut test = TransformedValues::for_dimensions(&[1]);
        let mut trial = TransformedValues::for_dimensions(&[1]);
        test[0][0] = 0.5;
        trial[0][0] = 3.0;
        let mut kernel = KernelValues::for_shape(&KernelShape::scalar());
        kernel[0][[0, 0]] = Complex64::new(2.0, -1.0);

        let value = integrand.evaluate(geometry.slice(0), geometry.slice(0), &test, &kernel, &trial);
        assert_eq!(value, Complex64::new(3.0, -1.5));
    }

    #[test]
    fn test_real_kernel_promoted_to_complex() {
        let integrand = SimpleTestScalarKernelTrialIntegrandFunctor::<f64, f64, Complex64>::new();
        let geometry = GeometricalData::from_points(&[[0.0, 0.0, 0.0]], None);

        let mut test = TransformedValues::for_dimensions(&[1]);
        let mut trial = TransformedValues::for_dimensions(&[1]);
        test[0][0] = 2.0;
        trial[0][0] = 2.0;
        let mut kernel = KernelValues::for_shape(&KernelShape::scalar());
        kernel[0][[0, 0]] = -1.25;

        let value = integrand.evaluate(geometry.slice(0), geometry.slice(0), &test, &kernel, &trial);
        assert_eq!(value, Complex64::new(-5.0, 0.0));
    }
}
