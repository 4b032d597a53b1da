//! Scalar abstractions for kernels and assembly
//!
//! - [`RealScalar`]: coordinate type (`f32` or `f64`)
//! - [`BemScalar`]: kernel/result value type, real or complex, with an associated real type
//! - [`ComplexScalar`]: complex values, needed by oscillatory (Helmholtz) kernels
//!
//! Kernels are written once against these traits and monomorphised for every
//! precision, so the same closed-form expression serves `Complex32` and `Complex64`.

use num_complex::{Complex, Complex32, Complex64};
use num_traits::{Float, FromPrimitive, NumAssign, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Real coordinate type used for geometry, quadrature weights and basis values.
pub trait RealScalar: Float + FromPrimitive + NumAssign + Send + Sync + Debug + 'static {}

impl<T> RealScalar for T where T: Float + FromPrimitive + NumAssign + Send + Sync + Debug + 'static {}

/// Value type of kernels, integrands and assembled matrices.
///
/// Provided for `f32`, `f64`, `Complex32` and `Complex64`. The associated
/// [`BemScalar::Real`] type is the coordinate type geometry is expressed in.
pub trait BemScalar:
    NumAssign
    + Copy
    + Send
    + Sync
    + Debug
    + Zero
    + One
    + Neg<Output = Self>
    + 'static
{
    /// The real number type underlying this scalar
    type Real: RealScalar;

    /// Create from a real value
    fn from_real(r: Self::Real) -> Self;

    /// Create from real and imaginary parts (imaginary part dropped for real types)
    fn from_re_im(re: Self::Real, im: Self::Real) -> Self;

    /// Real part
    fn re(&self) -> Self::Real;

    /// Imaginary part
    fn im(&self) -> Self::Real;

    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Multiply by a real factor (component-wise for complex values)
    fn mul_real(self, r: Self::Real) -> Self;

    /// Divide by a real factor (component-wise for complex values)
    fn div_real(self, r: Self::Real) -> Self;

    /// Magnitude |z|
    fn norm(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }
}

/// Complex scalar with the operations oscillatory kernels need.
pub trait ComplexScalar: BemScalar {
    /// The imaginary unit
    fn i() -> Self;

    /// Complex exponential
    fn exp(self) -> Self;
}

macro_rules! impl_real_scalar {
    ($t:ty) => {
        impl BemScalar for $t {
            type Real = $t;

            #[inline]
            fn from_real(r: $t) -> Self {
                r
            }

            #[inline]
            fn from_re_im(re: $t, _im: $t) -> Self {
                re
            }

            #[inline]
            fn re(&self) -> $t {
                *self
            }

            #[inline]
            fn im(&self) -> $t {
                0.0
            }

            #[inline]
            fn conj(&self) -> Self {
                *self
            }

            #[inline]
            fn norm_sqr(&self) -> $t {
                *self * *self
            }

            #[inline]
            fn mul_real(self, r: $t) -> Self {
                self * r
            }

            #[inline]
            fn div_real(self, r: $t) -> Self {
                self / r
            }

            #[inline]
            fn norm(&self) -> $t {
                self.abs()
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($c:ty, $t:ty) => {
        impl BemScalar for $c {
            type Real = $t;

            #[inline]
            fn from_real(r: $t) -> Self {
                Complex::new(r, 0.0)
            }

            #[inline]
            fn from_re_im(re: $t, im: $t) -> Self {
                Complex::new(re, im)
            }

            #[inline]
            fn re(&self) -> $t {
                self.re
            }

            #[inline]
            fn im(&self) -> $t {
                self.im
            }

            #[inline]
            fn conj(&self) -> Self {
                Complex::conj(self)
            }

            #[inline]
            fn norm_sqr(&self) -> $t {
                self.re * self.re + self.im * self.im
            }

            #[inline]
            fn mul_real(self, r: $t) -> Self {
                self * r
            }

            #[inline]
            fn div_real(self, r: $t) -> Self {
                self / r
            }

            #[inline]
            fn norm(&self) -> $t {
                Complex::norm(*self)
            }
        }

        impl ComplexScalar for $c {
            #[inline]
            fn i() -> Self {
                Complex::new(0.0, 1.0)
            }

            #[inline]
            fn exp(self) -> Self {
                Complex::exp(self)
            }
        }
    };
}

impl_real_scalar!(f32);
impl_real_scalar!(f64);
impl_complex_scalar!(Complex32, f32);
impl_complex_scalar!(Complex64, f64);

/// Convert an `f64` constant into the coordinate type.
///
/// Every [`RealScalar`] can represent the finite constants used by the kernels,
/// so the conversion only falls back to NaN for values outside the target range.
#[inline]
pub(crate) fn real_const<T: RealScalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_scalar_basics() {
        let z = Complex64::from_re_im(3.0, 4.0);
        assert_eq!(BemScalar::norm(&z), 5.0);
        assert_eq!(BemScalar::conj(&z), Complex64::new(3.0, -4.0));
        assert_eq!(Complex64::i() * Complex64::i(), Complex64::new(-1.0, 0.0));
        assert_eq!(z.mul_real(2.0), Complex64::new(6.0, 8.0));
        assert_eq!(z.div_real(2.0), Complex64::new(1.5, 2.0));
    }

    #[test]
    fn test_real_scalar_basics() {
        let x = -2.0f32;
        assert_eq!(BemScalar::norm(&x), 2.0);
        assert_eq!(x.im(), 0.0);
        assert_eq!(f32::from_re_im(1.5, 7.0), 1.5);
    }

    #[test]
    fn test_real_const() {
        let pi4: f32 = real_const(crate::core::constants::PI4);
        assert!((pi4 - 4.0 * std::f32::consts::PI).abs() < 1e-6);
    }
}
