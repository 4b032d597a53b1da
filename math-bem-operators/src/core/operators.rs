//! Boundary operator factories
//!
//! Each factory picks a kernel, wires it to scalar-function-value
//! transformations and the scalar product integrand, and returns a
//! [`BoundaryOperator`] bound to the given context.
//!
//! | Factory | Kernel | Symmetry |
//! |---------|--------|----------|
//! | [`laplace_3d_single_layer_boundary_operator`] | `1/(4πr)` | symmetric |
//! | [`laplace_3d_double_layer_boundary_operator`] | `∂G/∂n_y` | none |
//! | [`laplace_3d_adjoint_double_layer_boundary_operator`] | `∂G/∂n_x` | none |
//! | [`helmholtz_3d_single_layer_boundary_operator`] | `e^{ikr}/(4πr)` | symmetric |
//! | [`helmholtz_3d_double_layer_boundary_operator`] | `∂G/∂n_y` | none |
//! | [`helmholtz_3d_adjoint_double_layer_boundary_operator`] | `∂G/∂n_x` | none |
//! | [`helmholtz_3d_combined_boundary_operator`] | `∂G/∂n_y − ik G` | none |

use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::assembly::{
    BoundaryOperator, Context, GeneralElementarySingularIntegralOperator, Symmetry,
};
use crate::core::error::Result;
use crate::core::functors::{ScalarFunctionValueFunctor, SimpleTestScalarKernelTrialIntegrandFunctor};
use crate::core::kernels::{
    Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor, Helmholtz3dCombinedPotentialKernelFunctor,
    Helmholtz3dDoubleLayerPotentialKernelFunctor, Helmholtz3dSingleLayerPotentialKernelFunctor,
    KernelFunctor, Laplace3dAdjointDoubleLayerPotentialKernelFunctor,
    Laplace3dDoubleLayerPotentialKernelFunctor, Laplace3dSingleLayerPotentialKernelFunctor,
};
use crate::core::scalar::{BemScalar, ComplexScalar, RealScalar};
use crate::core::space::Space;

static LABEL_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// `prefix` followed by a process-wide counter
fn unique_label(prefix: &str) -> String {
    format!("{}_{}", prefix, LABEL_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Scalar kernel operator with value-transformations on both sides
fn scalar_kernel_operator<K>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<K::Coordinate>>,
    range: &Arc<dyn Space<K::Coordinate>>,
    dual_to_range: &Arc<dyn Space<K::Coordinate>>,
    label: Option<&str>,
    default_prefix: &str,
    symmetry: Symmetry,
    kernel: K,
) -> Result<BoundaryOperator<K::Coordinate, K::Value>>
where
    K: KernelFunctor + 'static,
{
    let label = label.map_or_else(|| unique_label(default_prefix), str::to_owned);
    debug!(
        "Creating '{}' ({} -> {}, {:?})",
        label,
        domain.name(),
        dual_to_range.name(),
        symmetry
    );

    let operator = GeneralElementarySingularIntegralOperator::new(
        Arc::clone(domain),
        Arc::clone(range),
        Arc::clone(dual_to_range),
        label,
        symmetry,
        kernel,
        ScalarFunctionValueFunctor::<K::Coordinate>::new(),
        ScalarFunctionValueFunctor::<K::Coordinate>::new(),
        SimpleTestScalarKernelTrialIntegrandFunctor::<K::Coordinate, K::Value, K::Value>::new(),
    )?;

    Ok(BoundaryOperator::new(Arc::clone(context), Arc::new(operator)))
}

/// Laplace single-layer boundary operator `V`
pub fn laplace_3d_single_layer_boundary_operator<T>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<T>>,
    range: &Arc<dyn Space<T>>,
    dual_to_range: &Arc<dyn Space<T>>,
    label: Option<&str>,
) -> Result<BoundaryOperator<T, T>>
where
    T: RealScalar + BemScalar<Real = T>,
{
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Laplace3dSingleLayer",
        Symmetry::Symmetric,
        Laplace3dSingleLayerPotentialKernelFunctor::<T>::new(),
    )
}

/// Laplace double-layer boundary operator `K`
pub fn laplace_3d_double_layer_boundary_operator<T>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<T>>,
    range: &Arc<dyn Space<T>>,
    dual_to_range: &Arc<dyn Space<T>>,
    label: Option<&str>,
) -> Result<BoundaryOperator<T, T>>
where
    T: RealScalar + BemScalar<Real = T>,
{
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Laplace3dDoubleLayer",
        Symmetry::NoSymmetry,
        Laplace3dDoubleLayerPotentialKernelFunctor::<T>::new(),
    )
}

/// Laplace adjoint double-layer boundary operator `K'`
pub fn laplace_3d_adjoint_double_layer_boundary_operator<T>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<T>>,
    range: &Arc<dyn Space<T>>,
    dual_to_range: &Arc<dyn Space<T>>,
    label: Option<&str>,
) -> Result<BoundaryOperator<T, T>>
where
    T: RealScalar + BemScalar<Real = T>,
{
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Laplace3dAdjointDoubleLayer",
        Symmetry::NoSymmetry,
        Laplace3dAdjointDoubleLayerPotentialKernelFunctor::<T>::new(),
    )
}

/// Helmholtz single-layer boundary operator for wave number `k`
pub fn helmholtz_3d_single_layer_boundary_operator<V: ComplexScalar>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<V::Real>>,
    range: &Arc<dyn Space<V::Real>>,
    dual_to_range: &Arc<dyn Space<V::Real>>,
    wave_number: V,
    label: Option<&str>,
) -> Result<BoundaryOperator<V::Real, V>> {
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Helmholtz3dSingleLayer",
        Symmetry::Symmetric,
        Helmholtz3dSingleLayerPotentialKernelFunctor::new(wave_number),
    )
}

/// Helmholtz double-layer boundary operator for wave number `k`
pub fn helmholtz_3d_double_layer_boundary_operator<V: ComplexScalar>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<V::Real>>,
    range: &Arc<dyn Space<V::Real>>,
    dual_to_range: &Arc<dyn Space<V::Real>>,
    wave_number: V,
    label: Option<&str>,
) -> Result<BoundaryOperator<V::Real, V>> {
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Helmholtz3dDoubleLayer",
        Symmetry::NoSymmetry,
        Helmholtz3dDoubleLayerPotentialKernelFunctor::new(wave_number),
    )
}

/// Helmholtz adjoint double-layer boundary operator for wave number `k`
pub fn helmholtz_3d_adjoint_double_layer_boundary_operator<V: ComplexScalar>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<V::Real>>,
    range: &Arc<dyn Space<V::Real>>,
    dual_to_range: &Arc<dyn Space<V::Real>>,
    wave_number: V,
    label: Option<&str>,
) -> Result<BoundaryOperator<V::Real, V>> {
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Helmholtz3dAdjointDoubleLayer",
        Symmetry::NoSymmetry,
        Helmholtz3dAdjointDoubleLayerPotentialKernelFunctor::new(wave_number),
    )
}

/// Helmholtz combined-potential boundary operator for wave number `k`.
///
/// Kernel `∂G/∂n_y − ik G` with `G = e^{ikr}/(4πr)`, evaluated by
/// [`Helmholtz3dCombinedPotentialKernelFunctor`]. Basis functions enter
/// through their values on both sides and the weak form carries no
/// symmetry.
///
/// # Errors
/// - [`BemError::GridMismatch`](crate::core::BemError::GridMismatch) if
///   `range` and `dual_to_range` are defined on different grids
/// - [`BemError::CodomainMismatch`](crate::core::BemError::CodomainMismatch)
///   if a space is not scalar
pub fn helmholtz_3d_combined_boundary_operator<V: ComplexScalar>(
    context: &Arc<Context>,
    domain: &Arc<dyn Space<V::Real>>,
    range: &Arc<dyn Space<V::Real>>,
    dual_to_range: &Arc<dyn Space<V::Real>>,
    wave_number: V,
    label: Option<&str>,
) -> Result<BoundaryOperator<V::Real, V>> {
    scalar_kernel_operator(
        context,
        domain,
        range,
        dual_to_range,
        label,
        "Helmholtz3dCombined",
        Symmetry::NoSymmetry,
        Helmholtz3dCombinedPotentialKernelFunctor::new(wave_number),
    )
}
