//! Weak-form assembly
//!
//! - [`GeneralElementarySingularIntegralOperator`]: generic Galerkin assembly
//!   engine, monomorphised over a kernel, two transformations and an integrand
//! - [`BoundaryOperator`]: handle binding an abstract operator to a [`Context`],
//!   with a lazily assembled weak form
//! - [`DiscreteBoundaryOperator`]: the dense weak form

pub mod boundary_operator;
pub mod context;
pub mod discrete;
pub mod singular_operator;

pub use boundary_operator::BoundaryOperator;
pub use context::{AssemblyOptions, Context};
pub use discrete::DiscreteBoundaryOperator;
pub use singular_operator::GeneralElementarySingularIntegralOperator;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::scalar::{BemScalar, RealScalar};
use crate::core::space::Space;

/// Symmetry of the weak form an operator declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Symmetry {
    /// No structure assumed
    #[default]
    NoSymmetry,
    /// `A = Aᵀ` when test and trial spaces coincide
    Symmetric,
    /// `A = Aᴴ` when test and trial spaces coincide
    Hermitian,
}

/// A boundary operator before discretisation.
pub trait AbstractBoundaryOperator<T: RealScalar, R: BemScalar<Real = T>>:
    Send + Sync + Debug
{
    /// Space of the operator argument (trial space)
    fn domain(&self) -> &Arc<dyn Space<T>>;

    /// Space the result lives in
    fn range(&self) -> &Arc<dyn Space<T>>;

    /// Space the result is tested with (test space)
    fn dual_to_range(&self) -> &Arc<dyn Space<T>>;

    /// Human-readable name
    fn label(&self) -> &str;

    /// Declared symmetry
    fn symmetry(&self) -> Symmetry;

    /// Assemble the weak form with the settings of `context`
    fn assemble_weak_form(&self, context: &Context) -> Result<DiscreteBoundaryOperator<R>>;
}

/// Whether two space handles refer to the same space object
pub(crate) fn same_space<T: RealScalar>(a: &Arc<dyn Space<T>>, b: &Arc<dyn Space<T>>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
