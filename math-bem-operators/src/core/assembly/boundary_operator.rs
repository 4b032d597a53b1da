//! Boundary operator handle

use std::sync::{Arc, OnceLock};

use super::{AbstractBoundaryOperator, Context, DiscreteBoundaryOperator, Symmetry};
use crate::core::error::Result;
use crate::core::scalar::{BemScalar, RealScalar};
use crate::core::space::Space;

/// An abstract boundary operator bound to an assembly [`Context`].
///
/// The weak form is assembled on first request. With
/// `cache_weak_form` enabled it is kept and shared by later calls and by
/// clones of the handle made after assembly.
#[derive(Debug, Clone)]
pub struct BoundaryOperator<T: RealScalar, R: BemScalar<Real = T>> {
    context: Arc<Context>,
    abstract_operator: Arc<dyn AbstractBoundaryOperator<T, R>>,
    weak_form: OnceLock<Arc<DiscreteBoundaryOperator<R>>>,
}

impl<T: RealScalar, R: BemScalar<Real = T>> BoundaryOperator<T, R> {
    /// Bind `abstract_operator` to `context`
    pub fn new(
        context: Arc<Context>,
        abstract_operator: Arc<dyn AbstractBoundaryOperator<T, R>>,
    ) -> Self {
        Self {
            context,
            abstract_operator,
            weak_form: OnceLock::new(),
        }
    }

    /// Assembly context
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// The operator before discretisation
    pub fn abstract_operator(&self) -> &Arc<dyn AbstractBoundaryOperator<T, R>> {
        &self.abstract_operator
    }

    /// Trial space
    pub fn domain(&self) -> &Arc<dyn Space<T>> {
        self.abstract_operator.domain()
    }

    /// Range space
    pub fn range(&self) -> &Arc<dyn Space<T>> {
        self.abstract_operator.range()
    }

    /// Test space
    pub fn dual_to_range(&self) -> &Arc<dyn Space<T>> {
        self.abstract_operator.dual_to_range()
    }

    /// Operator label
    pub fn label(&self) -> &str {
        self.abstract_operator.label()
    }

    /// Declared symmetry
    pub fn symmetry(&self) -> Symmetry {
        self.abstract_operator.symmetry()
    }

    /// Whether a cached weak form is available
    pub fn is_assembled(&self) -> bool {
        self.weak_form.get().is_some()
    }

    /// Weak form, assembling it if needed
    pub fn weak_form(&self) -> Result<Arc<DiscreteBoundaryOperator<R>>> {
        if !self.context.options().cache_weak_form {
            return Ok(Arc::new(
                self.abstract_operator.assemble_weak_form(&self.context)?,
            ));
        }

        if let Some(weak_form) = self.weak_form.get() {
            return Ok(Arc::clone(weak_form));
        }

        // Concurrent first calls may both assemble; the first result wins.
        let assembled = Arc::new(self.abstract_operator.assemble_weak_form(&self.context)?);
        Ok(Arc::clone(self.weak_form.get_or_init(|| assembled)))
    }
}
