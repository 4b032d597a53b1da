//! Generic Galerkin assembly of singular integral operators
//!
//! For every pair of test element `a` and trial element `b` the engine
//! computes the local block
//!
//! ```text
//! A_ab[i, j] = ∫_a ∫_b I(φ_i(x), K(x, y), ψ_j(y)) dy dx
//! ```
//!
//! with a quadrature rule picked from the pair's topology (coincident,
//! adjacent or separated), then scatters the block into the global matrix
//! through the DOF maps of both spaces.
//!
//! The kernel, transformations and integrand are type parameters, so the
//! inner loop is monomorphised and inlined for each operator.

use log::{debug, info};
use ndarray::Array2;
use num_traits::Zero;
use std::sync::Arc;
use std::time::Instant;

use super::{
    AbstractBoundaryOperator, Context, DiscreteBoundaryOperator, Symmetry, same_space,
};
use crate::core::error::{BemError, Result};
use crate::core::functors::{IntegrandFunctor, TransformationFunctor, TransformedValues};
use crate::core::geometry::GeometricalDependencies;
use crate::core::integration::{PairRuleKind, PairRules};
use crate::core::kernels::{KernelFunctor, KernelShape, KernelValues};
use crate::core::parallel::map_indexed;
use crate::core::scalar::{BemScalar, RealScalar, real_const};
use crate::core::space::Space;

/// Boundary operator defined by a kernel, a test and a trial transformation
/// and an integrand.
#[derive(Debug)]
pub struct GeneralElementarySingularIntegralOperator<K, TF, I>
where
    K: KernelFunctor,
{
    domain: Arc<dyn Space<K::Coordinate>>,
    range: Arc<dyn Space<K::Coordinate>>,
    dual_to_range: Arc<dyn Space<K::Coordinate>>,
    label: String,
    symmetry: Symmetry,
    kernel: K,
    test_transformation: TF,
    trial_transformation: TF,
    integrand: I,
}

/// Everything about an assembly that does not depend on the element pair
struct AssemblySetup<T> {
    same_grid: bool,
    test_deps: GeometricalDependencies,
    trial_deps: GeometricalDependencies,
    shape: KernelShape,
    rules: PairRules<T>,
}

#[derive(Debug, Default)]
struct PairRuleCounts {
    coincident: usize,
    subdivided: usize,
    near: usize,
    far: usize,
}

impl PairRuleCounts {
    fn record(&mut self, kind: PairRuleKind) {
        match kind {
            PairRuleKind::Coincident => self.coincident += 1,
            PairRuleKind::Subdivided => self.subdivided += 1,
            PairRuleKind::Near => self.near += 1,
            PairRuleKind::Far => self.far += 1,
        }
    }
}

impl<K, TF, I> GeneralElementarySingularIntegralOperator<K, TF, I>
where
    K: KernelFunctor,
    TF: TransformationFunctor<Coordinate = K::Coordinate>,
    I: IntegrandFunctor<Coordinate = K::Coordinate, Kernel = K::Value>,
{
    /// Wire the functors to a triple of spaces.
    ///
    /// # Errors
    /// - [`BemError::GridMismatch`] if range and dual-to-range live on different grids
    /// - [`BemError::CodomainMismatch`] if a space does not match its transformation
    pub fn new(
        domain: Arc<dyn Space<K::Coordinate>>,
        range: Arc<dyn Space<K::Coordinate>>,
        dual_to_range: Arc<dyn Space<K::Coordinate>>,
        label: impl Into<String>,
        symmetry: Symmetry,
        kernel: K,
        test_transformation: TF,
        trial_transformation: TF,
        integrand: I,
    ) -> Result<Self> {
        if !Arc::ptr_eq(range.grid(), dual_to_range.grid()) {
            return Err(BemError::GridMismatch);
        }
        check_codomain(
            "domain",
            domain.as_ref(),
            trial_transformation.argument_dimension(),
        )?;
        check_codomain(
            "range",
            range.as_ref(),
            test_transformation.argument_dimension(),
        )?;
        check_codomain(
            "dual-to-range",
            dual_to_range.as_ref(),
            test_transformation.argument_dimension(),
        )?;

        Ok(Self {
            domain,
            range,
            dual_to_range,
            label: label.into(),
            symmetry,
            kernel,
            test_transformation,
            trial_transformation,
            integrand,
        })
    }

    /// Kernel functor
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Transformation applied to test basis functions
    pub fn test_transformation(&self) -> &TF {
        &self.test_transformation
    }

    /// Transformation applied to trial basis functions
    pub fn trial_transformation(&self) -> &TF {
        &self.trial_transformation
    }

    /// Integrand functor
    pub fn integrand(&self) -> &I {
        &self.integrand
    }

    fn setup(&self, context: &Context) -> AssemblySetup<K::Coordinate> {
        let mut test_deps = GeometricalDependencies::INTEGRATION_ELEMENTS;
        let mut trial_deps = GeometricalDependencies::INTEGRATION_ELEMENTS;
        self.kernel
            .add_geometrical_dependencies(&mut test_deps, &mut trial_deps);
        self.test_transformation
            .add_geometrical_dependencies(&mut test_deps);
        self.trial_transformation
            .add_geometrical_dependencies(&mut trial_deps);
        self.integrand
            .add_geometrical_dependencies(&mut test_deps, &mut trial_deps);

        AssemblySetup {
            same_grid: Arc::ptr_eq(self.dual_to_range.grid(), self.domain.grid()),
            test_deps,
            trial_deps,
            shape: self.kernel.shape(),
            rules: PairRules::new(&context.options().quadrature),
        }
    }

    /// Local block for one (test element, trial element) pair
    fn integrate_pair(
        &self,
        setup: &AssemblySetup<K::Coordinate>,
        test_element: usize,
        trial_element: usize,
    ) -> (PairRuleKind, Array2<I::Result>) {
        let test_space = self.dual_to_range.as_ref();
        let trial_space = self.domain.as_ref();
        let test_grid = test_space.grid().as_ref();
        let trial_grid = trial_space.grid().as_ref();

        let relation = setup
            .same_grid
            .then(|| test_grid.relation(test_element, trial_element));
        let kind = setup.rules.classify(
            test_grid,
            test_element,
            trial_grid,
            trial_element,
            relation,
        );
        let rule = setup
            .rules
            .rule(kind, test_grid, test_element, trial_grid, trial_element);

        let test_geometry =
            test_grid.geometrical_data(test_element, &rule.test_points, setup.test_deps);
        let trial_geometry =
            trial_grid.geometrical_data(trial_element, &rule.trial_points, setup.trial_deps);
        let test_basis = test_space.evaluate_basis(test_element, &rule.test_points);
        let trial_basis = trial_space.evaluate_basis(trial_element, &rule.trial_points);

        let mut kernel_values = KernelValues::for_shape(&setup.shape);
        let mut test_values: Vec<_> = (0..test_basis.function_count())
            .map(|_| TransformedValues::for_functor(&self.test_transformation))
            .collect();
        let mut trial_values: Vec<_> = (0..trial_basis.function_count())
            .map(|_| TransformedValues::for_functor(&self.trial_transformation))
            .collect();
        let mut block = Array2::from_elem(
            (test_values.len(), trial_values.len()),
            I::Result::zero(),
        );

        for point in 0..rule.len() {
            let test_point = test_geometry.slice(point);
            let trial_point = trial_geometry.slice(point);

            self.kernel
                .evaluate(test_point, trial_point, &mut kernel_values);
            for (function, values) in test_values.iter_mut().enumerate() {
                self.test_transformation.evaluate(
                    test_basis.slice(function, point),
                    test_point,
                    values,
                );
            }
            for (function, values) in trial_values.iter_mut().enumerate() {
                self.trial_transformation.evaluate(
                    trial_basis.slice(function, point),
                    trial_point,
                    values,
                );
            }

            let weight = rule.weights[point]
                * test_point.integration_element()
                * trial_point.integration_element();
            for (i, test_value) in test_values.iter().enumerate() {
                for (j, trial_value) in trial_values.iter().enumerate() {
                    let value = self.integrand.evaluate(
                        test_point,
                        trial_point,
                        test_value,
                        &kernel_values,
                        trial_value,
                    );
                    block[[i, j]] += value.mul_real(weight);
                }
            }
        }

        (kind, block)
    }
}

impl<K, TF, I> AbstractBoundaryOperator<K::Coordinate, I::Result>
    for GeneralElementarySingularIntegralOperator<K, TF, I>
where
    K: KernelFunctor,
    TF: TransformationFunctor<Coordinate = K::Coordinate>,
    I: IntegrandFunctor<Coordinate = K::Coordinate, Kernel = K::Value>,
{
    fn domain(&self) -> &Arc<dyn Space<K::Coordinate>> {
        &self.domain
    }

    fn range(&self) -> &Arc<dyn Space<K::Coordinate>> {
        &self.range
    }

    fn dual_to_range(&self) -> &Arc<dyn Space<K::Coordinate>> {
        &self.dual_to_range
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    fn assemble_weak_form(&self, context: &Context) -> Result<DiscreteBoundaryOperator<I::Result>> {
        let options = context.options();
        options.validate()?;
        let start = Instant::now();

        let test_space = &self.dual_to_range;
        let trial_space = &self.domain;
        let rows = test_space.global_dof_count();
        let cols = trial_space.global_dof_count();
        let test_count = test_space.grid().element_count();
        let trial_count = trial_space.grid().element_count();

        // Only pairs with trial >= test are integrated; the rest are mirrored.
        let mirror = self.symmetry != Symmetry::NoSymmetry && same_space(test_space, trial_space);
        let hermitian = self.symmetry == Symmetry::Hermitian;

        debug!(
            "Assembling '{}': {}x{} ({} -> {}), {} x {} elements, {:?}{}",
            self.label,
            rows,
            cols,
            trial_space.name(),
            test_space.name(),
            test_count,
            trial_count,
            self.symmetry,
            if mirror { ", mirrored" } else { "" }
        );

        let setup = self.setup(context);
        let element_rows = map_indexed(test_count, options.parallel, |test_element| {
            let first = if mirror { test_element } else { 0 };
            (first..trial_count)
                .map(|trial_element| {
                    let (kind, block) = self.integrate_pair(&setup, test_element, trial_element);
                    (trial_element, kind, block)
                })
                .collect::<Vec<_>>()
        });

        // Scatter in element order so the result does not depend on threading.
        let mut matrix = Array2::from_elem((rows, cols), I::Result::zero());
        let mut counts = PairRuleCounts::default();
        for (test_element, blocks) in element_rows.into_iter().enumerate() {
            let test_dofs = test_space.global_dofs(test_element);
            for (trial_element, kind, block) in blocks {
                counts.record(kind);
                let trial_dofs = trial_space.global_dofs(trial_element);
                for (i, &row) in test_dofs.iter().enumerate() {
                    for (j, &col) in trial_dofs.iter().enumerate() {
                        matrix[[row, col]] += block[[i, j]];
                    }
                }

                if mirror && trial_element != test_element {
                    for (i, &row) in test_dofs.iter().enumerate() {
                        for (j, &col) in trial_dofs.iter().enumerate() {
                            let value = block[[i, j]];
                            matrix[[col, row]] += if hermitian { value.conj() } else { value };
                        }
                    }
                }
            }
        }

        if mirror {
            symmetrize(&mut matrix, hermitian);
        }

        debug!(
            "'{}' element pairs: {} coincident, {} subdivided, {} near, {} far",
            self.label, counts.coincident, counts.subdivided, counts.near, counts.far
        );
        if options.verbose {
            info!(
                "Assembled '{}' ({}x{}) in {:.3}s",
                self.label,
                rows,
                cols,
                start.elapsed().as_secs_f64()
            );
        }

        Ok(DiscreteBoundaryOperator::new(matrix, self.label.clone()))
    }
}

fn check_codomain<T: RealScalar>(
    role: &'static str,
    space: &dyn Space<T>,
    expected: usize,
) -> Result<()> {
    let found = space.codomain_dimension();
    if found == expected {
        Ok(())
    } else {
        Err(BemError::CodomainMismatch {
            role,
            found,
            expected,
        })
    }
}

/// Average the two triangles of a square matrix so that `A = Aᵀ` (or `Aᴴ`) holds exactly
fn symmetrize<R: BemScalar>(matrix: &mut Array2<R>, hermitian: bool) {
    let half: R::Real = real_const(0.5);
    let n = matrix.nrows().min(matrix.ncols());
    for i in 0..n {
        if hermitian {
            matrix[[i, i]] = R::from_real(matrix[[i, i]].re());
        }
        for j in (i + 1)..n {
            let lower = if hermitian {
                matrix[[j, i]].conj()
            } else {
                matrix[[j, i]]
            };
            let value = (matrix[[i, j]] + lower).mul_real(half);
            matrix[[i, j]] = value;
            matrix[[j, i]] = if hermitian { value.conj() } else { value };
        }
    }
}
