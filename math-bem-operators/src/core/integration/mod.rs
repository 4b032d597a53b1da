//! Numerical integration over pairs of triangles
//!
//! Galerkin assembly integrates over a test element and a trial element at
//! once. A [`PairRule`] is a flat list of (test point, trial point, weight)
//! triples in local coordinates; which rule is used depends on how the two
//! elements relate.
//!
//! ## Module Organization
//!
//! - [`gauss`] - Gauss-Legendre and triangle quadrature tables
//! - [`regular`] - Tensor rules for separated elements
//! - [`singular`] - Sauter-Schwab rules for coincident elements and adaptive
//!   subdivision for elements sharing an edge or a vertex

pub mod gauss;
pub mod regular;
pub mod singular;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::error::{BemError, Result};
use crate::core::grid::{ElementPairRelation, Grid, distance};
use crate::core::scalar::{RealScalar, real_const};

pub use gauss::{
    MAX_GAUSS_ORDER, MAX_TRIANGLE_ORDER, gauss_legendre, gauss_legendre_unit, triangle_quadrature,
};
pub use regular::{regular_order, tensor_pair_rule};
pub use singular::{Subelement, coincident_pair_rule, generate_subelements, subdivided_pair_rule};

/// Quadrature parameters for Galerkin assembly
///
/// Triangle orders select the 1, 4, 7 or 13 point rule (1 to 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureOptions {
    /// Triangle rule for well separated element pairs (default: 2)
    pub far_field_order: usize,
    /// Triangle rule for close element pairs and subelements (default: 4)
    pub near_field_order: usize,
    /// Centroid distance / element diameter below which a pair is close (default: 2.0)
    pub near_field_ratio: f64,
    /// Triangle rule on the test element of adjacent pairs (default: 3)
    pub singular_test_order: usize,
    /// Gauss-Legendre points per direction of the coincident rule (default: 5)
    pub coincident_order: usize,
    /// Distance / subelement size below which a trial subelement is split (default: 3.0)
    pub subdivision_tolerance: f64,
    /// Maximum subdivision depth (default: 4)
    pub max_subdivision_level: usize,
    /// Maximum number of trial subelements per test point (default: 110)
    pub max_subelements: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            far_field_order: 2,
            near_field_order: 4,
            near_field_ratio: 2.0,
            singular_test_order: 3,
            coincident_order: 5,
            subdivision_tolerance: 3.0,
            max_subdivision_level: 4,
            max_subelements: 110,
        }
    }
}

impl QuadratureOptions {
    /// Check that every parameter is in range
    pub fn validate(&self) -> Result<()> {
        let triangle_orders = [
            ("far_field_order", self.far_field_order),
            ("near_field_order", self.near_field_order),
            ("singular_test_order", self.singular_test_order),
        ];
        for (name, order) in triangle_orders {
            if !(1..=MAX_TRIANGLE_ORDER).contains(&order) {
                return Err(BemError::InvalidOptions(format!(
                    "{} must be in 1..={}, got {}",
                    name, MAX_TRIANGLE_ORDER, order
                )));
            }
        }
        if !(1..=MAX_GAUSS_ORDER).contains(&self.coincident_order) {
            return Err(BemError::InvalidOptions(format!(
                "coincident_order must be in 1..={}, got {}",
                MAX_GAUSS_ORDER, self.coincident_order
            )));
        }
        if !(self.near_field_ratio.is_finite() && self.near_field_ratio > 0.0) {
            return Err(BemError::InvalidOptions(format!(
                "near_field_ratio must be positive, got {}",
                self.near_field_ratio
            )));
        }
        if !(self.subdivision_tolerance.is_finite() && self.subdivision_tolerance > 0.0) {
            return Err(BemError::InvalidOptions(format!(
                "subdivision_tolerance must be positive, got {}",
                self.subdivision_tolerance
            )));
        }
        if self.max_subelements < 4 {
            return Err(BemError::InvalidOptions(format!(
                "max_subelements must be at least 4, got {}",
                self.max_subelements
            )));
        }
        Ok(())
    }
}

/// Paired quadrature points on a test and a trial element.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRule<T> {
    /// Local test coordinates (2 × n)
    pub test_points: Array2<T>,
    /// Local trial coordinates (2 × n)
    pub trial_points: Array2<T>,
    /// Weights in local coordinates (n)
    pub weights: Vec<T>,
}

impl<T: RealScalar> PairRule<T> {
    /// Build from (test point, trial point, weight) triples
    pub fn from_triples(triples: &[([T; 2], [T; 2], T)]) -> Self {
        let n = triples.len();
        let mut test_points = Array2::zeros((2, n));
        let mut trial_points = Array2::zeros((2, n));
        let mut weights = Vec::with_capacity(n);
        for (p, &(x, y, w)) in triples.iter().enumerate() {
            test_points[[0, p]] = x[0];
            test_points[[1, p]] = x[1];
            trial_points[[0, p]] = y[0];
            trial_points[[1, p]] = y[1];
            weights.push(w);
        }
        Self {
            test_points,
            trial_points,
            weights,
        }
    }

    /// Number of point pairs
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True if the rule has no points
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the weights (¼ for a rule exact on constants)
    pub fn weight_sum(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, &w| acc + w)
    }
}

/// Element-independent rules, built once per assembly.
#[derive(Debug, Clone)]
pub struct PairRules<T> {
    options: QuadratureOptions,
    far: PairRule<T>,
    near: PairRule<T>,
    coincident: PairRule<T>,
}

/// Which rule a pair of elements was integrated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairRuleKind {
    /// Sauter-Schwab rule for identical elements
    Coincident,
    /// Adaptive trial subdivision
    Subdivided,
    /// Tensor rule with the near-field order
    Near,
    /// Tensor rule with the far-field order
    Far,
}

impl<T: RealScalar> PairRules<T> {
    /// Build the fixed rules for `options`
    pub fn new(options: &QuadratureOptions) -> Self {
        Self {
            options: options.clone(),
            far: tensor_pair_rule(options.far_field_order, options.far_field_order),
            near: tensor_pair_rule(options.near_field_order, options.near_field_order),
            coincident: coincident_pair_rule(options.coincident_order),
        }
    }

    /// Classify a pair of elements
    ///
    /// `relation` is `None` when the elements live on different grids. The
    /// relation is then taken from the corner coordinates, and pairs that
    /// are close without touching are subdivided as well, since the two
    /// grids may overlap.
    pub fn classify(
        &self,
        test_grid: &Grid<T>,
        test_element: usize,
        trial_grid: &Grid<T>,
        trial_element: usize,
        relation: Option<ElementPairRelation>,
    ) -> PairRuleKind {
        let same_grid = relation.is_some();
        let relation = relation.unwrap_or_else(|| {
            test_grid.geometric_relation(test_element, trial_grid, trial_element)
        });
        match relation {
            ElementPairRelation::Coincident => return PairRuleKind::Coincident,
            ElementPairRelation::SharedEdge | ElementPairRelation::SharedVertex => {
                return PairRuleKind::Subdivided;
            }
            ElementPairRelation::Disjoint => {}
        }

        let dist = distance(
            &test_grid.centroid(test_element),
            &trial_grid.centroid(trial_element),
        );
        let size = test_grid
            .diameter(test_element)
            .max(trial_grid.diameter(trial_element));
        let ratio = dist / size;

        if !same_grid && ratio < real_const(0.5) {
            PairRuleKind::Subdivided
        } else {
            regular_kind(ratio, &self.options)
        }
    }

    /// Rule for a pair of elements of the given kind
    ///
    /// Fixed rules are borrowed; subdivided rules are built for the pair.
    pub fn rule<'a>(
        &'a self,
        kind: PairRuleKind,
        test_grid: &Grid<T>,
        test_element: usize,
        trial_grid: &Grid<T>,
        trial_element: usize,
    ) -> Cow<'a, PairRule<T>> {
        match kind {
            PairRuleKind::Coincident => Cow::Borrowed(&self.coincident),
            PairRuleKind::Near => Cow::Borrowed(&self.near),
            PairRuleKind::Far => Cow::Borrowed(&self.far),
            PairRuleKind::Subdivided => Cow::Owned(subdivided_pair_rule(
                test_grid,
                test_element,
                trial_grid,
                trial_element,
                &self.options,
            )),
        }
    }
}

fn regular_kind<T: RealScalar>(ratio: T, options: &QuadratureOptions) -> PairRuleKind {
    if regular_order(ratio, options) == options.far_field_order {
        PairRuleKind::Far
    } else {
        PairRuleKind::Near
    }
}
