//! Tensor rules for separated element pairs
//!
//! When the test and trial elements are apart the integrand is smooth and
//! the product of two triangle rules is accurate. The rule order only grows
//! when the elements come close relative to their size.

use crate::core::integration::gauss::triangle_quadrature;
use crate::core::integration::{PairRule, QuadratureOptions};
use crate::core::scalar::{RealScalar, real_const};

/// Product of a test and a trial triangle rule
pub fn tensor_pair_rule<T: RealScalar>(test_order: usize, trial_order: usize) -> PairRule<T> {
    let test_rule = triangle_quadrature(test_order);
    let trial_rule = triangle_quadrature(trial_order);

    let mut triples = Vec::with_capacity(test_rule.len() * trial_rule.len());
    for &(xs, xt, xw) in &test_rule {
        for &(ys, yt, yw) in &trial_rule {
            triples.push((
                [real_const(xs), real_const(xt)],
                [real_const(ys), real_const(yt)],
                real_const(xw * yw),
            ));
        }
    }
    PairRule::from_triples(&triples)
}

/// Triangle rule order for a pair with the given centroid distance / diameter ratio
///
/// - ratio < `near_field_ratio`: `near_field_order`
/// - otherwise: `far_field_order`
pub fn regular_order<T: RealScalar>(ratio: T, options: &QuadratureOptions) -> usize {
    if ratio < real_const(options.near_field_ratio) {
        options.near_field_order
    } else {
        options.far_field_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tensor_rule_size_and_weights() {
        let rule: PairRule<f64> = tensor_pair_rule(3, 2);
        assert_eq!(rule.len(), 28);
        assert_relative_eq!(rule.weight_sum(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_tensor_rule_integrates_separable_moments() {
        // ∫∫ s_x t_y = (1/6)(1/6)
        let rule: PairRule<f64> = tensor_pair_rule(3, 3);
        let moment: f64 = (0..rule.len())
            .map(|p| rule.weights[p] * rule.test_points[[0, p]] * rule.trial_points[[1, p]])
            .sum();
        assert_relative_eq!(moment, 1.0 / 36.0, epsilon = 1e-12);
    }

    #[test]
    fn test_regular_order() {
        let options = QuadratureOptions::default();
        assert_eq!(regular_order(0.5, &options), options.near_field_order);
        assert_eq!(regular_order(10.0, &options), options.far_field_order);
    }
}
