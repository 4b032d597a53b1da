//! Value of a scalar basis function

use std::marker::PhantomData;

use crate::core::functors::{TransformationFunctor, TransformedValues};
use crate::core::geometry::{ConstGeometricalDataSlice, GeometricalDependencies};
use crate::core::scalar::RealScalar;
use crate::core::space::ConstBasisDataSlice;

/// Passes the value of a scalar basis function through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScalarFunctionValueFunctor<T> {
    _marker: PhantomData<T>,
}

impl<T: RealScalar> ScalarFunctionValueFunctor<T> {
    /// Create the transformation
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: RealScalar> TransformationFunctor for ScalarFunctionValueFunctor<T> {
    type Coordinate = T;

    fn add_geometrical_dependencies(&self, _deps: &mut GeometricalDependencies) {}

    fn transformation_count(&self) -> usize {
        1
    }

    fn argument_dimension(&self) -> usize {
        1
    }

    fn result_dimension(&self, _index: usize) -> usize {
        1
    }

    #[inline]
    fn evaluate(
        &self,
        basis: ConstBasisDataSlice<'_, T>,
        _geometry: ConstGeometricalDataSlice<'_, T>,
        result: &mut TransformedValues<T>,
    ) {
        result[0][0] = basis.value(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::GeometricalData;
    use crate::core::space::BasisData;

    #[test]
    fn test_passes_value_through() {
        let functor = ScalarFunctionValueFunctor::<f64>::new();
        let mut basis = BasisData::new(1, 2, 1);
        basis.values[[0, 1, 0]] = 0.25;
        let geometry = GeometricalData::from_points(&[[0.0, 0.0, 0.0]], None);

        let mut result = TransformedValues::for_functor(&functor);
        functor.evaluate(basis.slice(1, 0), geometry.slice(0), &mut result);
        assert_eq!(result[0][0], 0.25);

        let mut deps = GeometricalDependencies::empty();
        functor.add_geometrical_dependencies(&mut deps);
        assert!(deps.is_empty());
        assert_eq!(functor.argument_dimension(), 1);
    }
}
