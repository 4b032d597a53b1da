//! Assembled (discrete) boundary operators

use ndarray::{Array1, Array2};

use crate::core::error::{BemError, Result};
use crate::core::scalar::BemScalar;

/// Dense weak form of a boundary operator.
///
/// Rows follow the DOFs of the dual-to-range space, columns those of the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteBoundaryOperator<R> {
    matrix: Array2<R>,
    label: String,
}

impl<R: BemScalar> DiscreteBoundaryOperator<R> {
    /// Wrap an assembled matrix
    pub fn new(matrix: Array2<R>, label: impl Into<String>) -> Self {
        Self {
            matrix,
            label: label.into(),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Label of the operator it was assembled from
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The dense matrix
    pub fn as_matrix(&self) -> &Array2<R> {
        &self.matrix
    }

    /// Consume into the dense matrix
    pub fn into_matrix(self) -> Array2<R> {
        self.matrix
    }

    /// Matrix-vector product `A x`
    ///
    /// # Errors
    /// [`BemError::DimensionMismatch`] if `x` does not have `cols()` entries.
    pub fn apply(&self, x: &Array1<R>) -> Result<Array1<R>> {
        if x.len() != self.cols() {
            return Err(BemError::DimensionMismatch {
                expected: self.cols(),
                found: x.len(),
            });
        }

        let mut y = Array1::from_elem(self.rows(), R::zero());
        for (yi, row) in y.iter_mut().zip(self.matrix.outer_iter()) {
            let mut acc = R::zero();
            for (&a, &xj) in row.iter().zip(x.iter()) {
                acc += a * xj;
            }
            *yi = acc;
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use num_complex::Complex64;

    #[test]
    fn test_apply() {
        let op = DiscreteBoundaryOperator::new(array![[1.0, 2.0, 0.0], [0.0, -1.0, 3.0]], "test");
        assert_eq!(op.rows(), 2);
        assert_eq!(op.cols(), 3);
        assert_eq!(op.label(), "test");

        let y = op.apply(&array![1.0, 1.0, 2.0]).unwrap();
        assert_eq!(y, array![3.0, 5.0]);
    }

    #[test]
    fn test_apply_complex() {
        let i = Complex64::new(0.0, 1.0);
        let one = Complex64::new(1.0, 0.0);
        let op = DiscreteBoundaryOperator::new(array![[i, one]], "");
        let y = op.apply(&array![i, i]).unwrap();
        assert_eq!(y[0], Complex64::new(-1.0, 1.0));
    }

    #[test]
    fn test_apply_dimension_mismatch() {
        let op = DiscreteBoundaryOperator::new(Array2::<f64>::zeros((2, 3)), "");
        let err = op.apply(&array![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            BemError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }
}
