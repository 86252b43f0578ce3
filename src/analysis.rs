//! Various analyses for supporting the solving.

use nalgebra::{DMatrix, RealField};

use crate::linalg::{check_square, LinalgError};

/// Checks strict row-wise diagonal dominance, `|A[i][i]| > sum_{j != i}
/// |A[i][j]|`, and returns the rows that violate it.
///
/// An empty result means the matrix is strictly diagonally dominant, which is
/// sufficient (but not necessary) for the convergence of Jacobi and
/// Gauss-Seidel iterations.
pub fn diagonal_dominance<T: RealField + Copy>(a: &DMatrix<T>) -> Result<Vec<usize>, LinalgError> {
    check_square(a)?;

    Ok(a.row_iter()
        .enumerate()
        .filter(|(i, row)| {
            let off = row
                .iter()
                .enumerate()
                .filter(|(j, _)| j != i)
                .fold(T::zero(), |sum, (_, v)| sum + v.abs());
            row[*i].abs() <= off
        })
        .map(|(i, _)| i)
        .collect())
}

/// Determines whether the matrix is strictly diagonally dominant by rows.
pub fn is_diagonally_dominant<T: RealField + Copy>(a: &DMatrix<T>) -> Result<bool, LinalgError> {
    Ok(diagonal_dominance(a)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dmatrix;

    #[test]
    fn dominant() {
        let a = dmatrix![
            10.0, -1.0, 2.0;
            -1.0, 11.0, -1.0;
            2.0, -1.0, 10.0
        ];
        assert_eq!(diagonal_dominance(&a).unwrap(), Vec::<usize>::new());
        assert!(is_diagonally_dominant(&a).unwrap());
    }

    #[test]
    fn offending_rows() {
        let a = dmatrix![
            1.0, 2.0, 0.0;
            0.0, 5.0, 1.0;
            3.0, 0.0, 3.0
        ];
        // Equality is not strict dominance.
        assert_eq!(diagonal_dominance(&a).unwrap(), vec![0, 2]);
        assert!(!is_diagonally_dominant(&a).unwrap());
    }

    #[test]
    fn not_square() {
        let a = dmatrix![1.0, 2.0, 3.0];
        assert!(diagonal_dominance(&a).is_err());
    }
}
