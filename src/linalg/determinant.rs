use nalgebra::{DMatrix, RealField};

use super::{check_square, LinalgError};

/// Determinant by cofactor expansion along the first row.
///
/// `det(A) = sum_j (-1)^j * A[0][j] * det(minor(A, 0, j))`, with the 1x1 and
/// 2x2 cases computed directly. The cost grows factorially with the
/// dimension, see the [module](super) documentation.
pub fn determinant<T: RealField + Copy>(a: &DMatrix<T>) -> Result<T, LinalgError> {
    check_square(a)?;
    Ok(expand(a))
}

/// Signed terms `(-1)^j * A[0][j] * det(minor(A, 0, j))` of the expansion
/// along the first row. Their sum is the determinant.
pub fn cofactor_terms<T: RealField + Copy>(a: &DMatrix<T>) -> Result<Vec<T>, LinalgError> {
    let n = check_square(a)?;

    Ok((0..n)
        .map(|j| sign::<T>(j) * a[(0, j)] * expand(&minor(a, 0, j)))
        .collect())
}

/// Matrix without given row and column.
pub fn minor<T: RealField + Copy>(a: &DMatrix<T>, row: usize, col: usize) -> DMatrix<T> {
    a.clone().remove_row(row).remove_column(col)
}

fn expand<T: RealField + Copy>(a: &DMatrix<T>) -> T {
    match a.nrows() {
        // Empty product.
        0 => T::one(),
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        n => (0..n).fold(T::zero(), |det, j| {
            det + sign::<T>(j) * a[(0, j)] * expand(&minor(a, 0, j))
        }),
    }
}

fn sign<T: RealField + Copy>(j: usize) -> T {
    if j % 2 == 0 {
        T::one()
    } else {
        -T::one()
    }
}
