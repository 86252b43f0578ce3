use log::debug;
use nalgebra::{convert, DMatrix, RealField};

use super::{check_square, determinant, select_pivot, subtract_row, LinalgError, PIVOT_EPSILON};

/// Inverse by Gauss-Jordan elimination of the augmented matrix `[A | I]`.
///
/// The determinant is checked first and a matrix with `|det(A)|` below
/// [`PIVOT_EPSILON`] is rejected as [`Singular`](LinalgError::Singular)
/// without any elimination. Forward elimination uses partial pivoting, then
/// backward elimination reduces the left block to the identity so that the
/// right block holds the inverse.
pub fn inverse<T: RealField + Copy>(a: &DMatrix<T>) -> Result<DMatrix<T>, LinalgError> {
    let n = check_square(a)?;
    let eps: T = convert(PIVOT_EPSILON);

    if determinant(a)?.abs() < eps {
        return Err(LinalgError::Singular);
    }

    let mut aug = DMatrix::from_fn(n, 2 * n, |i, j| {
        if j < n {
            a[(i, j)]
        } else if j - n == i {
            T::one()
        } else {
            T::zero()
        }
    });

    for i in 0..n {
        let p = select_pivot(&aug, i);
        if p != i {
            debug!("swap rows {} and {}", i, p);
            aug.swap_rows(i, p);
        }

        let pivot = aug[(i, i)];
        if pivot.abs() < eps {
            return Err(LinalgError::Singular);
        }

        for j in i..2 * n {
            aug[(i, j)] /= pivot;
        }

        for k in (i + 1)..n {
            let factor = aug[(k, i)];
            subtract_row(&mut aug, k, i, factor, i);
        }
    }

    for i in (0..n).rev() {
        for k in 0..i {
            let factor = aug[(k, i)];
            subtract_row(&mut aug, k, i, factor, i);
        }
    }

    Ok(aug.columns(n, n).clone_owned())
}
