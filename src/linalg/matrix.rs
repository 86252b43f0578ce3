use nalgebra::{DMatrix, DVector, RealField};

use super::LinalgError;

/// Builds a matrix from rows, checking that all rows have the same length.
///
/// An empty slice gives a 0x0 matrix.
pub fn from_rows<T: RealField + Copy>(rows: &[Vec<T>]) -> Result<DMatrix<T>, LinalgError> {
    let ncols = rows.first().map_or(0, |row| row.len());

    if let Some((row, found)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != ncols)
        .map(|(i, row)| (i, row.len()))
    {
        return Err(LinalgError::RaggedRows {
            row,
            expected: ncols,
            found,
        });
    }

    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Element-wise sum of two matrices of identical shape.
pub fn add<T: RealField + Copy>(a: &DMatrix<T>, b: &DMatrix<T>) -> Result<DMatrix<T>, LinalgError> {
    if a.shape() != b.shape() {
        return Err(LinalgError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }

    Ok(a + b)
}

/// Matrix product. The number of columns of `a` must equal the number of rows
/// of `b`.
pub fn multiply<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DMatrix<T>,
) -> Result<DMatrix<T>, LinalgError> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }

    Ok(a * b)
}

/// Product of a matrix and a column vector.
pub fn multiply_vector<T: RealField + Copy>(
    a: &DMatrix<T>,
    v: &DVector<T>,
) -> Result<DVector<T>, LinalgError> {
    if a.ncols() != v.len() {
        return Err(LinalgError::ShapeMismatch {
            left: a.shape(),
            right: (v.len(), 1),
        });
    }

    Ok(a * v)
}

pub(crate) fn check_square<T: RealField + Copy>(a: &DMatrix<T>) -> Result<usize, LinalgError> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(rows)
}

pub(crate) fn check_system<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<usize, LinalgError> {
    let n = check_square(a)?;
    if b.len() != n {
        return Err(LinalgError::ShapeMismatch {
            left: a.shape(),
            right: (b.len(), 1),
        });
    }
    Ok(n)
}
