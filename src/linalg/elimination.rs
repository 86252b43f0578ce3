//! Direct solvers of `Ax = b`.
//!
//! Both [`gauss`] and [`gauss_jordan`] use partial pivoting: in every column,
//! the row at or below the diagonal with the largest magnitude is swapped into
//! the pivot position. Among rows with equal magnitude, the first one wins,
//! which keeps the elimination deterministic. A pivot whose magnitude is below
//! [`PIVOT_EPSILON`] means the system has no unique solution.
//!
//! The solvers also return the performed row operations, in order, so that
//! the elimination can be shown step by step.

use getset::Getters;
use log::debug;
use nalgebra::{convert, DMatrix, DVector, RealField};

use super::{check_system, inverse, multiply_vector, LinalgError, PIVOT_EPSILON};

/// Row operation performed during elimination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EliminationStep<T> {
    /// Rows `row` and `with` were swapped to bring the pivot into place.
    Swap {
        /// Pivot row.
        row: usize,
        /// Row that held the largest candidate.
        with: usize,
    },
    /// `target -= factor * pivot`.
    Eliminate {
        /// Row being eliminated.
        target: usize,
        /// Pivot row.
        pivot: usize,
        /// Multiplier of the pivot row.
        factor: T,
    },
    /// Row was divided by its pivot.
    Normalize {
        /// Normalized row.
        row: usize,
        /// The pivot value.
        divisor: T,
    },
    /// Unknown `index` was obtained by back-substitution.
    Substitute {
        /// Zero-based index of the unknown.
        index: usize,
        /// Its value.
        value: T,
    },
}

/// Solution of a linear system by elimination with the row operations that
/// led to it.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Elimination<T: RealField + Copy> {
    /// The solution vector `x`.
    solution: DVector<T>,
    /// Performed row operations in order.
    steps: Vec<EliminationStep<T>>,
}

impl<T: RealField + Copy> Elimination<T> {
    /// Unpacks the solution vector.
    pub fn into_solution(self) -> DVector<T> {
        self.solution
    }
}

/// Solution of a linear system by the matrix-inverse method.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct InverseSolution<T: RealField + Copy> {
    /// Inverse of the system matrix.
    inverse: DMatrix<T>,
    /// The solution vector `x = inverse * b`.
    solution: DVector<T>,
}

/// Gauss elimination with partial pivoting followed by back-substitution,
/// `x[i] = (b[i] - sum_{j>i} A[i][j] * x[j]) / A[i][i]`.
pub fn gauss<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<Elimination<T>, LinalgError> {
    let n = check_system(a, b)?;
    let mut aug = augment(a, b);
    let mut steps = Vec::new();

    for i in 0..n {
        pivot(&mut aug, i, &mut steps)?;

        for k in (i + 1)..n {
            let factor = aug[(k, i)] / aug[(i, i)];
            subtract_row(&mut aug, k, i, factor, i);
            steps.push(EliminationStep::Eliminate {
                target: k,
                pivot: i,
                factor,
            });
        }
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[(i, n)];
        for j in (i + 1)..n {
            sum -= aug[(i, j)] * x[j];
        }
        x[i] = sum / aug[(i, i)];
        steps.push(EliminationStep::Substitute {
            index: i,
            value: x[i],
        });
    }

    Ok(Elimination { solution: x, steps })
}

/// Gauss-Jordan elimination. Every pivot row is normalized and its column is
/// eliminated both above and below the pivot, so the solution is read off
/// directly without back-substitution.
pub fn gauss_jordan<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<Elimination<T>, LinalgError> {
    let n = check_system(a, b)?;
    let mut aug = augment(a, b);
    let mut steps = Vec::new();

    for i in 0..n {
        pivot(&mut aug, i, &mut steps)?;

        let divisor = aug[(i, i)];
        for j in i..=n {
            aug[(i, j)] /= divisor;
        }
        steps.push(EliminationStep::Normalize { row: i, divisor });

        for k in (0..n).filter(|&k| k != i) {
            let factor = aug[(k, i)];
            if factor == T::zero() {
                continue;
            }
            subtract_row(&mut aug, k, i, factor, i);
            steps.push(EliminationStep::Eliminate {
                target: k,
                pivot: i,
                factor,
            });
        }
    }

    let x = aug.column(n).clone_owned();
    Ok(Elimination { solution: x, steps })
}

/// Matrix-inverse method, `x = inverse(A) * b`. Fails exactly when
/// [`inverse`] fails.
pub fn inverse_method<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<InverseSolution<T>, LinalgError> {
    check_system(a, b)?;
    let inverse = inverse(a)?;
    let solution = multiply_vector(&inverse, b)?;
    Ok(InverseSolution { inverse, solution })
}

/// Index of the row at or below `col` with the largest magnitude in column
/// `col`. Ties go to the first such row.
pub(crate) fn select_pivot<T: RealField + Copy>(m: &DMatrix<T>, col: usize) -> usize {
    let mut best = col;
    for k in (col + 1)..m.nrows() {
        if m[(k, col)].abs() > m[(best, col)].abs() {
            best = k;
        }
    }
    best
}

/// `m[target] -= factor * m[pivot]` for columns `from..`.
pub(crate) fn subtract_row<T: RealField + Copy>(
    m: &mut DMatrix<T>,
    target: usize,
    pivot: usize,
    factor: T,
    from: usize,
) {
    for j in from..m.ncols() {
        let v = m[(pivot, j)];
        m[(target, j)] -= factor * v;
    }
}

// Brings the pivot of column `i` into place and checks it.
fn pivot<T: RealField + Copy>(
    aug: &mut DMatrix<T>,
    i: usize,
    steps: &mut Vec<EliminationStep<T>>,
) -> Result<(), LinalgError> {
    let p = select_pivot(aug, i);

    if p != i {
        debug!("swap rows {} and {}", i, p);
        aug.swap_rows(i, p);
        steps.push(EliminationStep::Swap { row: i, with: p });
    }

    if aug[(i, i)].abs() < convert(PIVOT_EPSILON) {
        debug!("pivot in column {} vanished", i);
        return Err(LinalgError::NoUniqueSolution { column: i });
    }

    Ok(())
}

fn augment<T: RealField + Copy>(a: &DMatrix<T>, b: &DVector<T>) -> DMatrix<T> {
    let n = a.nrows();
    DMatrix::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] })
}
