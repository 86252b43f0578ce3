//! Jacobi and Gauss-Seidel iterations for linear systems.
//!
//! Both methods start from the zero vector and solve every equation for its
//! diagonal unknown:
//!
//! ```text
//! x_i(k+1) = (b_i - sum_{j != i} A[i][j] * x_j) / A[i][i]
//! ```
//!
//! [Jacobi](https://en.wikipedia.org/wiki/Jacobi_method) takes all `x_j` from
//! the previous iterate, while
//! [Gauss-Seidel](https://en.wikipedia.org/wiki/Gauss%E2%80%93Seidel_method)
//! uses the components already updated in the current sweep. The error of an
//! iteration is the largest change of a component.
//!
//! Strict diagonal dominance of `A` guarantees convergence. If the matrix is
//! not dominant, the method still runs, but the result carries an
//! [advisory](crate::Advisory) listing the offending rows. The one exception
//! is a zero on the diagonal: the update divides by it, so such a matrix is
//! rejected up front with [`ZeroDiagonal`](LinalgError::ZeroDiagonal)
//! instead of producing an advisory. Iterates that overflow or turn NaN never
//! satisfy the tolerance, so a divergent run ends as not converged.
//!
//! ```rust
//! use stepwise::algo::jacobi;
//! use stepwise::nalgebra::{dmatrix, dvector};
//! use stepwise::StopCriteria;
//!
//! let a = dmatrix![
//!     4.0, 1.0;
//!     2.0, 5.0
//! ];
//! let b = dvector![6.0, 9.0];
//!
//! let solution = jacobi(&a, &b, StopCriteria::default()).unwrap();
//! assert!(solution.is_converged());
//! assert!(solution.advisories().is_empty());
//! ```

use std::convert::Infallible;

use getset::{CopyGetters, Setters};
use log::warn;
use nalgebra::{DMatrix, DVector, RealField};

use super::{max_change, VectorRecord};
use crate::analysis::diagonal_dominance;
use crate::core::{Advisory, Method, Solution};
use crate::driver::{Driver, StopCriteria};
use crate::linalg::{check_system, LinalgError};

/// Variant of the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum JacobiVariant {
    /// Every component is computed from the previous iterate.
    Jacobi,
    /// Components updated in the current sweep are used immediately.
    GaussSeidel,
}

/// Options for [`Jacobi`] method.
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct JacobiOptions {
    /// Variant of the iteration. Default: Jacobi (see [`JacobiVariant`]).
    variant: JacobiVariant,
}

impl JacobiOptions {
    /// Options of the Gauss-Seidel variant.
    pub fn gauss_seidel() -> Self {
        Self {
            variant: JacobiVariant::GaussSeidel,
        }
    }
}

impl Default for JacobiOptions {
    fn default() -> Self {
        Self {
            variant: JacobiVariant::Jacobi,
        }
    }
}

/// Jacobi or Gauss-Seidel iteration. See [module](self) documentation for
/// more details.
pub struct Jacobi<T: RealField + Copy> {
    options: JacobiOptions,
    a: DMatrix<T>,
    b: DVector<T>,
    x: DVector<T>,
    x_prev: DVector<T>,
    offending: Vec<usize>,
}

impl<T: RealField + Copy> Jacobi<T> {
    /// Initializes the Jacobi iteration.
    pub fn new(a: &DMatrix<T>, b: &DVector<T>) -> Result<Self, LinalgError> {
        Self::with_options(a, b, JacobiOptions::default())
    }

    /// Initializes the iteration with given options.
    ///
    /// Fails if the shapes do not form a square system or if there is a zero
    /// on the diagonal.
    pub fn with_options(
        a: &DMatrix<T>,
        b: &DVector<T>,
        options: JacobiOptions,
    ) -> Result<Self, LinalgError> {
        let n = check_system(a, b)?;

        if let Some(row) = (0..n).find(|&i| a[(i, i)] == T::zero()) {
            return Err(LinalgError::ZeroDiagonal { row });
        }

        let offending = diagonal_dominance(a)?;
        if !offending.is_empty() {
            warn!(
                "matrix is not diagonally dominant in rows {:?}, the iteration may not converge",
                offending
            );
        }

        Ok(Self {
            options,
            a: a.clone_owned(),
            b: b.clone_owned(),
            x: DVector::zeros(n),
            x_prev: DVector::zeros(n),
            offending,
        })
    }
}

impl<T: RealField + Copy> Method for Jacobi<T> {
    const NAME: &'static str = "Jacobi";

    type Field = T;
    type Value = DVector<T>;
    type Record = VectorRecord<T>;
    type Error = Infallible;

    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
        let Self {
            options,
            a,
            b,
            x,
            x_prev,
            ..
        } = self;

        x_prev.copy_from(&*x);

        for i in 0..a.nrows() {
            let mut sum = b[i];
            for j in (0..a.ncols()).filter(|&j| j != i) {
                // Gauss-Seidel reads the components updated in this sweep.
                let xj = match options.variant {
                    JacobiVariant::Jacobi => x_prev[j],
                    JacobiVariant::GaussSeidel => x[j],
                };
                sum -= a[(i, j)] * xj;
            }
            x[i] = sum / a[(i, i)];
        }

        let error = max_change(&*x, &*x_prev);
        Ok(VectorRecord::new(iter, x.clone(), error))
    }

    fn name(&self) -> &'static str {
        match self.options.variant {
            JacobiVariant::Jacobi => Self::NAME,
            JacobiVariant::GaussSeidel => "Gauss-Seidel",
        }
    }

    fn current(&self) -> DVector<T> {
        self.x.clone()
    }

    fn advisories(&self) -> Vec<Advisory> {
        if self.offending.is_empty() {
            Vec::new()
        } else {
            vec![Advisory::NotDiagonallyDominant {
                rows: self.offending.clone(),
            }]
        }
    }
}

/// Solution of a linear system by an iterative method.
pub type IterativeSolution<T> = Solution<DVector<T>, VectorRecord<T>>;

/// Runs the Jacobi iteration on `Ax = b` with given criteria.
///
/// The iterations themselves cannot fail, so the only errors are those of an
/// invalid system.
pub fn jacobi<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
    criteria: StopCriteria<T>,
) -> Result<IterativeSolution<T>, LinalgError> {
    run(Jacobi::with_options(a, b, JacobiOptions::default())?, criteria)
}

/// Runs the Gauss-Seidel iteration on `Ax = b` with given criteria.
pub fn gauss_seidel<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
    criteria: StopCriteria<T>,
) -> Result<IterativeSolution<T>, LinalgError> {
    run(
        Jacobi::with_options(a, b, JacobiOptions::gauss_seidel())?,
        criteria,
    )
}

fn run<T: RealField + Copy>(
    method: Jacobi<T>,
    criteria: StopCriteria<T>,
) -> Result<IterativeSolution<T>, LinalgError> {
    match Driver::new(method).with_criteria(criteria).run() {
        Ok(solution) => Ok(solution),
        Err(failure) => {
            let (never, _) = failure.into_parts();
            match never {}
        }
    }
}
