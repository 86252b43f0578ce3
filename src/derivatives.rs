//! Tools for derivative-based methods.

use std::ops::Deref;

use nalgebra::{DMatrix, DVector};

use crate::core::{ProblemError, System};

/// Default step of the forward difference.
pub const DEFAULT_STEP: f64 = 1e-7;

/// Jacobian matrix of a system approximated by forward finite differences.
#[derive(Debug, Clone)]
pub struct Jacobian {
    jac: DMatrix<f64>,
}

impl Jacobian {
    /// Initializes the Jacobian matrix with zeros.
    pub fn zeros<F: System>(f: &F) -> Self {
        Self {
            jac: DMatrix::zeros(f.dim(), f.dim()),
        }
    }

    /// Computes the Jacobian matrix of the system in given point. See
    /// [`compute`](Jacobian::compute) for more details.
    pub fn new<F: System>(
        f: &F,
        x: &mut DVector<f64>,
        fx: &DVector<f64>,
        step: f64,
    ) -> Result<Self, ProblemError> {
        let mut jac = Self::zeros(f);
        jac.compute(f, x, fx, step)?;
        Ok(jac)
    }

    /// Computes the Jacobian matrix of the system in given point,
    /// `J[i][j] = (F_i(x + h * e_j) - F_i(x)) / h`, where `fx` holds `F(x)`.
    ///
    /// The parameter `x` is mutable to allow temporary mutations avoiding
    /// unnecessary allocations, but after this method ends, the content of the
    /// vector is exactly the same as before.
    pub fn compute<F: System>(
        &mut self,
        f: &F,
        x: &mut DVector<f64>,
        fx: &DVector<f64>,
        step: f64,
    ) -> Result<&mut Self, ProblemError> {
        let mut col = DVector::zeros(f.dim());

        for j in 0..f.dim() {
            let xj = x[j];

            // Update the point.
            x[j] = xj + step;
            let result = f.eval(x, &mut col);

            // Restore the original value before propagating an error.
            x[j] = xj;
            result?;

            col -= fx;
            col /= step;
            self.jac.set_column(j, &col);
        }

        Ok(self)
    }

    /// Unpacks the matrix.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.jac
    }
}

impl Deref for Jacobian {
    type Target = DMatrix<f64>;

    fn deref(&self) -> &Self::Target {
        &self.jac
    }
}
