//! Newton-Raphson method for systems of equations.
//!
//! [Newton's method](https://en.wikipedia.org/wiki/Newton%27s_method) solves
//! the linearization `J(x) * d = -F(x)` in every iteration and updates
//! `x <- x + d`. The Jacobian matrix is approximated by forward differences
//! (see [`Jacobian`]) and the linear system is solved by
//! [Gauss elimination](crate::linalg::gauss) with partial pivoting.
//!
//! The modified variant computes the Jacobian only in the initial point and
//! keeps it for all iterations. Each iteration is then cheaper, but the
//! convergence is only linear.
//!
//! ```rust
//! use stepwise::algo::newton::{newton, NewtonOptions};
//! use stepwise::nalgebra::dvector;
//! use stepwise::{EquationSystem, StopCriteria};
//!
//! let f = EquationSystem::parse(&["x^2 + y^2 - 4", "x*y - 1"]).unwrap();
//! let solution = newton(
//!     &f,
//!     dvector![2.0, 0.5],
//!     NewtonOptions::default(),
//!     StopCriteria::default(),
//! )
//! .unwrap();
//!
//! assert!(solution.is_converged());
//! ```

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::DVector;
use thiserror::Error;

use super::{max_abs, VectorRecord};
use crate::core::{Failure, Method, MethodResult, ProblemError, System};
use crate::derivatives::{Jacobian, DEFAULT_STEP};
use crate::driver::{Driver, StopCriteria};
use crate::linalg::{gauss, LinalgError};

/// Variant of the Newton-Raphson method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NewtonVariant {
    /// Recomputes the Jacobian matrix in every iteration.
    Standard,
    /// Computes the Jacobian matrix once in the initial point.
    Modified,
}

/// Options for [`Newton`] method.
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonOptions {
    /// Variant of the method. Default: standard (see [`NewtonVariant`]).
    variant: NewtonVariant,
    /// Step of the forward difference. Default: `1e-7`.
    step: f64,
}

impl NewtonOptions {
    /// Options of the modified variant.
    pub fn modified() -> Self {
        Self {
            variant: NewtonVariant::Modified,
            ..Self::default()
        }
    }
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            variant: NewtonVariant::Standard,
            step: DEFAULT_STEP,
        }
    }
}

/// Error returned from [`Newton`] method.
#[derive(Debug, Error)]
pub enum NewtonError {
    /// The linearized system has no unique solution.
    #[error("singular Jacobian matrix")]
    SingularJacobian,
    /// Error that occurred when evaluating the system.
    #[error("{0}")]
    Problem(#[from] ProblemError),
}

/// Newton-Raphson method. See [module](self) documentation for more details.
pub struct Newton<F> {
    f: F,
    options: NewtonOptions,
    x: DVector<f64>,
    fx: DVector<f64>,
    jac: Jacobian,
    computed: bool,
}

impl<F: System> Newton<F> {
    /// Initializes the method with default options.
    pub fn new(f: F, x0: DVector<f64>) -> Result<Self, NewtonError> {
        Self::with_options(f, x0, NewtonOptions::default())
    }

    /// Initializes the method with given options.
    pub fn with_options(
        f: F,
        x0: DVector<f64>,
        options: NewtonOptions,
    ) -> Result<Self, NewtonError> {
        if x0.len() != f.dim() {
            return Err(ProblemError::InvalidDimensionality.into());
        }

        let fx = DVector::zeros(f.dim());
        let jac = Jacobian::zeros(&f);

        Ok(Self {
            f,
            options,
            x: x0,
            fx,
            jac,
            computed: false,
        })
    }

    /// Residuals `F(x)` evaluated at the start of the latest iteration.
    pub fn residuals(&self) -> &DVector<f64> {
        &self.fx
    }
}

impl<F: System> Method for Newton<F> {
    const NAME: &'static str = "Newton-Raphson";

    type Field = f64;
    type Value = DVector<f64>;
    type Record = VectorRecord<f64>;
    type Error = NewtonError;

    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
        let NewtonOptions { variant, step } = self.options;

        self.f.eval(&self.x, &mut self.fx)?;

        if variant == NewtonVariant::Standard || !self.computed {
            self.jac.compute(&self.f, &mut self.x, &self.fx, step)?;
            self.computed = true;
        }

        let rhs = -&self.fx;
        let delta = match gauss(&*self.jac, &rhs) {
            Ok(elimination) => elimination.into_solution(),
            Err(LinalgError::NoUniqueSolution { column }) => {
                debug!("Jacobian has zero pivot in column {}", column);
                return Err(NewtonError::SingularJacobian);
            }
            Err(err) => {
                debug!("linear solve failed: {}", err);
                return Err(NewtonError::SingularJacobian);
            }
        };

        self.x += &delta;

        let error = max_abs(delta.iter().copied());
        Ok(VectorRecord::new(iter, self.x.clone(), error))
    }

    fn current(&self) -> DVector<f64> {
        self.x.clone()
    }
}

/// Runs the Newton-Raphson method from `x0` with given options and criteria.
pub fn newton<F: System>(
    f: F,
    x0: DVector<f64>,
    options: NewtonOptions,
    criteria: StopCriteria<f64>,
) -> MethodResult<DVector<f64>, VectorRecord<f64>, NewtonError> {
    let method = Newton::with_options(f, x0, options).map_err(Failure::before_start)?;
    Driver::new(method).with_criteria(criteria).run()
}
