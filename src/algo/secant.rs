//! Secant method.
//!
//! The [secant](https://en.wikipedia.org/wiki/Secant_method) method replaces
//! the derivative in Newton's method by the slope of the line through the two
//! latest iterates:
//!
//! ```text
//! x2 = x1 - f(x1) * (x1 - x0) / (f(x1) - f(x0))
//! ```
//!
//! It needs two seeds, but no bracket, and it converges superlinearly near a
//! simple root. It fails when the two function values are (numerically)
//! equal.

use getset::CopyGetters;
use log::debug;
use thiserror::Error;

use crate::core::{Failure, Function, Method, MethodResult, ProblemError, Record};
use crate::driver::{Driver, StopCriteria};

/// Minimal magnitude of `f(x1) - f(x0)`.
pub const MIN_SLOPE_DENOMINATOR: f64 = 1e-10;

/// Error returned from [`Secant`] method.
#[derive(Debug, Error)]
pub enum SecantError {
    /// `|f(x1) - f(x0)|` fell below [`MIN_SLOPE_DENOMINATOR`].
    #[error("division by zero: f(x1) - f(x0) vanished")]
    DivisionByZero,
    /// Error that occurred when evaluating the function.
    #[error("{0}")]
    Problem(#[from] ProblemError),
}

/// Record of one secant iteration.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SecantRecord {
    iter: usize,
    x0: f64,
    x1: f64,
    /// The new iterate.
    x2: f64,
    fx2: f64,
    /// `|x2 - x1|`.
    error: f64,
}

impl Record for SecantRecord {
    type Field = f64;

    fn iter(&self) -> usize {
        self.iter
    }

    fn error(&self) -> f64 {
        self.error
    }

    fn satisfies(&self, tolerance: f64) -> bool {
        self.error < tolerance || self.fx2.abs() < tolerance
    }
}

/// Secant method. See [module](self) documentation for more details.
pub struct Secant<F> {
    f: F,
    x0: f64,
    x1: f64,
    fx0: f64,
    fx1: f64,
}

impl<F: Function> Secant<F> {
    /// Initializes the method with two seeds.
    pub fn new(f: F, x0: f64, x1: f64) -> Result<Self, SecantError> {
        let fx0 = f.apply(x0)?;
        let fx1 = f.apply(x1)?;
        Ok(Self {
            f,
            x0,
            x1,
            fx0,
            fx1,
        })
    }
}

impl<F: Function> Method for Secant<F> {
    const NAME: &'static str = "Secant";

    type Field = f64;
    type Value = f64;
    type Record = SecantRecord;
    type Error = SecantError;

    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
        let Self {
            x0, x1, fx0, fx1, ..
        } = *self;

        let denom = fx1 - fx0;
        if denom.abs() < MIN_SLOPE_DENOMINATOR {
            debug!("secant slope vanished at x1 = {}", x1);
            return Err(SecantError::DivisionByZero);
        }

        let x2 = x1 - fx1 * (x1 - x0) / denom;
        let fx2 = self.f.apply(x2)?;

        self.x0 = x1;
        self.fx0 = fx1;
        self.x1 = x2;
        self.fx1 = fx2;

        Ok(SecantRecord {
            iter,
            x0,
            x1,
            x2,
            fx2,
            error: (x2 - x1).abs(),
        })
    }

    fn current(&self) -> f64 {
        self.x1
    }
}

/// Runs the secant method from seeds `x0` and `x1` with given criteria.
pub fn secant<F: Function>(
    f: F,
    x0: f64,
    x1: f64,
    criteria: StopCriteria<f64>,
) -> MethodResult<f64, SecantRecord, SecantError> {
    let method = Secant::new(f, x0, x1).map_err(Failure::before_start)?;
    Driver::new(method).with_criteria(criteria).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::Expression;
    use crate::testing::Cubic;

    #[test]
    fn cubic_root() {
        let f = Cubic;
        let solution = secant(&f, 1.0, 2.0, StopCriteria::default()).unwrap();

        assert!(solution.is_converged());
        assert!(solution.iterations() < 10);
        assert_relative_eq!(*solution.value(), 1.5213797, epsilon = 1e-4);
    }

    #[test]
    fn first_record() {
        let f = Cubic;
        let solution = secant(&f, 1.0, 2.0, StopCriteria::default()).unwrap();
        let first = solution.trace()[0];

        // f(1) = -2, f(2) = 4, so x2 = 2 - 4 * 1 / 6.
        assert_eq!(first.iter(), 1);
        assert_eq!(first.x0(), 1.0);
        assert_eq!(first.x1(), 2.0);
        assert_relative_eq!(first.x2(), 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(first.error(), 2.0 / 3.0, epsilon = 1e-12);

        let second = solution.trace()[1];
        assert_eq!(second.x0(), 2.0);
        assert_eq!(second.x1(), first.x2());
    }

    #[test]
    fn equal_values_fail_immediately() {
        let f = Expression::parse("x^2").unwrap();
        let failure = secant(&f, -1.0, 1.0, StopCriteria::default()).unwrap_err();

        assert!(matches!(failure.error(), SecantError::DivisionByZero));
        assert!(failure.trace().is_empty());
    }

    #[test]
    fn failure_keeps_partial_trace() {
        // Flat for negative x, so the iterates eventually land on the plateau.
        let f = Expression::parse("(x + sqrt(x^2)) / 2 + 1").unwrap();
        let failure = secant(&f, 1.0, 2.0, StopCriteria::default()).unwrap_err();

        assert!(matches!(failure.error(), SecantError::DivisionByZero));
        assert_eq!(failure.trace().len(), 2);
        assert_relative_eq!(failure.trace()[0].x2(), -1.0);
        assert_relative_eq!(failure.trace()[1].x2(), -2.5);
    }

    #[test]
    fn not_converged_returns_last_iterate() {
        let f = Cubic;
        let solution = secant(&f, 1.0, 2.0, StopCriteria::new(0.0, 2)).unwrap();

        assert!(!solution.is_converged());
        assert_eq!(solution.trace().len(), 2);
        assert_eq!(*solution.value(), solution.trace()[1].x2());
    }
}
