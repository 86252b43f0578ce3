//! Bisection method.
//!
//! [Bisection](https://en.wikipedia.org/wiki/Bisection_method) halves an
//! interval `[a, b]` on which the function changes sign. Every iteration
//! evaluates the midpoint `c = (a + b) / 2` and keeps the half where the sign
//! change is, so the error bound `|b - a| / 2` halves each time. The method
//! always converges for a continuous function with a valid bracket, but
//! slowly.
//!
//! ```rust
//! use stepwise::algo::bisection;
//! use stepwise::expr::Expression;
//! use stepwise::StopCriteria;
//!
//! let f = Expression::parse("x^3 - x - 2").unwrap();
//! let solution = bisection(&f, 1.0, 2.0, StopCriteria::default()).unwrap();
//!
//! assert!(solution.is_converged());
//! assert!((solution.value() - 1.5213797).abs() < 1e-4);
//! ```

use getset::CopyGetters;
use log::debug;
use thiserror::Error;

use crate::core::{Failure, Function, Method, MethodResult, ProblemError, Record};
use crate::driver::{Driver, StopCriteria};

/// Error returned from [`Bisection`] method.
#[derive(Debug, Error)]
pub enum BisectionError {
    /// The function does not change sign on the interval.
    #[error("invalid bracket: f(a) * f(b) > 0")]
    InvalidBracket,
    /// Error that occurred when evaluating the function.
    #[error("{0}")]
    Problem(#[from] ProblemError),
}

/// Record of one bisection iteration. The bracket is the one before the
/// iteration narrowed it.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct BracketRecord {
    /// Iteration index.
    iter: usize,
    /// Lower end `a` of the bracket.
    lower: f64,
    /// Upper end `b` of the bracket.
    upper: f64,
    /// Midpoint `c`.
    midpoint: f64,
    /// `f(c)`.
    f_midpoint: f64,
    /// `|b - a| / 2`.
    error: f64,
}

impl Record for BracketRecord {
    type Field = f64;

    fn iter(&self) -> usize {
        self.iter
    }

    fn error(&self) -> f64 {
        self.error
    }

    /// Either the error bound or the function value at the midpoint is below
    /// the tolerance.
    fn satisfies(&self, tolerance: f64) -> bool {
        self.error < tolerance || self.f_midpoint.abs() < tolerance
    }
}

/// Bisection method. See [module](self) documentation for more details.
pub struct Bisection<F> {
    f: F,
    a: f64,
    b: f64,
    fa: f64,
    c: f64,
}

impl<F: Function> Bisection<F> {
    /// Initializes the method with the bracket `[a, b]`.
    ///
    /// Fails with [`InvalidBracket`](BisectionError::InvalidBracket) unless
    /// `f(a) * f(b) <= 0`.
    pub fn new(f: F, a: f64, b: f64) -> Result<Self, BisectionError> {
        let fa = f.apply(a)?;
        let fb = f.apply(b)?;

        // Written this way so that NaN is rejected too.
        if !(fa * fb <= 0.0) {
            return Err(BisectionError::InvalidBracket);
        }

        Ok(Self {
            f,
            a,
            b,
            fa,
            c: 0.5 * (a + b),
        })
    }

    /// Current bracket.
    pub fn bracket(&self) -> (f64, f64) {
        (self.a, self.b)
    }
}

impl<F: Function> Method for Bisection<F> {
    const NAME: &'static str = "Bisection";

    type Field = f64;
    type Value = f64;
    type Record = BracketRecord;
    type Error = BisectionError;

    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
        let Self { a, b, fa, .. } = *self;

        let c = 0.5 * (a + b);
        let fc = self.f.apply(c)?;
        let error = (b - a).abs() / 2.0;

        self.c = c;

        if fa * fc < 0.0 {
            self.b = c;
        } else {
            self.a = c;
            self.fa = fc;
        }

        debug!("bracket narrowed to [{}, {}]", self.a, self.b);

        Ok(BracketRecord {
            iter,
            lower: a,
            upper: b,
            midpoint: c,
            f_midpoint: fc,
            error,
        })
    }

    fn current(&self) -> f64 {
        self.c
    }

    /// Midpoint of the final bracket.
    fn estimate(&self) -> f64 {
        0.5 * (self.a + self.b)
    }
}

/// Runs the bisection on `[a, b]` with given criteria.
pub fn bisection<F: Function>(
    f: F,
    a: f64,
    b: f64,
    criteria: StopCriteria<f64>,
) -> MethodResult<f64, BracketRecord, BisectionError> {
    let method = Bisection::new(f, a, b).map_err(Failure::before_start)?;
    Driver::new(method).with_criteria(criteria).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::core::Outcome;
    use crate::expr::Expression;
    use crate::testing::Cubic;

    #[test]
    fn cubic_root() {
        let f = Cubic;
        let solution = bisection(&f, 1.0, 2.0, StopCriteria::default()).unwrap();

        assert!(solution.is_converged());
        assert!(solution.iterations() <= 50);
        assert_relative_eq!(*solution.value(), 1.5213797, epsilon = 1e-4);
    }

    #[test]
    fn bracket_halves() {
        let f = Cubic;
        let solution = bisection(&f, 1.0, 2.0, StopCriteria::default()).unwrap();
        let records = solution.trace().as_slice();

        assert_relative_eq!(records[0].lower(), 1.0);
        assert_relative_eq!(records[0].upper(), 2.0);
        assert_relative_eq!(records[0].midpoint(), 1.5);
        assert_relative_eq!(records[0].error(), 0.5);

        for pair in records.windows(2) {
            let before = pair[0].upper() - pair[0].lower();
            let after = pair[1].upper() - pair[1].lower();
            assert_relative_eq!(after, before / 2.0, epsilon = 1e-15);
            assert_eq!(pair[1].iter(), pair[0].iter() + 1);
        }
    }

    #[test]
    fn invalid_bracket() {
        let f = Cubic;
        let failure = bisection(&f, 2.0, 3.0, StopCriteria::default()).unwrap_err();

        assert!(matches!(failure.error(), BisectionError::InvalidBracket));
        assert!(failure.trace().is_empty());
    }

    #[test]
    fn nan_bracket_is_invalid() {
        let f = Expression::parse("sqrt(x)").unwrap();
        assert!(matches!(
            Bisection::new(&f, -1.0, 1.0),
            Err(BisectionError::InvalidBracket)
        ));
    }

    #[test]
    fn not_converged_returns_bracket_midpoint() {
        let f = Cubic;
        let criteria = StopCriteria::new(1e-12, 3);
        let solution = bisection(&f, 1.0, 2.0, criteria).unwrap();

        assert_eq!(solution.trace().len(), 3);
        // [1, 2] -> [1.5, 2] -> [1.5, 1.75] -> [1.5, 1.625]
        assert_eq!(
            solution.outcome(),
            &Outcome::NotConverged {
                estimate: 1.5625,
                iterations: 3
            }
        );
    }

    #[test]
    fn stops_on_small_function_value() {
        let f = Expression::parse("x - 1.5").unwrap();
        let solution = bisection(&f, 1.0, 2.0, StopCriteria::default()).unwrap();

        assert!(solution.is_converged());
        assert_eq!(solution.iterations(), 1);
        assert_eq!(*solution.value(), 1.5);
    }
}
