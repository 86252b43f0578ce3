//! High-level API for running iterative methods.
//!
//! The [`Driver`] owns a [method](crate::Method) and the stopping criteria. It
//! runs the iterations, records each of them in a fresh
//! [`Trace`](crate::Trace) and classifies the end of the run.
//!
//! The simplest way is to use the defaults (tolerance `1e-4`, at most 50
//! iterations):
//!
//! ```rust
//! use stepwise::algo::Bisection;
//! use stepwise::expr::Expression;
//! use stepwise::Driver;
//!
//! let f = Expression::parse("x^3 - x - 2").unwrap();
//! let bisection = Bisection::new(&f, 1.0, 2.0).unwrap();
//!
//! let solution = Driver::new(bisection).run().unwrap();
//! assert!(solution.is_converged());
//! assert!((solution.value() - 1.5213797).abs() < 1e-4);
//! ```
//!
//! If you need other settings, pass them explicitly:
//!
//! ```rust
//! # use stepwise::algo::Bisection;
//! # use stepwise::expr::Expression;
//! use stepwise::{Driver, StopCriteria};
//!
//! # let f = Expression::parse("x^3 - x - 2").unwrap();
//! # let bisection = Bisection::new(&f, 1.0, 2.0).unwrap();
//! let criteria = StopCriteria::default()
//!     .with_tolerance(1e-10)
//!     .with_max_iters(5);
//!
//! let solution = Driver::new(bisection).with_criteria(criteria).run().unwrap();
//! assert!(!solution.is_converged());
//! assert_eq!(solution.trace().len(), 5);
//! ```

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, RealField};

use crate::core::{Failure, Method, MethodResult, Record, Solution, Trace};

/// Default tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default maximum number of iterations.
pub const DEFAULT_MAX_ITERS: usize = 50;

/// Stopping criteria of an iterative run.
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct StopCriteria<T: RealField + Copy> {
    /// Tolerance of the error of an iteration. Default: `1e-4`.
    tolerance: T,
    /// Hard upper bound on the number of iterations. Default: `50`.
    max_iters: usize,
}

impl<T: RealField + Copy> StopCriteria<T> {
    /// Creates the criteria.
    pub fn new(tolerance: T, max_iters: usize) -> Self {
        Self {
            tolerance,
            max_iters,
        }
    }

    /// Replaces the tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the maximum number of iterations.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

impl<T: RealField + Copy> Default for StopCriteria<T> {
    fn default() -> Self {
        Self {
            tolerance: convert(DEFAULT_TOLERANCE),
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

/// The driver for the process of running an iterative method.
///
/// See [module](self) documentation for the usage.
pub struct Driver<M: Method> {
    method: M,
    criteria: StopCriteria<M::Field>,
}

impl<M: Method> Driver<M> {
    /// Initializes the driver with default criteria.
    pub fn new(method: M) -> Self {
        Self {
            method,
            criteria: StopCriteria::default(),
        }
    }

    /// Sets the stopping criteria.
    pub fn with_criteria(mut self, criteria: StopCriteria<M::Field>) -> Self {
        self.criteria = criteria;
        self
    }

    /// Returns the stopping criteria.
    pub fn criteria(&self) -> &StopCriteria<M::Field> {
        &self.criteria
    }

    /// Returns the name of the used method.
    pub fn name(&self) -> &str {
        self.method.name()
    }

    /// Runs the method until its record satisfies the tolerance, the maximum
    /// number of iterations is reached or an iteration fails.
    ///
    /// Reaching the limit is not an error: the solution then holds the best
    /// estimate and exactly `max_iters` records.
    pub fn run(mut self) -> MethodResult<M::Value, M::Record, M::Error> {
        let StopCriteria {
            tolerance,
            max_iters,
        } = self.criteria;

        let name = self.method.name();
        let advisories = self.method.advisories();
        let mut trace = Trace::with_capacity(max_iters.min(1024));

        for iter in 1..=max_iters {
            let record = match self.method.next(iter) {
                Ok(record) => record,
                Err(error) => {
                    debug!("{}: iteration {} failed", name, iter);
                    return Err(Failure::new(error, trace));
                }
            };

            let done = record.satisfies(tolerance);
            debug!("{}: iter = {}\terror = {}", name, iter, record.error());
            trace.push(record);

            if done {
                return Ok(Solution::converged(
                    self.method.current(),
                    trace,
                    advisories,
                ));
            }
        }

        debug!("{}: no convergence in {} iterations", name, max_iters);
        Ok(Solution::not_converged(
            self.method.estimate(),
            trace,
            advisories,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::Advisory;

    // Halves the error every iteration and fails on request.
    struct Halving {
        x: f64,
        fail_at: Option<usize>,
    }

    #[derive(Debug, PartialEq)]
    struct HalvingRecord {
        iter: usize,
        error: f64,
    }

    impl Record for HalvingRecord {
        type Field = f64;

        fn iter(&self) -> usize {
            self.iter
        }

        fn error(&self) -> f64 {
            self.error
        }
    }

    impl Method for Halving {
        const NAME: &'static str = "Halving";
        type Field = f64;
        type Value = f64;
        type Record = HalvingRecord;
        type Error = &'static str;

        fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
            if self.fail_at == Some(iter) {
                return Err("failed");
            }

            self.x /= 2.0;
            Ok(HalvingRecord {
                iter,
                error: self.x,
            })
        }

        fn current(&self) -> f64 {
            self.x
        }

        fn advisories(&self) -> Vec<Advisory> {
            vec![Advisory::NotDiagonallyDominant { rows: vec![0] }]
        }
    }

    #[test]
    fn converges() {
        let method = Halving {
            x: 1.0,
            fail_at: None,
        };
        let solution = Driver::new(method)
            .with_criteria(StopCriteria::new(0.1, 50))
            .run()
            .unwrap();

        assert!(solution.is_converged());
        // 1/16 < 0.1 is the first one.
        assert_eq!(solution.iterations(), 4);
        assert_eq!(*solution.value(), 0.0625);
        assert_eq!(solution.advisories().len(), 1);

        let indices: Vec<_> = solution.trace().iter().map(|r| r.iter()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn not_converged_exactly_max_iters() {
        for max_iters in [0, 1, 7, 50] {
            let method = Halving {
                x: 1.0,
                fail_at: None,
            };
            let solution = Driver::new(method)
                .with_criteria(StopCriteria::new(0.0, max_iters))
                .run()
                .unwrap();

            assert!(!solution.is_converged());
            assert_eq!(solution.trace().len(), max_iters);
        }
    }

    #[test]
    fn failure_keeps_partial_trace() {
        let method = Halving {
            x: 1.0,
            fail_at: Some(3),
        };
        let failure = Driver::new(method)
            .with_criteria(StopCriteria::new(0.0, 10))
            .run()
            .unwrap_err();

        assert_eq!(*failure.error(), "failed");
        assert_eq!(failure.trace().len(), 2);
    }

    #[test]
    fn default_criteria() {
        let criteria = StopCriteria::<f64>::default();
        assert_eq!(criteria.tolerance(), 1e-4);
        assert_eq!(criteria.max_iters(), 50);

        let mut criteria = criteria.with_max_iters(10);
        criteria.set_tolerance(1e-8);
        assert_eq!(criteria.tolerance(), 1e-8);
        assert_eq!(criteria.max_iters(), 10);
    }
}
