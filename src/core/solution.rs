//! Results of a run.

use std::error::Error as StdError;
use std::fmt;

use getset::Getters;

use super::trace::Trace;

/// How an iterative run ended without an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    /// The tolerance was satisfied.
    Converged(V),
    /// The iteration limit was reached first. The estimate is still the best
    /// value known and may be useful.
    NotConverged {
        /// Best estimate after the last iteration.
        estimate: V,
        /// Number of iterations performed.
        iterations: usize,
    },
}

/// Non-fatal finding reported alongside a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The matrix is not strictly diagonally dominant by rows, so the
    /// iterative method may not converge. Holds the offending rows.
    NotDiagonallyDominant {
        /// Zero-based indices of rows that violate the dominance.
        rows: Vec<usize>,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NotDiagonallyDominant { rows } => write!(
                f,
                "matrix is not diagonally dominant (rows {:?}), the method may not converge",
                rows
            ),
        }
    }
}

/// Result of an iterative run that did not fail.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Solution<V, R> {
    /// Converged value or best estimate.
    outcome: Outcome<V>,
    /// Full iteration history.
    trace: Trace<R>,
    /// Non-fatal findings about the input.
    advisories: Vec<Advisory>,
}

impl<V, R> Solution<V, R> {
    /// Creates a converged solution.
    pub fn converged(value: V, trace: Trace<R>, advisories: Vec<Advisory>) -> Self {
        Self {
            outcome: Outcome::Converged(value),
            trace,
            advisories,
        }
    }

    /// Creates a solution that hit the iteration limit.
    pub fn not_converged(estimate: V, trace: Trace<R>, advisories: Vec<Advisory>) -> Self {
        let iterations = trace.len();
        Self {
            outcome: Outcome::NotConverged {
                estimate,
                iterations,
            },
            trace,
            advisories,
        }
    }

    /// Determines whether the tolerance was satisfied.
    pub fn is_converged(&self) -> bool {
        matches!(self.outcome, Outcome::Converged(_))
    }

    /// The converged value or, if the run did not converge, the best
    /// estimate.
    pub fn value(&self) -> &V {
        match &self.outcome {
            Outcome::Converged(value) => value,
            Outcome::NotConverged { estimate, .. } => estimate,
        }
    }

    /// Number of iterations performed.
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    /// Unpacks the solution.
    pub fn into_parts(self) -> (Outcome<V>, Trace<R>, Vec<Advisory>) {
        (self.outcome, self.trace, self.advisories)
    }
}

/// Failure of an iterative run together with the history accumulated before
/// the failure.
#[derive(Debug, Clone)]
pub struct Failure<R, E> {
    error: E,
    trace: Trace<R>,
}

impl<R, E> Failure<R, E> {
    /// Creates the failure.
    pub fn new(error: E, trace: Trace<R>) -> Self {
        Self { error, trace }
    }

    /// Creates a failure that happened before the first iteration.
    pub fn before_start(error: E) -> Self {
        Self::new(error, Trace::new())
    }

    /// The reason of the failure.
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Iterations completed before the failure.
    pub fn trace(&self) -> &Trace<R> {
        &self.trace
    }

    /// Unpacks the failure.
    pub fn into_parts(self) -> (E, Trace<R>) {
        (self.error, self.trace)
    }
}

impl<R, E: fmt::Display> fmt::Display for Failure<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (after {} iteration(s))",
            self.error,
            self.trace.len()
        )
    }
}

impl<R: fmt::Debug, E: StdError + 'static> StdError for Failure<R, E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}

/// Result of running an iterative method.
pub type MethodResult<V, R, E> = Result<Solution<V, R>, Failure<R, E>>;
