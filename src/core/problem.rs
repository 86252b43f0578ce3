//! Abstractions for the equations being solved.
//!
//! # Defining a system
//!
//! A system is any type that implements [`System`]. Most of the time, the
//! equations come as text and [`EquationSystem`] is all that is needed, but
//! custom types work just as well.
//!
//! ```rust
//! use stepwise::nalgebra::DVector;
//! use stepwise::{ProblemError, System};
//!
//! struct Circle {
//!     radius: f64,
//! }
//!
//! impl System for Circle {
//!     fn dim(&self) -> usize {
//!         2
//!     }
//!
//!     fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError> {
//!         fx[0] = x[0].powi(2) + x[1].powi(2) - self.radius.powi(2);
//!         fx[1] = x[0] * x[1] - 1.0;
//!         Ok(())
//!     }
//! }
//! ```

use nalgebra::DVector;
use thiserror::Error;

use crate::expr::{EvaluationError, Expression, VARIABLES};

/// Error encountered while evaluating a function or a system.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// The number of variables does not match the dimension of the system.
    #[error("invalid dimensionality")]
    InvalidDimensionality,
    /// An expression could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// A custom error specific to the function or the system.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// Real function of one variable, f: R -> R.
pub trait Function {
    /// Calculates the function value at `x`.
    fn apply(&self, x: f64) -> Result<f64, ProblemError>;
}

/// System of `n` equations in `n` unknowns, F: R^n -> R^n.
pub trait System {
    /// Number of equations, which equals the number of variables.
    fn dim(&self) -> usize;

    /// Calculates the values of all equations given the values of variables.
    fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError>;
}

impl Function for Expression {
    fn apply(&self, x: f64) -> Result<f64, ProblemError> {
        Ok(self.eval(&[x])?)
    }
}

impl<F: Function + ?Sized> Function for &F {
    fn apply(&self, x: f64) -> Result<f64, ProblemError> {
        (**self).apply(x)
    }
}

impl<S: System + ?Sized> System for &S {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError> {
        (**self).eval(x, fx)
    }
}

/// System given by one expression per equation.
///
/// Equation `i` is evaluated with the first `n` variables of
/// [`VARIABLES`] bound, where `n` is the number of equations. Because the
/// alphabet has four symbols, at most four equations are allowed.
#[derive(Debug, Clone)]
pub struct EquationSystem {
    equations: Vec<Expression>,
}

impl EquationSystem {
    /// Creates the system from already parsed expressions.
    ///
    /// Fails if there are no equations, more equations than variable symbols,
    /// or if an equation uses a variable beyond the system dimension.
    pub fn new(equations: Vec<Expression>) -> Result<Self, ProblemError> {
        let n = equations.len();

        if n == 0 || n > VARIABLES.len() {
            return Err(ProblemError::InvalidDimensionality);
        }

        if let Some(expr) = equations.iter().find(|expr| expr.arity() > n) {
            return Err(EvaluationError::UnboundVariable {
                name: VARIABLES[expr.arity() - 1],
                bound: n,
            }
            .into());
        }

        Ok(Self { equations })
    }

    /// Parses the equations and creates the system.
    pub fn parse<S: AsRef<str>>(equations: &[S]) -> Result<Self, ProblemError> {
        let equations = equations
            .iter()
            .map(|source| Expression::parse(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(equations)
    }

    /// The equations of the system.
    pub fn equations(&self) -> &[Expression] {
        &self.equations
    }
}

impl System for EquationSystem {
    fn dim(&self) -> usize {
        self.equations.len()
    }

    fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError> {
        if x.len() != self.dim() || fx.len() != self.dim() {
            return Err(ProblemError::InvalidDimensionality);
        }

        for (fxi, expr) in fx.iter_mut().zip(self.equations.iter()) {
            *fxi = expr.eval(x.as_slice())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dvector;

    #[test]
    fn expression_as_function() {
        let f = Expression::parse("x^3 - x - 2").unwrap();
        assert_eq!(f.apply(2.0).unwrap(), 4.0);
    }

    #[test]
    fn expression_function_with_two_variables() {
        let f = Expression::parse("x + y").unwrap();
        assert!(matches!(
            f.apply(1.0),
            Err(ProblemError::Evaluation(
                EvaluationError::UnboundVariable { .. }
            ))
        ));
    }

    #[test]
    fn equation_system_eval() {
        let f = EquationSystem::parse(&["x^2 + y^2 - 4", "x*y - 1"]).unwrap();
        let x = dvector![2.0, 0.5];
        let mut fx = dvector![0.0, 0.0];
        f.eval(&x, &mut fx).unwrap();

        assert_eq!(f.dim(), 2);
        assert_eq!(fx, dvector![0.25, 0.0]);
    }

    #[test]
    fn equation_system_rejects_foreign_variable() {
        let result = EquationSystem::parse(&["x + z", "y"]);
        assert!(matches!(
            result,
            Err(ProblemError::Evaluation(EvaluationError::UnboundVariable {
                name: "z",
                bound: 2
            }))
        ));
    }

    #[test]
    fn equation_system_dimension_bounds() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            EquationSystem::parse(&empty),
            Err(ProblemError::InvalidDimensionality)
        ));
        assert!(matches!(
            EquationSystem::parse(&["x", "y", "z", "w", "x"]),
            Err(ProblemError::InvalidDimensionality)
        ));
    }

    #[test]
    fn equation_system_checks_input_length() {
        let f = EquationSystem::parse(&["x", "y"]).unwrap();
        let x = dvector![1.0, 2.0, 3.0];
        let mut fx = dvector![0.0, 0.0, 0.0];
        assert!(matches!(
            f.eval(&x, &mut fx),
            Err(ProblemError::InvalidDimensionality)
        ));
    }
}
