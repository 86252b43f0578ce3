use nalgebra::RealField;

use super::solution::Advisory;

/// One entry of the iteration history.
///
/// The concrete fields depend on the method, but every record knows its
/// 1-based iteration index and the scalar error used for the stopping test.
pub trait Record {
    /// Type of the scalar, usually f64.
    type Field: RealField + Copy;

    /// Iteration index, starting at 1.
    fn iter(&self) -> usize;

    /// Error or residual magnitude of the iteration.
    fn error(&self) -> Self::Field;

    /// Determines whether the iteration satisfies the stopping rule for
    /// given tolerance. By default, the error must be strictly less than the
    /// tolerance.
    fn satisfies(&self, tolerance: Self::Field) -> bool {
        self.error() < tolerance
    }
}

/// Interface of an iterative method.
///
/// A method holds the problem and the current iterate. Every call to
/// [`next`](Method::next) performs exactly one iteration and returns its
/// record. Repeated calls should eventually produce a record that
/// [satisfies](Record::satisfies) the tolerance in successful cases.
///
/// ## Implementing a method
///
/// Here is the simplest possible method, the fixed-point iteration of a
/// constant map, which converges in the second iteration.
///
/// ```rust
/// use stepwise::{Driver, Method, Record};
///
/// struct Constant {
///     x: f64,
/// }
///
/// #[derive(Debug)]
/// struct Step {
///     iter: usize,
///     error: f64,
/// }
///
/// impl Record for Step {
///     type Field = f64;
///
///     fn iter(&self) -> usize {
///         self.iter
///     }
///
///     fn error(&self) -> f64 {
///         self.error
///     }
/// }
///
/// impl Method for Constant {
///     const NAME: &'static str = "Constant";
///     type Field = f64;
///     type Value = f64;
///     type Record = Step;
///     type Error = std::convert::Infallible;
///
///     fn next(&mut self, iter: usize) -> Result<Step, Self::Error> {
///         let error = (42.0 - self.x).abs();
///         self.x = 42.0;
///         Ok(Step { iter, error })
///     }
///
///     fn current(&self) -> f64 {
///         self.x
///     }
/// }
///
/// let solution = Driver::new(Constant { x: 0.0 }).run().unwrap();
/// assert!(solution.is_converged());
/// assert_eq!(solution.trace().len(), 2);
/// ```
pub trait Method {
    /// Name of the method.
    const NAME: &'static str;

    /// Type of the scalar, usually f64.
    type Field: RealField + Copy;

    /// Type of the solution, a scalar or a vector.
    type Value;

    /// Record produced by every iteration.
    type Record: Record<Field = Self::Field>;

    /// Error while performing an iteration.
    type Error;

    /// Performs iteration number `iter` (1-based) and returns its record.
    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error>;

    /// Name of the method as configured, used in logs. Defaults to
    /// [`NAME`](Method::NAME).
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// The value reported when the last iteration satisfied the tolerance.
    fn current(&self) -> Self::Value;

    /// The best estimate reported when the iteration limit is reached.
    /// Defaults to [`current`](Method::current).
    fn estimate(&self) -> Self::Value {
        self.current()
    }

    /// Non-fatal findings about the input, reported alongside the result.
    fn advisories(&self) -> Vec<Advisory> {
        Vec::new()
    }
}
