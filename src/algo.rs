//! The collection of implemented iterative methods.
//!
//! Every method implements [`Method`](crate::Method) and is run by the
//! [`Driver`](crate::Driver). For one-off runs, each module also provides a
//! function that constructs the method and drives it with given
//! [`StopCriteria`](crate::StopCriteria).

pub mod bisection;
pub mod fixed_point;
pub mod jacobi;
pub mod newton;
pub mod secant;

pub use bisection::{bisection, Bisection};
pub use fixed_point::{fixed_point, FixedPoint};
pub use jacobi::{gauss_seidel, jacobi, Jacobi};
pub use newton::{newton, Newton};
pub use secant::{secant, Secant};

use getset::{CopyGetters, Getters};
use nalgebra::{DVector, RealField};

use crate::core::Record;

/// Record of methods that iterate on a vector: Jacobi, Gauss-Seidel,
/// Newton-Raphson and fixed-point iteration.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct VectorRecord<T: RealField + Copy> {
    /// Iteration index.
    #[getset(get_copy = "pub")]
    iter: usize,
    /// The new iterate.
    #[getset(get = "pub")]
    x: DVector<T>,
    /// Maximum absolute change of a component.
    #[getset(get_copy = "pub")]
    error: T,
}

impl<T: RealField + Copy> VectorRecord<T> {
    pub(crate) fn new(iter: usize, x: DVector<T>, error: T) -> Self {
        Self { iter, x, error }
    }
}

impl<T: RealField + Copy> Record for VectorRecord<T> {
    type Field = T;

    fn iter(&self) -> usize {
        self.iter
    }

    fn error(&self) -> T {
        self.error
    }
}

/// `max_i |a_i - b_i|`, zero for empty vectors. See [`max_abs`].
pub(crate) fn max_change<T: RealField + Copy>(a: &DVector<T>, b: &DVector<T>) -> T {
    max_abs(a.iter().zip(b.iter()).map(|(ai, bi)| *ai - *bi))
}

/// Largest magnitude of the values, zero for none. The first non-finite
/// magnitude is returned as is, so that an infinite or NaN iterate never
/// satisfies a tolerance. `T::max` would silently drop a NaN.
pub(crate) fn max_abs<T: RealField + Copy>(values: impl IntoIterator<Item = T>) -> T {
    let mut max = T::zero();

    for value in values {
        let value = value.abs();
        if !value.is_finite() {
            return value;
        }
        if value > max {
            max = value;
        }
    }

    max
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dvector;

    #[test]
    fn max_change_basic() {
        assert_eq!(max_change(&dvector![1.0, -2.0, 3.0], &dvector![0.5, 1.0, 3.0]), 3.0);
        assert_eq!(max_change::<f64>(&dvector![], &dvector![]), 0.0);
    }

    #[test]
    fn max_change_keeps_nan() {
        let change = max_change(&dvector![f64::NAN, 1.0], &dvector![1.0, 5.0]);
        assert!(change.is_nan());

        let change = max_change(&dvector![1.0, f64::NAN], &dvector![5.0, 1.0]);
        assert!(change.is_nan());
    }

    #[test]
    fn max_change_of_infinite_iterates() {
        let change = max_change(&dvector![f64::INFINITY, 0.0], &dvector![1.0, 0.0]);
        assert_eq!(change, f64::INFINITY);

        // inf - inf
        let change = max_change(&dvector![f64::INFINITY], &dvector![f64::INFINITY]);
        assert!(!change.is_finite());
        assert!(!Record::satisfies(&VectorRecord::new(1, dvector![0.0], change), 1e-4));
    }
}
