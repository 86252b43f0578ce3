//! Testing problems and utilities useful for benchmarking, debugging and smoke
//! testing.
//!
//! [`Cubic`] and [`CircleHyperbola`] are the classic textbook examples for
//! scalar and multivariable root finding. [`SingularJacobian`] can be used
//! for testing the failure path of Newton-based methods. Random matrix
//! generators are provided for property-style tests of the linear algebra.

#![allow(unused)]

use nalgebra::{dvector, DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::core::{Function, ProblemError, System};

/// Extension of the [`System`] trait that provides additional information that
/// is useful for testing methods.
pub trait TestSystem: System {
    /// Standard initial values for the problem. Using the same initial values is
    /// essential for fair comparison of methods.
    fn initials(&self) -> Vec<DVector<f64>>;

    /// A set of roots (if known and finite). For testing if a given point is
    /// root, [`TestSystem::is_root`] should be used.
    fn roots(&self) -> Vec<DVector<f64>> {
        Vec::new()
    }

    /// Test if given point is a root of the system, given the tolerance `eps`.
    fn is_root(&self, x: &DVector<f64>, eps: f64) -> bool {
        let mut fx = DVector::zeros(self.dim());
        self.eval(x, &mut fx).is_ok() && fx.norm() <= eps
    }
}

/// `f(x) = x^3 - x - 2`, with a single real root near 1.5213797 and the sign
/// change on `[1, 2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cubic;

impl Cubic {
    /// The real root.
    pub const ROOT: f64 = 1.5213797068045676;
}

impl Function for Cubic {
    fn apply(&self, x: f64) -> Result<f64, ProblemError> {
        Ok(x.powi(3) - x - 2.0)
    }
}

/// Intersection of the circle `x^2 + y^2 = 4` and the hyperbola `x * y = 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleHyperbola;

impl System for CircleHyperbola {
    fn dim(&self) -> usize {
        2
    }

    fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError> {
        check_dims(self.dim(), x, fx)?;
        fx[0] = x[0].powi(2) + x[1].powi(2) - 4.0;
        fx[1] = x[0] * x[1] - 1.0;
        Ok(())
    }
}

impl TestSystem for CircleHyperbola {
    fn initials(&self) -> Vec<DVector<f64>> {
        vec![dvector![2.0, 0.5], dvector![3.0, 1.0]]
    }

    fn roots(&self) -> Vec<DVector<f64>> {
        // Symmetric in x and y and in the sign.
        let (a, b) = (1.9318516525781366, 0.5176380902050416);
        vec![
            dvector![a, b],
            dvector![b, a],
            dvector![-a, -b],
            dvector![-b, -a],
        ]
    }
}

/// [`CircleHyperbola`] rewritten as `x = sqrt(4 - y^2)`, `y = 1 / x` for the
/// fixed-point iteration. It is a contraction near the root with `x > y`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleHyperbolaFixedPoint;

impl System for CircleHyperbolaFixedPoint {
    fn dim(&self) -> usize {
        2
    }

    fn eval(&self, x: &DVector<f64>, gx: &mut DVector<f64>) -> Result<(), ProblemError> {
        check_dims(self.dim(), x, gx)?;
        gx[0] = (4.0 - x[1].powi(2)).sqrt();
        gx[1] = 1.0 / x[0];
        Ok(())
    }
}

/// `x^2 + y^2 = 1`, `x * y = 1`. There is no real root and the Jacobian
/// matrix has a zero second row at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingularJacobian;

impl System for SingularJacobian {
    fn dim(&self) -> usize {
        2
    }

    fn eval(&self, x: &DVector<f64>, fx: &mut DVector<f64>) -> Result<(), ProblemError> {
        check_dims(self.dim(), x, fx)?;
        fx[0] = x[0].powi(2) + x[1].powi(2) - 1.0;
        fx[1] = x[0] * x[1] - 1.0;
        Ok(())
    }
}

impl TestSystem for SingularJacobian {
    fn initials(&self) -> Vec<DVector<f64>> {
        vec![dvector![0.0, 0.0]]
    }
}

/// Matrix with entries drawn uniformly from `[-10, 10)`.
pub fn random_matrix<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> DMatrix<f64> {
    let dist = Uniform::new(-10.0, 10.0);
    DMatrix::from_fn(rows, cols, |_, _| dist.sample(&mut *rng))
}

/// Vector with entries drawn uniformly from `[-10, 10)`.
pub fn random_vector<R: Rng>(n: usize, rng: &mut R) -> DVector<f64> {
    let dist = Uniform::new(-10.0, 10.0);
    DVector::from_fn(n, |_, _| dist.sample(&mut *rng))
}

/// Square matrix that is strictly diagonally dominant by a wide margin. The
/// magnitude of each diagonal entry is more than four times the sum of the
/// rest of the row, so Jacobi and Gauss-Seidel converge fast.
pub fn random_dominant_matrix<R: Rng>(n: usize, rng: &mut R) -> DMatrix<f64> {
    let margin = Uniform::new(1.0, 10.0);
    let mut a = random_matrix(n, n, &mut *rng);

    for i in 0..n {
        let off: f64 = (0..n).filter(|&j| j != i).map(|j| a[(i, j)].abs()).sum();
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        a[(i, i)] = sign * (4.0 * off + margin.sample(rng));
    }

    a
}

/// Determines whether the matrix equals the identity matrix of the same
/// order, entry by entry within `eps`.
pub fn is_identity(m: &DMatrix<f64>, eps: f64) -> bool {
    let identity = DMatrix::identity(m.nrows(), m.ncols());
    m.is_square() && approx::abs_diff_eq!(m, &identity, epsilon = eps)
}

fn check_dims(n: usize, x: &DVector<f64>, fx: &DVector<f64>) -> Result<(), ProblemError> {
    if x.len() != n || fx.len() != n {
        Err(ProblemError::InvalidDimensionality)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dmatrix;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::analysis::is_diagonally_dominant;

    #[test]
    fn roots_are_roots() {
        let f = CircleHyperbola;
        for root in f.roots() {
            assert!(f.is_root(&root, 1e-12));
        }
        assert!(!f.is_root(&f.initials()[0], 1e-3));
    }

    #[test]
    fn cubic_root() {
        assert!(Cubic.apply(Cubic::ROOT).unwrap().abs() < 1e-12);
    }

    #[test]
    fn fixed_point_form_is_consistent() {
        let root = &CircleHyperbola.roots()[0];
        let mut gx = DVector::zeros(2);
        CircleHyperbolaFixedPoint.eval(root, &mut gx).unwrap();
        assert!((&gx - root).amax() < 1e-12);
    }

    #[test]
    fn identity_check() {
        assert!(is_identity(&DMatrix::identity(3, 3), 0.0));
        assert!(is_identity(&dmatrix![1.0, 1e-9; 0.0, 1.0], 1e-6));
        assert!(!is_identity(&dmatrix![1.0, 1e-3; 0.0, 1.0], 1e-6));
        assert!(!is_identity(&DMatrix::identity(2, 3), 1e-6));
    }

    #[test]
    fn dominant_matrices() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in 1..=5 {
            assert!(is_diagonally_dominant(&random_dominant_matrix(n, &mut rng)).unwrap());
        }
    }
}
