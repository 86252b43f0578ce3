//! The catalog of available methods.
//!
//! Front ends list the methods by [`Category`] and select them by a stable
//! slug. Each entry also tells the admissible problem dimension, which is the
//! number of equations (or the matrix order) for everything except the matrix
//! sum and product, where it bounds both rows and columns.
//!
//! ```rust
//! use stepwise::catalog::{Category, MethodId};
//!
//! let method: MethodId = "gauss-seidel".parse().unwrap();
//! assert_eq!(method.category(), Category::LinearSystems);
//! assert!(method.is_iterative());
//! assert!(method.dimensions().contains(&5));
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

/// Group of related methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Matrix arithmetic, determinant and inverse.
    LinearAlgebra,
    /// Direct and iterative solvers of `Ax = b`.
    LinearSystems,
    /// Root finding of a function of one variable.
    ScalarEquations,
    /// Root finding of systems of nonlinear equations.
    NonlinearSystems,
}

impl Category {
    /// All categories in the presentation order.
    pub const ALL: [Category; 4] = [
        Category::LinearAlgebra,
        Category::LinearSystems,
        Category::ScalarEquations,
        Category::NonlinearSystems,
    ];

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            Category::LinearAlgebra => "Linear algebra",
            Category::LinearSystems => "Linear systems",
            Category::ScalarEquations => "Nonlinear equations (one variable)",
            Category::NonlinearSystems => "Nonlinear systems (multivariable)",
        }
    }

    /// Methods of the category in the presentation order.
    pub fn methods(self) -> impl Iterator<Item = MethodId> {
        MethodId::ALL
            .into_iter()
            .filter(move |method| method.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Identifier of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodId {
    /// [`linalg::add`](crate::linalg::add)
    MatrixSum,
    /// [`linalg::multiply`](crate::linalg::multiply)
    MatrixProduct,
    /// [`linalg::determinant`](crate::linalg::determinant())
    Determinant,
    /// [`linalg::inverse`](crate::linalg::inverse())
    Inverse,
    /// [`linalg::inverse_method`](crate::linalg::inverse_method)
    InverseMethod,
    /// [`linalg::gauss`](crate::linalg::gauss)
    Gauss,
    /// [`linalg::gauss_jordan`](crate::linalg::gauss_jordan)
    GaussJordan,
    /// [`algo::jacobi`](crate::algo::jacobi())
    Jacobi,
    /// [`algo::gauss_seidel`](crate::algo::gauss_seidel)
    GaussSeidel,
    /// [`algo::bisection`](crate::algo::bisection())
    Bisection,
    /// [`algo::secant`](crate::algo::secant())
    Secant,
    /// [`algo::newton`](crate::algo::newton()) with the standard variant.
    NewtonRaphson,
    /// [`algo::newton`](crate::algo::newton()) with the modified variant.
    ModifiedNewtonRaphson,
    /// [`algo::fixed_point`](crate::algo::fixed_point())
    FixedPoint,
}

impl MethodId {
    /// All methods in the presentation order.
    pub const ALL: [MethodId; 14] = [
        MethodId::MatrixSum,
        MethodId::MatrixProduct,
        MethodId::Determinant,
        MethodId::Inverse,
        MethodId::InverseMethod,
        MethodId::Gauss,
        MethodId::GaussJordan,
        MethodId::Jacobi,
        MethodId::GaussSeidel,
        MethodId::Bisection,
        MethodId::Secant,
        MethodId::NewtonRaphson,
        MethodId::ModifiedNewtonRaphson,
        MethodId::FixedPoint,
    ];

    /// Category the method belongs to.
    pub fn category(self) -> Category {
        match self {
            MethodId::MatrixSum
            | MethodId::MatrixProduct
            | MethodId::Determinant
            | MethodId::Inverse => Category::LinearAlgebra,
            MethodId::InverseMethod
            | MethodId::Gauss
            | MethodId::GaussJordan
            | MethodId::Jacobi
            | MethodId::GaussSeidel => Category::LinearSystems,
            MethodId::Bisection | MethodId::Secant => Category::ScalarEquations,
            MethodId::NewtonRaphson | MethodId::ModifiedNewtonRaphson | MethodId::FixedPoint => {
                Category::NonlinearSystems
            }
        }
    }

    /// Stable identifier used for selection.
    pub fn slug(self) -> &'static str {
        match self {
            MethodId::MatrixSum => "matrix-sum",
            MethodId::MatrixProduct => "matrix-product",
            MethodId::Determinant => "determinant",
            MethodId::Inverse => "inverse",
            MethodId::InverseMethod => "inverse-method",
            MethodId::Gauss => "gauss",
            MethodId::GaussJordan => "gauss-jordan",
            MethodId::Jacobi => "jacobi",
            MethodId::GaussSeidel => "gauss-seidel",
            MethodId::Bisection => "bisection",
            MethodId::Secant => "secant",
            MethodId::NewtonRaphson => "newton-raphson",
            MethodId::ModifiedNewtonRaphson => "modified-newton-raphson",
            MethodId::FixedPoint => "fixed-point",
        }
    }

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            MethodId::MatrixSum => "Matrix sum",
            MethodId::MatrixProduct => "Matrix product",
            MethodId::Determinant => "Determinant",
            MethodId::Inverse => "Inverse matrix",
            MethodId::InverseMethod => "Inverse matrix method",
            MethodId::Gauss => "Gauss elimination",
            MethodId::GaussJordan => "Gauss-Jordan",
            MethodId::Jacobi => "Jacobi method",
            MethodId::GaussSeidel => "Gauss-Seidel",
            MethodId::Bisection => "Bisection method",
            MethodId::Secant => "Secant method",
            MethodId::NewtonRaphson => "Newton-Raphson",
            MethodId::ModifiedNewtonRaphson => "Modified Newton-Raphson",
            MethodId::FixedPoint => "Multivariable fixed point",
        }
    }

    /// Determines whether the method iterates and therefore produces a
    /// trace and uses stopping criteria.
    pub fn is_iterative(self) -> bool {
        matches!(
            self,
            MethodId::Jacobi
                | MethodId::GaussSeidel
                | MethodId::Bisection
                | MethodId::Secant
                | MethodId::NewtonRaphson
                | MethodId::ModifiedNewtonRaphson
                | MethodId::FixedPoint
        )
    }

    /// Admissible dimensions of the problem.
    pub fn dimensions(self) -> RangeInclusive<usize> {
        match self {
            MethodId::MatrixSum => 1..=5,
            MethodId::MatrixProduct => 1..=4,
            MethodId::Determinant | MethodId::Inverse | MethodId::InverseMethod => 2..=4,
            MethodId::Gauss | MethodId::GaussJordan | MethodId::Jacobi | MethodId::GaussSeidel => {
                2..=5
            }
            MethodId::Bisection | MethodId::Secant => 1..=1,
            MethodId::NewtonRaphson | MethodId::ModifiedNewtonRaphson | MethodId::FixedPoint => {
                2..=4
            }
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error when parsing a [`MethodId`] from its slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for MethodId {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodId::ALL
            .into_iter()
            .find(|method| method.slug() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn slugs_round_trip() {
        for method in MethodId::ALL {
            assert_eq!(method.slug().parse::<MethodId>(), Ok(method));
        }
    }

    #[test]
    fn slugs_are_unique() {
        let slugs: HashSet<_> = MethodId::ALL.iter().map(|method| method.slug()).collect();
        assert_eq!(slugs.len(), MethodId::ALL.len());
    }

    #[test]
    fn unknown_slug() {
        assert_eq!(
            "regula-falsi".parse::<MethodId>(),
            Err(UnknownMethod("regula-falsi".to_string()))
        );
    }

    #[test]
    fn categories_cover_all_methods() {
        let counts: Vec<_> = Category::ALL
            .iter()
            .map(|category| category.methods().count())
            .collect();
        assert_eq!(counts, vec![4, 5, 2, 3]);
    }

    #[test]
    fn iterative_methods() {
        let iterative: Vec<_> = MethodId::ALL
            .into_iter()
            .filter(|method| method.is_iterative())
            .collect();
        assert_eq!(iterative.len(), 7);
        assert!(!MethodId::Gauss.is_iterative());
        assert!(MethodId::FixedPoint.is_iterative());
    }

    #[test]
    fn dimensions() {
        assert_eq!(MethodId::Bisection.dimensions(), 1..=1);
        assert!(MethodId::NewtonRaphson.dimensions().contains(&4));
        assert!(!MethodId::NewtonRaphson.dimensions().contains(&5));
        assert!(MethodId::Jacobi.dimensions().contains(&5));
    }
}
