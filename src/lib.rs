#![allow(clippy::many_single_char_names)]
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]

//! # Stepwise
//!
//! A pure Rust engine of classic numerical methods that records every
//! iteration.
//!
//! The library covers the usual content of an introductory numerical methods
//! course: matrix arithmetic, direct and iterative solvers of linear systems,
//! root finding of a function of one variable and of systems of nonlinear
//! equations. All iterative methods share the same interface and return the
//! full history of the run, so that the progress can be inspected or
//! displayed, also when the method fails or does not converge.
//!
//! ## Methods
//!
//! * [Linear algebra](linalg) -- [sum](linalg::add),
//!   [product](linalg::multiply), [determinant](linalg::determinant()) by
//!   cofactor expansion and [inverse](linalg::inverse()) by Gauss-Jordan
//!   elimination.
//! * [Direct linear solvers](linalg) -- [Gauss](linalg::gauss),
//!   [Gauss-Jordan](linalg::gauss_jordan) and the
//!   [inverse matrix method](linalg::inverse_method).
//! * [Jacobi and Gauss-Seidel](mod@algo::jacobi) -- iterative linear solvers.
//! * [Bisection](mod@algo::bisection) and [secant](mod@algo::secant) -- scalar root
//!   finding.
//! * [Newton-Raphson](mod@algo::newton) (standard and modified) and
//!   [fixed-point iteration](mod@algo::fixed_point) -- systems of nonlinear
//!   equations.
//!
//! ## Problem
//!
//! Functions and systems are given either as text, parsed by the
//! [expression](expr) evaluator, or as any type that implements the
//! [`Function`] or [`System`] trait.
//!
//! ```rust
//! use stepwise::EquationSystem;
//!
//! // Equations bind to the variables x, y, z and w in this order.
//! let f = EquationSystem::parse(&["x^2 + y^2 - 4", "x*y - 1"]).unwrap();
//! ```
//!
//! ## Solving
//!
//! An iterative method is run by the [`Driver`] until the tolerance is
//! satisfied or the maximum number of iterations is reached. Reaching the
//! limit is not an error, the [`Solution`] then holds the best estimate.
//!
//! ```rust
//! use stepwise::algo::Newton;
//! use stepwise::nalgebra::dvector;
//! use stepwise::{Driver, EquationSystem, Outcome, StopCriteria};
//!
//! let f = EquationSystem::parse(&["x^2 + y^2 - 4", "x*y - 1"]).unwrap();
//! let newton = Newton::new(&f, dvector![2.0, 0.5]).unwrap();
//!
//! let criteria = StopCriteria::default().with_tolerance(1e-8);
//! let solution = Driver::new(newton).with_criteria(criteria).run().unwrap();
//!
//! for record in solution.trace().tail(10) {
//!     println!("iter = {}\terror = {}", record.iter(), record.error());
//! }
//!
//! match solution.outcome() {
//!     Outcome::Converged(x) => println!("solved: {}", x),
//!     Outcome::NotConverged { estimate, .. } => println!("best estimate: {}", estimate),
//! }
//! ```
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
pub mod analysis;
pub mod catalog;
mod core;
pub mod derivatives;
pub mod driver;
pub mod expr;
pub mod linalg;

pub use core::*;
pub use driver::{Driver, StopCriteria};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
