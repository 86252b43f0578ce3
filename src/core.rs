//! Core abstractions and types.
//!
//! *Users* are mainly interested in the [`Function`] and [`System`] traits
//! (or their expression-backed implementations [`Expression`](crate::expr::Expression)
//! and [`EquationSystem`]) and in the results of a run: [`Solution`],
//! [`Failure`] and [`Trace`].
//!
//! Algorithm *developers* are interested in implementing the [`Method`] trait
//! so that the method can be run by the [`Driver`](crate::driver::Driver).

mod method;
mod problem;
mod solution;
mod trace;

pub use method::*;
pub use problem::*;
pub use solution::*;
pub use trace::*;
