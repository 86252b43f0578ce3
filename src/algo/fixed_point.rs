//! Fixed-point iteration.
//!
//! Solves `x = G(x)` by the [fixed-point
//! iteration](https://en.wikipedia.org/wiki/Fixed-point_iteration)
//! `x(k+1) = G(x(k))`. The system passed to the method is `G` itself, not the
//! residuals `F`. The iteration converges if `G` is a contraction near the
//! fixed point. This is not verified; a divergent `G` only shows as a run
//! that does not converge.

use nalgebra::DVector;

use super::{max_change, VectorRecord};
use crate::core::{Failure, Method, MethodResult, ProblemError, System};
use crate::driver::{Driver, StopCriteria};

/// Fixed-point iteration. See [module](self) documentation for more details.
pub struct FixedPoint<G> {
    g: G,
    x: DVector<f64>,
    gx: DVector<f64>,
}

impl<G: System> FixedPoint<G> {
    /// Initializes the method with the map `G` and the initial point.
    pub fn new(g: G, x0: DVector<f64>) -> Result<Self, ProblemError> {
        if x0.len() != g.dim() {
            return Err(ProblemError::InvalidDimensionality);
        }

        let gx = DVector::zeros(g.dim());
        Ok(Self { g, x: x0, gx })
    }
}

impl<G: System> Method for FixedPoint<G> {
    const NAME: &'static str = "Fixed-point iteration";

    type Field = f64;
    type Value = DVector<f64>;
    type Record = VectorRecord<f64>;
    type Error = ProblemError;

    fn next(&mut self, iter: usize) -> Result<Self::Record, Self::Error> {
        self.g.eval(&self.x, &mut self.gx)?;

        let error = max_change(&self.gx, &self.x);
        std::mem::swap(&mut self.x, &mut self.gx);

        Ok(VectorRecord::new(iter, self.x.clone(), error))
    }

    fn current(&self) -> DVector<f64> {
        self.x.clone()
    }
}

/// Runs the fixed-point iteration of `g` from `x0` with given criteria.
pub fn fixed_point<G: System>(
    g: G,
    x0: DVector<f64>,
    criteria: StopCriteria<f64>,
) -> MethodResult<DVector<f64>, VectorRecord<f64>, ProblemError> {
    let method = FixedPoint::new(g, x0).map_err(Failure::before_start)?;
    Driver::new(method).with_criteria(criteria).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    use crate::core::EquationSystem;
    use crate::expr::EvaluationError;
    use crate::testing::CircleHyperbolaFixedPoint;

    #[test]
    fn circle_and_hyperbola() {
        let g = EquationSystem::parse(&["(4 - y^2)^0.5", "1/x"]).unwrap();
        let solution = fixed_point(&g, dvector![1.0, 1.0], StopCriteria::default()).unwrap();

        assert!(solution.is_converged());
        assert_abs_diff_eq!(
            solution.value(),
            &dvector![1.9319, 0.5176],
            epsilon = 1e-3
        );
    }

    #[test]
    fn records_new_iterate() {
        let g = CircleHyperbolaFixedPoint;
        let solution = fixed_point(&g, dvector![1.0, 1.0], StopCriteria::default()).unwrap();
        let first = &solution.trace()[0];

        // G(1, 1) = (sqrt(3), 1)
        assert_eq!(first.iter(), 1);
        assert_abs_diff_eq!(first.x(), &dvector![3f64.sqrt(), 1.0], epsilon = 1e-12);
        assert_abs_diff_eq!(first.error(), 3f64.sqrt() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn divergent_map_does_not_converge() {
        let g = EquationSystem::parse(&["2*x + 1"]).unwrap();
        let solution = fixed_point(&g, dvector![1.0], StopCriteria::new(1e-4, 20)).unwrap();

        assert!(!solution.is_converged());
        assert_eq!(solution.trace().len(), 20);
    }

    #[test]
    fn nan_iterate_does_not_converge() {
        // G is undefined at the initial point, the second component is fixed.
        let g = EquationSystem::parse(&["sqrt(x - 10)", "y"]).unwrap();
        let solution = fixed_point(&g, dvector![1.0, 1.0], StopCriteria::new(1e-4, 15)).unwrap();

        assert!(!solution.is_converged());
        assert_eq!(solution.trace().len(), 15);
        assert!(solution.trace().iter().all(|record| record.error().is_nan()));
        assert!(solution.value()[0].is_nan());
    }

    #[test]
    fn overflow_to_infinity_does_not_converge() {
        // 2, 6, 38, 1446, ... overflows after a few iterations, then the
        // change is inf - inf.
        let g = EquationSystem::parse(&["x^2 + 2"]).unwrap();
        let solution = fixed_point(&g, dvector![2.0], StopCriteria::new(1e-4, 30)).unwrap();

        assert!(!solution.is_converged());
        assert_eq!(solution.trace().len(), 30);
        assert!(!solution.value()[0].is_finite());
    }

    #[test]
    fn unbound_variable_in_map() {
        let g = EquationSystem::parse(&["x + y"]);
        assert!(matches!(
            g,
            Err(ProblemError::Evaluation(EvaluationError::UnboundVariable { .. }))
        ));
    }

    #[test]
    fn dimension_mismatch() {
        let g = CircleHyperbolaFixedPoint;
        let failure = fixed_point(&g, dvector![1.0], StopCriteria::default()).unwrap_err();
        assert!(matches!(failure.error(), ProblemError::InvalidDimensionality));
        assert!(failure.trace().is_empty());
    }
}
