use ph_hull::{EquilibriumResult, EquilibriumSolver, HullResult};
use std::sync::Arc;

/// Solves one velocity of a sweep.
pub trait PointSolver: Send + Sync {
    fn solve_point(&self, velocity: f64) -> HullResult<EquilibriumResult>;
}

impl PointSolver for EquilibriumSolver {
    fn solve_point(&self, velocity: f64) -> HullResult<EquilibriumResult> {
        self.solve(velocity)
    }
}

impl<S: PointSolver + ?Sized> PointSolver for Arc<S> {
    fn solve_point(&self, velocity: f64) -> HullResult<EquilibriumResult> {
        (**self).solve_point(velocity)
    }
}
