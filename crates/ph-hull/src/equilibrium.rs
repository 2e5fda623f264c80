//! Single-speed trim equilibrium.

use crate::config::SolverConfig;
use crate::error::{HullError, HullResult, SolveStage};
use crate::lift::{LiftInversion, invert_lift};
use crate::params::HullParameters;
use crate::result::{Convergence, EquilibriumResult, FallbackUsage};
use crate::trim::{HydroState, TrimState};
use crate::wake::WakeProfile;
use ph_core::units::{Velocity, in_mps};
use ph_solver::{brent, grid_search};

/// Solves the trim at which the pitching moment about the CG vanishes.
///
/// Holds no mutable state; one solver may be shared across threads and
/// called for any number of speeds.
#[derive(Clone, Debug)]
pub struct EquilibriumSolver {
    params: HullParameters,
    config: SolverConfig,
}

impl EquilibriumSolver {
    pub fn new(params: HullParameters) -> Self {
        Self::with_config(params, SolverConfig::default())
    }

    pub fn with_config(params: HullParameters, config: SolverConfig) -> Self {
        Self { params, config }
    }

    pub fn params(&self) -> &HullParameters {
        &self.params
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Largest `|M|` accepted from a bracketed trim root (N*m).
    pub fn moment_tolerance(&self) -> f64 {
        self.config.moment_tolerance_factor * self.moment_scale()
    }

    /// Largest `|M|` accepted from the trim grid fallback (N*m).
    pub fn fallback_moment_limit(&self) -> f64 {
        self.config.fallback_moment_factor * self.moment_scale()
    }

    fn moment_scale(&self) -> f64 {
        self.params.displacement() * self.params.length()
    }

    fn check_velocity(&self, velocity: f64) -> HullResult<()> {
        let min = self.config.min_velocity_mps;
        if !(velocity > min) || !velocity.is_finite() {
            return Err(HullError::DegenerateInput { velocity, min });
        }
        Ok(())
    }

    fn lift(&self, velocity: f64) -> HullResult<LiftInversion> {
        self.check_velocity(velocity)?;
        invert_lift(&self.params, velocity, &self.config)
    }

    /// Pitching moment about the CG at `trim_deg` (N*m).
    pub fn moment_at(&self, velocity: f64, trim_deg: f64) -> HullResult<f64> {
        let lift = self.lift(velocity)?;
        HydroState::evaluate(&self.params, &lift, velocity, trim_deg, &self.config)
            .map(|h| h.moment)
    }

    /// Full derivation at an arbitrary trim, equilibrium or not.
    pub fn evaluate_trim(&self, velocity: f64, trim_deg: f64) -> HullResult<TrimState> {
        let lift = self.lift(velocity)?;
        let hydro = HydroState::evaluate(&self.params, &lift, velocity, trim_deg, &self.config)?;
        Ok(TrimState::derive(&self.params, hydro))
    }

    pub fn solve_velocity(&self, velocity: Velocity) -> HullResult<EquilibriumResult> {
        self.solve(in_mps(velocity))
    }

    /// Equilibrium at `velocity` (m/s).
    ///
    /// Fails with [`HullError::DegenerateInput`] for `velocity <= 0.1`. When
    /// the trim bracket has no usable sign change the trim grid is searched
    /// instead; its best point is returned as [`Convergence::LowConfidence`]
    /// if the moment is within [`fallback_moment_limit`](Self::fallback_moment_limit),
    /// otherwise the solve fails with [`HullError::NoEquilibriumFound`].
    pub fn solve(&self, velocity: f64) -> HullResult<EquilibriumResult> {
        let lift = self.lift(velocity)?;
        if lift.used_fallback {
            tracing::debug!(velocity, cl0 = lift.cl0, "lift coefficient from fallback");
        }

        let moment = |trim_deg: f64| {
            HydroState::evaluate(&self.params, &lift, velocity, trim_deg, &self.config)
                .map_or(f64::NAN, |h| h.moment)
        };

        let (lo, hi) = self.config.trim_bracket_deg;
        let (trim_deg, convergence) = match brent(&moment, lo, hi, &self.config.trim_brent) {
            Ok(root) if root.residual.abs() <= self.moment_tolerance() => (
                root.root,
                Convergence::Converged {
                    iterations: root.iterations,
                },
            ),
            Ok(root) => {
                tracing::warn!(
                    velocity,
                    trim_deg = root.root,
                    residual = root.residual,
                    "trim root exceeds moment tolerance, searching trim grid"
                );
                self.grid_fallback(velocity, &moment)?
            }
            Err(e) => {
                tracing::warn!(velocity, error = %e, "trim bracket unusable, searching trim grid");
                self.grid_fallback(velocity, &moment)?
            }
        };

        let hydro = HydroState::evaluate(&self.params, &lift, velocity, trim_deg, &self.config)?;
        let fallbacks = FallbackUsage {
            lift_coefficient: lift.used_fallback,
            wetted_length: hydro.wetted_length_fallback,
        };
        if fallbacks.any() {
            tracing::warn!(
                velocity,
                trim_deg,
                lift_coefficient = fallbacks.lift_coefficient,
                wetted_length = fallbacks.wetted_length,
                "equilibrium relies on inner fallback"
            );
        }

        let state = TrimState::derive(&self.params, hydro);
        tracing::debug!(
            velocity,
            trim_deg,
            lambda = hydro.lambda,
            total_resistance = state.total_resistance,
            "equilibrium solved"
        );

        Ok(EquilibriumResult::from_state(
            &state,
            lift.cv,
            self.params.length_froude(velocity),
            lift.cl0,
            convergence,
            fallbacks,
        ))
    }

    fn grid_fallback<F>(&self, velocity: f64, moment: &F) -> HullResult<(f64, Convergence)>
    where
        F: Fn(f64) -> f64,
    {
        let (lo, hi) = self.config.trim_bracket_deg;
        let best = grid_search(moment, lo, hi, self.config.grid_points).ok_or_else(|| {
            HullError::RootFinding {
                stage: SolveStage::Trim,
                velocity,
                reason: "no finite moment on the trim grid".to_string(),
            }
        })?;

        let limit = self.fallback_moment_limit();
        if best.value.abs() > limit {
            return Err(HullError::NoEquilibriumFound {
                velocity,
                best_trim_deg: best.x,
                residual_moment: best.value,
                limit,
            });
        }

        tracing::warn!(
            velocity,
            trim_deg = best.x,
            residual = best.value,
            "low-confidence equilibrium from trim grid"
        );
        Ok((
            best.x,
            Convergence::LowConfidence {
                residual_moment: best.value,
            },
        ))
    }

    /// Savitsky & Michael wake profile behind the transom for a solved point.
    pub fn wake_profile(&self, result: &EquilibriumResult) -> WakeProfile {
        WakeProfile::for_result(&self.params, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> EquilibriumSolver {
        EquilibriumSolver::new(HullParameters::reference_planing_hull())
    }

    #[test]
    fn rejects_degenerate_velocities() {
        let solver = solver();
        for v in [0.0, 0.05, 0.1, -3.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(solver.solve(v), Err(HullError::DegenerateInput { .. })),
                "v = {v}"
            );
        }
    }

    #[test]
    fn limits_scale_with_displacement_and_length() {
        let solver = solver();
        let scale = 3017.4373 * 9.81 * 8.0;
        assert!((solver.moment_tolerance() - 1e-3 * scale).abs() < 1e-9);
        assert!((solver.fallback_moment_limit() - 0.05 * scale).abs() < 1e-9);
    }

    #[test]
    fn wake_profile_has_61_stations() {
        let solver = solver();
        let result = solver.solve(5.2267).unwrap();
        let wake = solver.wake_profile(&result);
        assert_eq!(wake.len(), 61);
        assert_eq!(wake.x_over_b[0], 0.0);
        assert!((wake.x_over_b[60] - 3.0).abs() < 1e-12);
        assert_eq!(wake.centerline[0], 0.0);
        // 20 deg deadrise uses the larger centerline coefficient
        for (_, c, q) in wake.rows().skip(1) {
            assert!(c.abs() > q.abs());
        }
    }

    #[test]
    fn trim_outside_bracket_is_still_evaluable() {
        let state = solver().evaluate_trim(5.2267, 20.0).unwrap();
        assert!(state.total_resistance > 0.0);
        assert!(state.hydro.moment.is_finite());
    }
}
