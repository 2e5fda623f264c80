//! Numeric settings for the equilibrium solve.

use ph_solver::{BrentConfig, NewtonConfig, RootConfig};

/// Brackets, guards and acceptance limits used by [`EquilibriumSolver`](crate::EquilibriumSolver).
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Velocities at or below this are rejected as degenerate (m/s).
    pub min_velocity_mps: f64,
    /// Trial trims at or below this are invalid (deg).
    pub min_trim_deg: f64,
    /// Bracket for the zero-deadrise lift coefficient `CL0`.
    pub lift_bracket: (f64, f64),
    /// Bracket for the wetted length-beam ratio `λ`.
    pub wetted_length_bracket: (f64, f64),
    /// Trim bracket for the outer moment solve (deg).
    pub trim_bracket_deg: (f64, f64),
    /// Number of trims sampled when the trim bracket has no sign change.
    pub grid_points: usize,
    /// A converged trim must leave `|M| <= factor * Δ * L`.
    pub moment_tolerance_factor: f64,
    /// Grid fallback results are accepted as low-confidence up to `factor * Δ * L`.
    pub fallback_moment_factor: f64,
    /// Inner (CL0, λ) root settings.
    pub root: RootConfig,
    /// Outer trim Brent settings.
    pub trim_brent: BrentConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_velocity_mps: 0.1,
            min_trim_deg: 0.1,
            lift_bracket: (1e-4, 10.0),
            wetted_length_bracket: (0.01, 10.0),
            trim_bracket_deg: (0.5, 15.0),
            grid_points: 30,
            moment_tolerance_factor: 1e-3,
            fallback_moment_factor: 0.05,
            root: RootConfig {
                brent: BrentConfig::default(),
                newton: NewtonConfig {
                    lower_bound: Some(0.0),
                    ..NewtonConfig::default()
                },
            },
            trim_brent: BrentConfig::default(),
        }
    }
}
