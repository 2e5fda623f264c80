//! Lift-coefficient inversion and the wetted length equation.

use crate::config::SolverConfig;
use crate::error::{HullError, HullResult, SolveStage};
use crate::params::HullParameters;
use ph_solver::{RootOutcome, solve_bracketed};

/// Deadrise lift correction, `CL0 - 0.0065 β CL0^0.6`.
pub fn deadrise_lift(cl0: f64, deadrise_deg: f64) -> f64 {
    cl0 - 0.0065 * deadrise_deg * cl0.powf(0.6)
}

/// Zero-deadrise lift of a flat plate at `trim_deg`, `τ^1.1 (0.012 λ^0.5 + 0.0055 λ^2.5 / Cv^2)`.
pub fn flat_plate_lift(lambda: f64, cv: f64, trim_deg: f64) -> f64 {
    trim_deg.powf(1.1) * (0.012 * lambda.sqrt() + 0.0055 * lambda.powf(2.5) / (cv * cv))
}

/// Speed-dependent lift quantities, independent of trim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiftInversion {
    /// Beam Froude number `Cv`
    pub cv: f64,
    /// Required lift coefficient `CLb = Δ / (0.5 ρ V^2 B^2)`
    pub clb: f64,
    /// Zero-deadrise lift coefficient solving the deadrise correction
    pub cl0: f64,
    /// The `CL0` bracket failed and Newton supplied the root
    pub used_fallback: bool,
}

/// Solve `CL0 - 0.0065 β CL0^0.6 = CLb` for the given speed.
pub fn invert_lift(
    params: &HullParameters,
    velocity: f64,
    config: &SolverConfig,
) -> HullResult<LiftInversion> {
    let cv = params.beam_froude(velocity);
    let clb = params.displacement()
        / (0.5 * params.water_density() * velocity * velocity * params.beam() * params.beam());
    let beta = params.deadrise_deg();

    let (lo, hi) = config.lift_bracket;
    let outcome = solve_bracketed(|x| deadrise_lift(x, beta) - clb, lo, hi, clb, &config.root);
    let cl0 = root_or_error(&outcome, SolveStage::LiftCoefficient, velocity)?;

    Ok(LiftInversion {
        cv,
        clb,
        cl0,
        used_fallback: outcome.used_fallback(),
    })
}

/// Solve `0.012 λ^0.5 + 0.0055 λ^2.5 / Cv^2 = CL0 / τ^1.1` for `λ`.
///
/// The Newton fallback is seeded at the hull length-beam ratio.
pub fn wetted_length_ratio(
    params: &HullParameters,
    lift: &LiftInversion,
    trim_deg: f64,
    config: &SolverConfig,
) -> RootOutcome {
    let cv2 = lift.cv * lift.cv;
    let target = lift.cl0 / trim_deg.powf(1.1);
    let (lo, hi) = config.wetted_length_bracket;
    solve_bracketed(
        |l| 0.012 * l.sqrt() + 0.0055 * l.powf(2.5) / cv2 - target,
        lo,
        hi,
        params.length() / params.beam(),
        &config.root,
    )
}

/// Mean bottom velocity `Vm`, reduced from `V` by the pressure-induced flow loss.
pub fn mean_bottom_velocity(
    velocity: f64,
    lambda: f64,
    trim_deg: f64,
    deadrise_deg: f64,
) -> f64 {
    let flat = 0.012 * lambda.sqrt() * trim_deg.powf(1.1);
    let lift = deadrise_lift(flat, deadrise_deg);
    let loss = lift / (lambda * trim_deg.to_radians().cos());
    velocity * (1.0 - loss).sqrt()
}

pub(crate) fn root_or_error(
    outcome: &RootOutcome,
    stage: SolveStage,
    velocity: f64,
) -> HullResult<f64> {
    match outcome {
        RootOutcome::Failed {
            bracket_error,
            fallback_error,
        } => Err(HullError::RootFinding {
            stage,
            velocity,
            reason: format!("bracket: {bracket_error}; fallback: {fallback_error}"),
        }),
        RootOutcome::Converged { x, .. } | RootOutcome::FallbackUsed { x, .. } => Ok(*x),
    }
}
