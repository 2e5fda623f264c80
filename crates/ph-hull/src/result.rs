//! Per-velocity equilibrium record.

use crate::trim::TrimState;
use serde::{Deserialize, Serialize};

/// How the equilibrium trim was located.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Convergence {
    /// Brent found the moment root inside the trim bracket.
    Converged { iterations: usize },
    /// No usable bracket; the trim is the grid point with the smallest moment.
    LowConfidence { residual_moment: f64 },
}

/// Inner stages that needed their Newton fallback at the returned trim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackUsage {
    pub lift_coefficient: bool,
    pub wetted_length: bool,
}

impl FallbackUsage {
    pub fn any(&self) -> bool {
        self.lift_coefficient || self.wetted_length
    }
}

/// Equilibrium state of the hull at one forward speed. SI units throughout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    pub velocity_mps: f64,
    pub trim_deg: f64,
    pub resistance_hydro_n: f64,
    pub resistance_spray_n: f64,
    pub resistance_air_n: f64,
    pub resistance_total_n: f64,
    /// Positive downward
    pub sinkage_m: f64,
    pub lambda: f64,
    pub keel_wetted_length_m: f64,
    pub chine_wetted_length_m: f64,
    pub transom_draft_m: f64,
    pub bottom_velocity_mps: f64,
    pub drag_arm_m: f64,
    pub lift_arm_m: f64,
    pub spray_x_m: f64,
    pub spray_y_m: f64,
    pub spray_z_m: f64,
    /// Beam Froude number `Cv`
    pub froude_beam: f64,
    /// Length Froude number `Fn`
    pub froude_length: f64,
    /// Pitching moment left at `trim_deg` (N*m)
    pub residual_moment_nm: f64,
    pub cl0: f64,
    pub convergence: Convergence,
    pub fallbacks: FallbackUsage,
}

impl EquilibriumResult {
    pub(crate) fn from_state(
        state: &TrimState,
        cv: f64,
        froude_length: f64,
        cl0: f64,
        convergence: Convergence,
        fallbacks: FallbackUsage,
    ) -> Self {
        let hydro = &state.hydro;
        Self {
            velocity_mps: hydro.velocity,
            trim_deg: hydro.trim_deg,
            resistance_hydro_n: hydro.resistance,
            resistance_spray_n: state.spray_resistance,
            resistance_air_n: state.air_resistance,
            resistance_total_n: state.total_resistance,
            sinkage_m: state.sinkage,
            lambda: hydro.lambda,
            keel_wetted_length_m: state.keel_wetted_length,
            chine_wetted_length_m: state.chine_wetted_length,
            transom_draft_m: state.transom_draft,
            bottom_velocity_mps: hydro.bottom_velocity,
            drag_arm_m: hydro.drag_arm,
            lift_arm_m: hydro.lift_arm,
            spray_x_m: state.spray.x,
            spray_y_m: state.spray.y,
            spray_z_m: state.spray.z,
            froude_beam: cv,
            froude_length,
            residual_moment_nm: hydro.moment,
            cl0,
            convergence,
            fallbacks,
        }
    }

    /// True when the trim came from a bracketed moment root.
    pub fn is_converged(&self) -> bool {
        matches!(self.convergence, Convergence::Converged { .. })
    }
}
