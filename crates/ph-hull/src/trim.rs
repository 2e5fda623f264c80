//! State of the hull at a trial trim.
//!
//! [`HydroState`] carries everything up to the pitching moment and is what the
//! outer trim solve evaluates. [`TrimState`] adds the post-equilibrium
//! geometry, spray and resistance breakdown.

use crate::config::SolverConfig;
use crate::error::{HullError, HullResult, SolveStage};
use crate::friction::planing_friction_coefficient;
use crate::lift::{LiftInversion, mean_bottom_velocity, root_or_error, wetted_length_ratio};
use crate::params::HullParameters;
use crate::spray::{SprayGeometry, whisker_spray_resistance};
use ph_core::constants::{AIR_DENSITY_KG_M3, AIR_DRAG_COEFF};
use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HydroState {
    pub velocity: f64,
    pub trim_deg: f64,
    /// Mean wetted length-beam ratio
    pub lambda: f64,
    /// `λ` came from the Newton fallback
    pub wetted_length_fallback: bool,
    /// Mean bottom velocity `Vm` (m/s)
    pub bottom_velocity: f64,
    pub reynolds: f64,
    pub friction_coefficient: f64,
    /// Frictional drag along the bottom `Df` (N)
    pub friction_drag: f64,
    /// Hydrodynamic resistance `R = Df / cos τ + Δ tan τ` (N)
    pub resistance: f64,
    /// Centre of pressure forward of the transom, as a fraction of `λB`
    pub pressure_center: f64,
    /// Drag arm `a` (m)
    pub drag_arm: f64,
    /// Lift arm `c` (m)
    pub lift_arm: f64,
    /// Pitching moment about the CG (N*m)
    pub moment: f64,
}

impl HydroState {
    pub fn evaluate(
        params: &HullParameters,
        lift: &LiftInversion,
        velocity: f64,
        trim_deg: f64,
        config: &SolverConfig,
    ) -> HullResult<Self> {
        if !(trim_deg > config.min_trim_deg) {
            return Err(HullError::InvalidTrim {
                trim_deg,
                min: config.min_trim_deg,
            });
        }

        let outcome = wetted_length_ratio(params, lift, trim_deg, config);
        let lambda = root_or_error(&outcome, SolveStage::WettedLength, velocity)?;

        let tau = trim_deg.to_radians();
        let beta = params.deadrise_rad();
        let b = params.beam();
        let delta = params.displacement();
        let f = params.thrust_offset();

        let vm = mean_bottom_velocity(velocity, lambda, trim_deg, params.deadrise_deg());
        let non_finite = |what| HullError::NonFinite {
            what,
            velocity,
            trim_deg,
        };
        if !vm.is_finite() {
            return Err(non_finite("mean bottom velocity"));
        }

        let reynolds = vm * lambda * b / params.kinematic_viscosity();
        let cf = planing_friction_coefficient(reynolds);
        let df = params.water_density() * vm * vm * lambda * b * b * cf / (2.0 * beta.cos());
        let resistance = df / tau.cos() + delta * tau.tan();

        let cv2 = lift.cv * lift.cv;
        let cp = 0.75 - lambda * lambda / (5.21 * cv2 + 2.39 * lambda * lambda);
        let a = params.vcg() - 0.25 * b * beta.tan();
        let c = params.lcg() - cp * lambda * b;

        let lift_term =
            (1.0 - tau.sin() * (tau + params.thrust_angle_rad()).sin()) * c / tau.cos();
        let moment = delta * (lift_term - f * tau.sin()) + df * (a - f);
        if !moment.is_finite() {
            return Err(non_finite("pitching moment"));
        }

        Ok(Self {
            velocity,
            trim_deg,
            lambda,
            wetted_length_fallback: outcome.used_fallback(),
            bottom_velocity: vm,
            reynolds,
            friction_coefficient: cf,
            friction_drag: df,
            resistance,
            pressure_center: cp,
            drag_arm: a,
            lift_arm: c,
            moment,
        })
    }
}

/// Full derivation at a trim, including sinkage, spray and total resistance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimState {
    pub hydro: HydroState,
    /// Wetted keel length `Lk` (m)
    pub keel_wetted_length: f64,
    /// Wetted chine length `Lc` (m)
    pub chine_wetted_length: f64,
    /// Keel draft at the transom `d = Lk sin τ` (m)
    pub transom_draft: f64,
    /// Sinkage relative to rest, positive downward (m)
    pub sinkage: f64,
    pub spray: SprayGeometry,
    pub spray_resistance: f64,
    pub air_resistance: f64,
    pub total_resistance: f64,
}

impl TrimState {
    pub fn derive(params: &HullParameters, hydro: HydroState) -> Self {
        let tau = hydro.trim_deg.to_radians();
        let v = hydro.velocity;
        let b = params.beam();

        let chine_offset = b * params.deadrise_rad().tan() / (2.0 * PI * tau.tan());
        let lk = hydro.lambda * b + chine_offset;
        let lc = hydro.lambda * b - chine_offset;

        let vcg = params.vcg();
        let cg_height = vcg * tau.cos() - (lk - params.lcg()) * tau.sin();
        let sinkage = -(cg_height - (vcg - params.draft()));

        let spray = SprayGeometry::compute(params, v, tau);
        let spray_resistance = whisker_spray_resistance(params, v, tau);
        let air_resistance =
            0.5 * AIR_DENSITY_KG_M3 * v * v * params.frontal_area() * AIR_DRAG_COEFF;

        Self {
            hydro,
            keel_wetted_length: lk,
            chine_wetted_length: lc,
            transom_draft: lk * tau.sin(),
            sinkage,
            spray,
            spray_resistance,
            air_resistance,
            total_resistance: hydro.resistance + spray_resistance + air_resistance,
        }
    }
}
