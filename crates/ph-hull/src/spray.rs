//! Whisker-spray geometry and resistance.

use crate::friction::whisker_spray_friction;
use crate::params::HullParameters;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Spray sheet thrown forward along the chines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SprayGeometry {
    /// Spray root angle `α` in the plane of the bottom (rad)
    pub root_angle: f64,
    /// Spray deflection angle `γ` (rad)
    pub deflection_angle: f64,
    /// Spray sheet velocity (m/s)
    pub spray_velocity: f64,
    /// Longitudinal extent (m)
    pub x: f64,
    /// Transverse extent (m)
    pub y: f64,
    /// Height above the waterline (m)
    pub z: f64,
}

impl SprayGeometry {
    pub fn compute(params: &HullParameters, velocity: f64, trim_rad: f64) -> Self {
        let tan_beta = params.deadrise_rad().tan();
        let alpha = spray_root_angle(trim_rad, tan_beta);
        let gamma = alpha + ((1.0 - 2.0 / PI) * alpha.sin() * tan_beta).atan();
        let vs = velocity * gamma.sin();
        let g = params.gravity();
        let reach = vs * vs / g * gamma.sin() * gamma.cos();
        Self {
            root_angle: alpha,
            deflection_angle: gamma,
            spray_velocity: vs,
            x: reach * alpha.cos(),
            y: reach * alpha.sin(),
            z: vs * vs / (2.0 * g),
        }
    }
}

fn spray_root_angle(trim_rad: f64, tan_beta: f64) -> f64 {
    (PI * trim_rad.tan() / (2.0 * tan_beta)).atan()
}

/// Frictional drag of the whisker-spray area ahead of the stagnation line (N).
pub fn whisker_spray_resistance(params: &HullParameters, velocity: f64, trim_rad: f64) -> f64 {
    let beta = params.deadrise_rad();
    let alpha = spray_root_angle(trim_rad, beta.tan());
    let theta = 2.0 * alpha / beta.cos();
    let sin2a_cosb = (2.0 * alpha).sin() * beta.cos();

    let delta_lambda = theta.cos() / (4.0 * sin2a_cosb);
    let spray_length = 0.5 * (0.5 * params.beam()) / sin2a_cosb;
    let reynolds = velocity * spray_length / params.kinematic_viscosity();
    let cf = whisker_spray_friction(reynolds);

    let b = params.beam();
    0.5 * params.water_density() * velocity * velocity * delta_lambda * b * b * cf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_spray_geometry() {
        let params = HullParameters::reference_planing_hull();
        let spray = SprayGeometry::compute(&params, 5.2267, 3.533_884_f64.to_radians());
        assert!((spray.x - 0.062_981).abs() < 1e-4);
        assert!((spray.y - 0.016_786).abs() < 1e-4);
        assert!((spray.z - 0.117_323).abs() < 1e-4);
        assert!(spray.deflection_angle > spray.root_angle);
    }

    #[test]
    fn reference_spray_resistance() {
        let params = HullParameters::reference_planing_hull();
        let rs = whisker_spray_resistance(&params, 5.2267, 3.533_884_f64.to_radians());
        assert!((rs - 37.935).abs() / 37.935 < 1e-3, "Rs = {rs}");
    }
}
