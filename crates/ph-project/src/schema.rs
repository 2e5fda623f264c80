//! Project schema definitions.

use ph_sweep::{FailurePolicy, SpeedSchedule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub constants: ConstantsDef,
    pub hull: HullDef,
    pub speeds: SpeedSchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverDef>,
}

/// Environment constants; omitted fields take fresh-water defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstantsDef {
    #[serde(default = "default_gravity")]
    pub gravity_mps2: f64,
    #[serde(default = "default_water_density")]
    pub water_density_kg_m3: f64,
    #[serde(default = "default_kinematic_viscosity")]
    pub kinematic_viscosity_m2_s: f64,
}

fn default_gravity() -> f64 {
    9.81
}

fn default_water_density() -> f64 {
    1000.0
}

fn default_kinematic_viscosity() -> f64 {
    1.0e-6
}

impl Default for ConstantsDef {
    fn default() -> Self {
        Self {
            gravity_mps2: default_gravity(),
            water_density_kg_m3: default_water_density(),
            kinematic_viscosity_m2_s: default_kinematic_viscosity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HullDef {
    pub length_m: f64,
    pub beam_m: f64,
    /// Exactly one of `mass_kg` and `displacement_n` must be given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displacement_n: Option<f64>,
    pub deadrise_deg: f64,
    pub lcg_m: f64,
    pub vcg_m: f64,
    pub draft_m: f64,
    pub frontal_area_m2: f64,
    #[serde(default)]
    pub thrust_offset_m: f64,
    #[serde(default)]
    pub thrust_angle_deg: f64,
}

/// Optional overrides of the solver's numeric settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_min_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_max_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_tolerance_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_moment_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,
}

impl Project {
    /// The 8 m validation hull over its five test speeds.
    pub fn reference() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: "Reference planing hull".to_string(),
            constants: ConstantsDef::default(),
            hull: HullDef {
                length_m: 8.0,
                beam_m: 1.6,
                mass_kg: Some(3017.4373),
                displacement_n: None,
                deadrise_deg: 20.0,
                lcg_m: 3.28,
                vcg_m: 0.47,
                draft_m: 0.40,
                frontal_area_m2: 1.3818,
                thrust_offset_m: 0.0,
                thrust_angle_deg: 0.0,
            },
            speeds: SpeedSchedule::Discrete {
                values: vec![5.2267, 7.8844, 10.5421, 13.1112, 15.7688],
            },
            solver: None,
        }
    }
}
