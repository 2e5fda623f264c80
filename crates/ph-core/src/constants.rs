//! Default physical constants for calm-water planing calculations.

/// Standard gravity used by the planing correlations (m/s^2).
pub const GRAVITY_MPS2: f64 = 9.81;

/// Fresh water density (kg/m^3).
pub const WATER_DENSITY_KG_M3: f64 = 1000.0;

/// Kinematic viscosity of water (m^2/s).
pub const WATER_KIN_VISC_M2_S: f64 = 1.0e-6;

/// Air density for above-water drag (kg/m^3).
pub const AIR_DENSITY_KG_M3: f64 = 1.225;

/// Air drag coefficient on the frontal area.
pub const AIR_DRAG_COEFF: f64 = 0.7;

/// Roughness allowance added to the ITTC friction line.
pub const ROUGHNESS_ALLOWANCE: f64 = 0.0004;

/// Reynolds number separating laminar and turbulent whisker-spray friction.
pub const SPRAY_TRANSITION_RE: f64 = 1.5e6;
