//! Skin-friction correlations.

use ph_core::constants::{ROUGHNESS_ALLOWANCE, SPRAY_TRANSITION_RE};

/// ITTC 1957 model-ship correlation line, `0.075 / (log10 Re - 2)^2`.
pub fn ittc_1957(reynolds: f64) -> f64 {
    let denom = reynolds.log10() - 2.0;
    0.075 / (denom * denom)
}

/// Planing bottom friction coefficient: ITTC line plus roughness allowance.
pub fn planing_friction_coefficient(reynolds: f64) -> f64 {
    ittc_1957(reynolds) + ROUGHNESS_ALLOWANCE
}

/// Friction coefficient for the whisker-spray sheet.
///
/// Turbulent Schlichting form with transition correction at or above
/// `Re = 1.5e6`, laminar Blasius below.
pub fn whisker_spray_friction(reynolds: f64) -> f64 {
    if reynolds >= SPRAY_TRANSITION_RE {
        0.074 / reynolds.powf(0.2) - 4800.0 / reynolds
    } else {
        1.328 / reynolds.sqrt()
    }
}
