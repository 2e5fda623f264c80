//! Transom wake profiles after Savitsky & Michael (2010).

use crate::params::HullParameters;
use crate::result::EquilibriumResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const STATIONS: usize = 61;
const STATION_STEP: f64 = 0.05;
const QUARTER_BEAM_COEFF: f64 = 0.75;

/// Wake elevation behind the transom, non-dimensionalised by beam.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WakeProfile {
    /// Distance aft of the transom, `X/B`
    pub x_over_b: Vec<f64>,
    /// Centerline elevation, `H/B`
    pub centerline: Vec<f64>,
    /// Quarter-beam elevation, `H/B`
    pub quarter_beam: Vec<f64>,
}

impl WakeProfile {
    /// Profile for a solved point; `X/B` runs from 0 to 3 in steps of 0.05.
    pub fn for_result(params: &HullParameters, result: &EquilibriumResult) -> Self {
        let b = params.beam();
        let lk_over_b = result.keel_wetted_length_m / b;
        let growth = 0.03 * lk_over_b * result.trim_deg.powf(1.5);
        let centerline_coeff = if (params.deadrise_deg() - 10.0).abs() < 0.1 {
            1.5
        } else {
            2.0
        };

        let mut profile = Self {
            x_over_b: Vec::with_capacity(STATIONS),
            centerline: Vec::with_capacity(STATIONS),
            quarter_beam: Vec::with_capacity(STATIONS),
        };
        for i in 0..STATIONS {
            let x = i as f64 * STATION_STEP;
            let shape = (PI / result.froude_beam * (x / 3.0).powf(1.5)).sin();
            profile.x_over_b.push(x);
            profile
                .centerline
                .push(0.17 * (centerline_coeff + growth) * shape);
            profile
                .quarter_beam
                .push(0.17 * (QUARTER_BEAM_COEFF + growth) * shape);
        }
        profile
    }

    pub fn len(&self) -> usize {
        self.x_over_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_over_b.is_empty()
    }

    /// `(X/B, centerline, quarter-beam)` rows in station order.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x_over_b
            .iter()
            .zip(&self.centerline)
            .zip(&self.quarter_beam)
            .map(|((x, c), q)| (*x, *c, *q))
    }
}
