//! Hull and environment parameters.

use crate::error::{HullError, HullResult};
use ph_core::constants::{GRAVITY_MPS2, WATER_DENSITY_KG_M3, WATER_KIN_VISC_M2_S};
use ph_core::numeric::{ensure_finite, ensure_open_range, ensure_positive};
use ph_core::units::{
    Accel, Angle, Area, Density, Force, KinVisc, Length, Mass, deg, in_deg, in_kg, in_kgpm3, in_m,
    in_m2, in_m2ps, in_mps2, in_newton, kgpm3, m, m2, m2ps, mps2,
};

/// Validated physical description of a planing hull in calm water (SI units).
///
/// Built once per calculation through [`HullParametersBuilder`] and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct HullParameters {
    gravity: f64,
    water_density: f64,
    kinematic_viscosity: f64,
    length: f64,
    beam: f64,
    mass: f64,
    deadrise_deg: f64,
    lcg: f64,
    vcg: f64,
    draft: f64,
    frontal_area: f64,
    thrust_offset: f64,
    thrust_angle_deg: f64,
}

impl HullParameters {
    pub fn builder() -> HullParametersBuilder {
        HullParametersBuilder::default()
    }

    /// Full-scale 8 m test hull used to validate the method.
    pub fn reference_planing_hull() -> Self {
        Self {
            gravity: GRAVITY_MPS2,
            water_density: WATER_DENSITY_KG_M3,
            kinematic_viscosity: WATER_KIN_VISC_M2_S,
            length: 8.0,
            beam: 1.6,
            mass: 3017.4373,
            deadrise_deg: 20.0,
            lcg: 3.28,
            vcg: 0.47,
            draft: 0.40,
            frontal_area: 1.3818,
            thrust_offset: 0.0,
            thrust_angle_deg: 0.0,
        }
    }

    /// Gravitational acceleration (m/s^2)
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Water density (kg/m^3)
    pub fn water_density(&self) -> f64 {
        self.water_density
    }

    /// Kinematic viscosity of water (m^2/s)
    pub fn kinematic_viscosity(&self) -> f64 {
        self.kinematic_viscosity
    }

    /// Hull length (m)
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Chine beam (m)
    pub fn beam(&self) -> f64 {
        self.beam
    }

    /// Mass (kg)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Displacement weight `M * g` (N)
    pub fn displacement(&self) -> f64 {
        self.mass * self.gravity
    }

    pub fn deadrise_deg(&self) -> f64 {
        self.deadrise_deg
    }

    pub fn deadrise_rad(&self) -> f64 {
        self.deadrise_deg.to_radians()
    }

    /// Longitudinal centre of gravity forward of the transom (m)
    pub fn lcg(&self) -> f64 {
        self.lcg
    }

    /// Vertical centre of gravity above the keel (m)
    pub fn vcg(&self) -> f64 {
        self.vcg
    }

    /// Static draft (m)
    pub fn draft(&self) -> f64 {
        self.draft
    }

    /// Frontal area exposed to air drag (m^2)
    pub fn frontal_area(&self) -> f64 {
        self.frontal_area
    }

    /// Distance between thrust line and CG, `f` (m)
    pub fn thrust_offset(&self) -> f64 {
        self.thrust_offset
    }

    /// Angle between thrust line and keel, `ε`
    pub fn thrust_angle_deg(&self) -> f64 {
        self.thrust_angle_deg
    }

    pub fn thrust_angle_rad(&self) -> f64 {
        self.thrust_angle_deg.to_radians()
    }

    /// Length Froude number `V / sqrt(g L)`.
    pub fn length_froude(&self, velocity: f64) -> f64 {
        velocity / (self.gravity * self.length).sqrt()
    }

    /// Beam Froude number `Cv = V / sqrt(g B)`.
    pub fn beam_froude(&self, velocity: f64) -> f64 {
        velocity / (self.gravity * self.beam).sqrt()
    }
}

#[derive(Clone, Copy, Debug)]
enum MassInput {
    Mass(Mass),
    Weight(Force),
}

/// Builder taking typed quantities; [`build`](Self::build) validates them.
#[derive(Clone, Debug)]
pub struct HullParametersBuilder {
    gravity: Accel,
    water_density: Density,
    kinematic_viscosity: KinVisc,
    length: Option<Length>,
    beam: Option<Length>,
    mass: Option<MassInput>,
    deadrise: Option<Angle>,
    lcg: Option<Length>,
    vcg: Option<Length>,
    draft: Option<Length>,
    frontal_area: Area,
    thrust_offset: Length,
    thrust_angle: Angle,
}

impl Default for HullParametersBuilder {
    fn default() -> Self {
        Self {
            gravity: mps2(GRAVITY_MPS2),
            water_density: kgpm3(WATER_DENSITY_KG_M3),
            kinematic_viscosity: m2ps(WATER_KIN_VISC_M2_S),
            length: None,
            beam: None,
            mass: None,
            deadrise: None,
            lcg: None,
            vcg: None,
            draft: None,
            frontal_area: m2(0.0),
            thrust_offset: m(0.0),
            thrust_angle: deg(0.0),
        }
    }
}

impl HullParametersBuilder {
    pub fn gravity(mut self, g: Accel) -> Self {
        self.gravity = g;
        self
    }

    pub fn water_density(mut self, rho: Density) -> Self {
        self.water_density = rho;
        self
    }

    pub fn kinematic_viscosity(mut self, nu: KinVisc) -> Self {
        self.kinematic_viscosity = nu;
        self
    }

    pub fn length(mut self, length: Length) -> Self {
        self.length = Some(length);
        self
    }

    pub fn beam(mut self, beam: Length) -> Self {
        self.beam = Some(beam);
        self
    }

    pub fn mass(mut self, mass: Mass) -> Self {
        self.mass = Some(MassInput::Mass(mass));
        self
    }

    /// Displacement given as a weight; converted with the builder's gravity.
    pub fn displacement(mut self, weight: Force) -> Self {
        self.mass = Some(MassInput::Weight(weight));
        self
    }

    pub fn deadrise(mut self, beta: Angle) -> Self {
        self.deadrise = Some(beta);
        self
    }

    pub fn lcg(mut self, lcg: Length) -> Self {
        self.lcg = Some(lcg);
        self
    }

    pub fn vcg(mut self, vcg: Length) -> Self {
        self.vcg = Some(vcg);
        self
    }

    pub fn draft(mut self, draft: Length) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn frontal_area(mut self, area: Area) -> Self {
        self.frontal_area = area;
        self
    }

    pub fn thrust_offset(mut self, f: Length) -> Self {
        self.thrust_offset = f;
        self
    }

    pub fn thrust_angle(mut self, epsilon: Angle) -> Self {
        self.thrust_angle = epsilon;
        self
    }

    pub fn build(self) -> HullResult<HullParameters> {
        let gravity = ensure_positive(in_mps2(self.gravity), "gravity")?;
        let water_density = ensure_positive(in_kgpm3(self.water_density), "water density")?;
        let kinematic_viscosity =
            ensure_positive(in_m2ps(self.kinematic_viscosity), "kinematic viscosity")?;

        let length = required(self.length, "length")?;
        let beam = required(self.beam, "beam")?;
        let lcg = required(self.lcg, "lcg")?;
        let vcg = required(self.vcg, "vcg")?;
        let draft = required(self.draft, "draft")?;
        let deadrise = self
            .deadrise
            .ok_or(HullError::MissingParameter { what: "deadrise" })?;
        let mass = match self.mass {
            Some(MassInput::Mass(mass)) => in_kg(mass),
            Some(MassInput::Weight(weight)) => in_newton(weight) / gravity,
            None => return Err(HullError::MissingParameter { what: "mass" }),
        };

        Ok(HullParameters {
            gravity,
            water_density,
            kinematic_viscosity,
            length: ensure_positive(in_m(length), "length")?,
            beam: ensure_positive(in_m(beam), "beam")?,
            mass: ensure_positive(mass, "mass")?,
            deadrise_deg: ensure_open_range(in_deg(deadrise), 0.0, 90.0, "deadrise", "(0, 90) deg")?,
            lcg: ensure_finite(in_m(lcg), "lcg")?,
            vcg: ensure_finite(in_m(vcg), "vcg")?,
            draft: ensure_positive(in_m(draft), "draft")?,
            frontal_area: non_negative(in_m2(self.frontal_area), "frontal area")?,
            thrust_offset: ensure_finite(in_m(self.thrust_offset), "thrust offset")?,
            thrust_angle_deg: ensure_finite(in_deg(self.thrust_angle), "thrust angle")?,
        })
    }
}

fn required(value: Option<Length>, what: &'static str) -> HullResult<Length> {
    value.ok_or(HullError::MissingParameter { what })
}

fn non_negative(v: f64, what: &'static str) -> HullResult<f64> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(ph_core::PhError::OutOfRange {
            what,
            value: v,
            expected: ">= 0",
        }
        .into());
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::{kg, newton};

    fn reference_builder() -> HullParametersBuilder {
        HullParameters::builder()
            .length(m(8.0))
            .beam(m(1.6))
            .mass(kg(3017.4373))
            .deadrise(deg(20.0))
            .lcg(m(3.28))
            .vcg(m(0.47))
            .draft(m(0.40))
            .frontal_area(m2(1.3818))
    }

    #[test]
    fn builder_matches_reference_hull() {
        let params = reference_builder().build().unwrap();
        let reference = HullParameters::reference_planing_hull();
        assert!((params.length() - reference.length()).abs() < 1e-12);
        assert!((params.mass() - reference.mass()).abs() < 1e-9);
        assert!((params.deadrise_deg() - 20.0).abs() < 1e-12);
        assert!((params.displacement() - 3017.4373 * 9.81).abs() < 1e-6);
    }

    #[test]
    fn displacement_weight_converts_to_mass() {
        let params = reference_builder()
            .displacement(newton(29_430.0))
            .build()
            .unwrap();
        assert!((params.mass() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn missing_beam_is_reported() {
        let builder = HullParameters::builder()
            .length(m(8.0))
            .mass(kg(3000.0))
            .deadrise(deg(20.0))
            .lcg(m(3.0))
            .vcg(m(0.5))
            .draft(m(0.4));
        assert_eq!(
            builder.build().unwrap_err(),
            HullError::MissingParameter { what: "beam" }
        );
    }

    #[test]
    fn rejects_out_of_range_deadrise() {
        for beta in [0.0, 90.0, -10.0, 120.0] {
            let err = reference_builder().deadrise(deg(beta)).build().unwrap_err();
            assert!(matches!(err, HullError::InvalidParameter(_)), "beta={beta}");
        }
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(reference_builder().length(m(0.0)).build().is_err());
        assert!(reference_builder().beam(m(-1.6)).build().is_err());
        assert!(reference_builder().mass(kg(0.0)).build().is_err());
        assert!(reference_builder().draft(m(0.0)).build().is_err());
        assert!(reference_builder().frontal_area(m2(-0.1)).build().is_err());
        assert!(reference_builder().gravity(mps2(0.0)).build().is_err());
        assert!(reference_builder().lcg(m(f64::NAN)).build().is_err());
    }

    #[test]
    fn froude_numbers() {
        let params = HullParameters::reference_planing_hull();
        assert!((params.length_froude(5.2267) - 0.589_995).abs() < 1e-5);
        assert!((params.beam_froude(5.2267) - 1.319_268).abs() < 1e-5);
    }
}
