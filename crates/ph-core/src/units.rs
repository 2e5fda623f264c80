// ph-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Angle as UomAngle, Area as UomArea, Force as UomForce,
    DiffusionCoefficient as UomDiffusionCoefficient, Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Angle = UomAngle;
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type Force = UomForce;
// uom has no kinematic viscosity quantity; m^2/s is its diffusion coefficient.
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Velocity = UomVelocity;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn knots(v: f64) -> Velocity {
    use uom::si::velocity::knot;
    Velocity::new::<knot>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::diffusion_coefficient::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

// Readers back to plain SI floats.

#[inline]
pub fn in_m(v: Length) -> f64 {
    v.get::<uom::si::length::meter>()
}

#[inline]
pub fn in_m2(v: Area) -> f64 {
    v.get::<uom::si::area::square_meter>()
}

#[inline]
pub fn in_kg(v: Mass) -> f64 {
    v.get::<uom::si::mass::kilogram>()
}

#[inline]
pub fn in_newton(v: Force) -> f64 {
    v.get::<uom::si::force::newton>()
}

#[inline]
pub fn in_mps(v: Velocity) -> f64 {
    v.get::<uom::si::velocity::meter_per_second>()
}

#[inline]
pub fn in_mps2(v: Accel) -> f64 {
    v.get::<uom::si::acceleration::meter_per_second_squared>()
}

#[inline]
pub fn in_kgpm3(v: Density) -> f64 {
    v.get::<uom::si::mass_density::kilogram_per_cubic_meter>()
}

#[inline]
pub fn in_m2ps(v: KinVisc) -> f64 {
    v.get::<uom::si::diffusion_coefficient::square_meter_per_second>()
}

#[inline]
pub fn in_deg(v: Angle) -> f64 {
    v.get::<uom::si::angle::degree>()
}
