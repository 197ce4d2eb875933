// gm-core/src/units.rs

use uom::si::f64::{
    Mass as UomMass, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
};
use uom::si::{mass::gram, pressure::bar as bar_unit, thermodynamic_temperature::kelvin};
use uom::si::volume::liter;

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    Pressure::new::<bar_unit>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    Volume::new::<liter>(v)
}

#[inline]
pub fn grams(v: f64) -> Mass {
    Mass::new::<gram>(v)
}

#[inline]
pub fn to_bar(p: Pressure) -> f64 {
    p.get::<bar_unit>()
}

#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

#[inline]
pub fn to_liters(v: Volume) -> f64 {
    v.get::<liter>()
}

#[inline]
pub fn to_grams(m: Mass) -> f64 {
    m.get::<gram>()
}

pub mod constants {
    /// Universal gas constant in L·bar/(mol·K), as used for cylinder sizing.
    pub const R_L_BAR: f64 = 0.08314;

    /// Universal gas constant in J/(mol·K).
    pub const R_J_MOL_K: f64 = 8.314_462_618;

    /// Pa per bar.
    pub const PA_PER_BAR: f64 = 1.0e5;

    /// 0 °C in kelvin.
    pub const T_ZERO_CELSIUS: f64 = 273.15;
}
