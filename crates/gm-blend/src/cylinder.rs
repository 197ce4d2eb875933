//! Component weights needed to fill a cylinder with a target mixture.

use crate::error::{BlendError, BlendResult};
use gm_core::ensure_positive;
use gm_core::units::constants::R_L_BAR;
use gm_core::units::{Pressure, Temperature, Volume};
use gm_eos::{CriticalProperties, EosModel, Mixture, StatePoint};
use serde::Serialize;
use std::fmt;
use uom::si::pressure::bar;
use uom::si::thermodynamic_temperature::kelvin;
use uom::si::volume::liter;

/// Cylinder and fill conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderSettings {
    /// Water volume [L]
    pub volume_l: f64,
    /// Fill pressure [bar]
    pub pressure_bar: f64,
    /// Gas temperature [K]
    pub temperature_k: f64,
    /// Gas constant [L·bar/(mol·K)]
    pub gas_constant: f64,
}

impl Default for CylinderSettings {
    fn default() -> Self {
        Self {
            volume_l: 40.0,
            pressure_bar: 150.0,
            temperature_k: 293.0,
            gas_constant: R_L_BAR,
        }
    }
}

impl CylinderSettings {
    pub fn from_quantities(volume: Volume, pressure: Pressure, temperature: Temperature) -> Self {
        Self {
            volume_l: volume.get::<liter>(),
            pressure_bar: pressure.get::<bar>(),
            temperature_k: temperature.get::<kelvin>(),
            ..Self::default()
        }
    }

    fn validate(&self) -> BlendResult<()> {
        ensure_positive(self.volume_l, "cylinder volume")?;
        ensure_positive(self.pressure_bar, "fill pressure")?;
        ensure_positive(self.temperature_k, "fill temperature")?;
        ensure_positive(self.gas_constant, "gas constant")?;
        Ok(())
    }
}

/// Where the compressibility factor for the fill comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZSource {
    /// A Z value supplied by the user.
    Fixed(f64),
    /// Z of the mixture (mixing rule) from an equation of state.
    Model(EosModel),
}

impl fmt::Display for ZSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(z) => write!(f, "fixed Z = {z}"),
            Self::Model(model) => write!(f, "{model}"),
        }
    }
}

/// Amount of one component in the fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentWeight {
    pub name: String,
    pub mole_fraction: f64,
    pub moles: f64,
    pub weight_g: f64,
}

/// Result of a blend calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendReport {
    pub settings: CylinderSettings,
    pub z_source: String,
    pub z: f64,
    pub critical: CriticalProperties,
    pub total_moles: f64,
    pub total_weight_g: f64,
    pub components: Vec<ComponentWeight>,
}

/// Weights of each component to reach the cylinder's fill pressure.
///
/// n_total = P·V / (Z·R·T), then each component gets x_i·n_total moles and
/// x_i·n_total·M_i grams.
pub fn blend_weights(
    mixture: &Mixture,
    settings: &CylinderSettings,
    z_source: ZSource,
) -> BlendResult<BlendReport> {
    settings.validate()?;
    let critical = mixture.critical_properties();

    let z = match z_source {
        ZSource::Fixed(z) => {
            if !z.is_finite() || z <= 0.0 {
                return Err(BlendError::invalid(format!(
                    "compressibility factor must be positive and finite (got {z})"
                )));
            }
            z
        }
        ZSource::Model(model) => {
            let state = StatePoint::new(settings.pressure_bar, settings.temperature_k)?;
            model.evaluate(&state, &critical)?
        }
    };

    let total_moles = settings.pressure_bar * settings.volume_l
        / (z * settings.gas_constant * settings.temperature_k);

    let components: Vec<ComponentWeight> = mixture
        .iter()
        .map(|(component, x)| {
            let moles = total_moles * x;
            ComponentWeight {
                name: component.name().to_string(),
                mole_fraction: x,
                moles,
                weight_g: moles * component.molar_mass(),
            }
        })
        .collect();
    let total_weight_g = components.iter().map(|c| c.weight_g).sum();

    tracing::debug!(z, total_moles, total_weight_g, source = %z_source, "blend computed");

    Ok(BlendReport {
        settings: *settings,
        z_source: z_source.to_string(),
        z,
        critical,
        total_moles,
        total_weight_g,
        components,
    })
}
