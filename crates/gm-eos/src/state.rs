//! State points at which Z is evaluated.

use crate::error::{EosError, EosResult};
use gm_core::units::{Pressure, Temperature, to_bar, to_kelvin};
use serde::Serialize;

/// Pressure [bar] and temperature [K].
///
/// Constructed and consumed per calculation; carries no other state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatePoint {
    p_bar: f64,
    t_k: f64,
}

impl StatePoint {
    /// Validates that pressure and temperature are positive and finite.
    pub fn new(p_bar: f64, t_k: f64) -> EosResult<Self> {
        if !p_bar.is_finite() || p_bar <= 0.0 {
            return Err(EosError::invalid(format!(
                "pressure must be positive and finite (got {p_bar} bar)"
            )));
        }
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(EosError::invalid(format!(
                "temperature must be positive and finite (got {t_k} K)"
            )));
        }
        Ok(Self { p_bar, t_k })
    }

    /// Create a state point from unit-carrying quantities.
    pub fn from_pt(p: Pressure, t: Temperature) -> EosResult<Self> {
        Self::new(to_bar(p), to_kelvin(t))
    }

    pub fn pressure_bar(&self) -> f64 {
        self.p_bar
    }

    pub fn temperature_k(&self) -> f64 {
        self.t_k
    }
}
