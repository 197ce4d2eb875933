//! Components and critical-property sets.

use crate::error::{EosError, EosResult};
use crate::species::Species;
use gm_core::numeric::{ensure_finite, ensure_positive};
use serde::Serialize;

/// Critical constants consumed by every Z evaluator.
///
/// Either a pure component's constants or the result of the mixing rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalProperties {
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Critical pressure [bar]
    pub pc_bar: f64,
    /// Acentric factor [-]
    pub omega: f64,
}

impl CriticalProperties {
    /// Validate and build. Tc and Pc must be positive, omega finite.
    pub fn new(tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<Self> {
        ensure_positive(tc_k, "critical temperature")?;
        ensure_positive(pc_bar, "critical pressure")?;
        ensure_finite(omega, "acentric factor")?;
        Ok(Self {
            tc_k,
            pc_bar,
            omega,
        })
    }

    /// Reduced temperature T/Tc.
    pub fn reduced_temperature(&self, t_k: f64) -> f64 {
        t_k / self.tc_k
    }

    /// Reduced pressure P/Pc.
    pub fn reduced_pressure(&self, p_bar: f64) -> f64 {
        p_bar / self.pc_bar
    }
}

/// A chemical species with the data needed for Z and weight calculations.
///
/// Immutable once retrieved from a [`PropertySource`](crate::registry::PropertySource).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    name: String,
    formula: Option<String>,
    /// Molar mass [g/mol]
    molar_mass: f64,
    critical: CriticalProperties,
}

impl Component {
    pub fn new(
        name: impl Into<String>,
        formula: Option<String>,
        molar_mass: f64,
        critical: CriticalProperties,
    ) -> EosResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EosError::invalid("component name must not be empty"));
        }
        ensure_positive(molar_mass, "molar mass")?;
        Ok(Self {
            name,
            formula,
            molar_mass,
            critical,
        })
    }

    pub fn from_species(species: Species) -> Self {
        Self {
            name: species.display_name().to_string(),
            formula: species.formula().map(str::to_string),
            molar_mass: species.molar_mass(),
            critical: CriticalProperties {
                tc_k: species.tc_k(),
                pc_bar: species.pc_bar(),
                omega: species.omega(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    pub fn critical(&self) -> CriticalProperties {
        self.critical
    }

    pub fn tc_k(&self) -> f64 {
        self.critical.tc_k
    }

    pub fn pc_bar(&self) -> f64 {
        self.critical.pc_bar
    }

    pub fn omega(&self) -> f64 {
        self.critical.omega
    }
}

impl From<Species> for Component {
    fn from(species: Species) -> Self {
        Self::from_species(species)
    }
}
