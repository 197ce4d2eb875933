//! Filling records: weighed-in component masses to composition.

use crate::error::{BlendError, BlendResult};
use gm_eos::Component;
use serde::Serialize;

/// Parts per million (mol) in one mole percent.
const PPM_PER_PERCENT: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedComponent {
    pub name: String,
    pub weight_g: f64,
    pub moles: f64,
    pub mol_percent: f64,
    pub ppm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillingRecord {
    pub components: Vec<RecordedComponent>,
    pub total_weight_g: f64,
    pub total_moles: f64,
}

impl FillingRecord {
    pub fn get(&self, name: &str) -> Option<&RecordedComponent> {
        self.components
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Composition of a fill from the recorded weight [g] of each component.
pub fn filling_record(weights: &[(Component, f64)]) -> BlendResult<FillingRecord> {
    if weights.is_empty() {
        return Err(BlendError::invalid("filling record needs at least one component"));
    }
    for (component, weight) in weights {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(BlendError::invalid(format!(
                "weight of {} must be finite and non-negative (got {weight} g)",
                component.name()
            )));
        }
    }

    let moles: Vec<f64> = weights
        .iter()
        .map(|(component, weight)| weight / component.molar_mass())
        .collect();
    let total_moles: f64 = moles.iter().sum();
    if total_moles <= 0.0 {
        return Err(BlendError::EmptyRecord { total_moles });
    }

    let components = weights
        .iter()
        .zip(&moles)
        .map(|((component, weight), &n)| {
            let mol_percent = n / total_moles * 100.0;
            RecordedComponent {
                name: component.name().to_string(),
                weight_g: *weight,
                moles: n,
                mol_percent,
                ppm: mol_percent * PPM_PER_PERCENT,
            }
        })
        .collect();

    Ok(FillingRecord {
        components,
        total_weight_g: weights.iter().map(|(_, w)| w).sum(),
        total_moles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gm_eos::Species;

    fn recorded() -> Vec<(Component, f64)> {
        vec![
            (Species::SulfurDioxide.into(), 2.521),
            (Species::CO.into(), 1.261),
            (Species::CO2.into(), 923.067),
            (Species::N2.into(), 3082.226),
        ]
    }

    #[test]
    fn weights_to_mole_percent_and_ppm() {
        let record = filling_record(&recorded()).unwrap();
        assert!((record.total_moles - 131.085).abs() < 1e-2);

        let so2 = &record.components[0];
        assert!((so2.mol_percent - 0.03002).abs() < 1e-4);
        assert!((so2.ppm - so2.mol_percent * 1e4).abs() < 1e-9);
        let co2 = &record.components[2];
        assert!((co2.mol_percent - 16.0).abs() < 1e-2);

        let total: f64 = record.components.iter().map(|c| c.mol_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_by_name() {
        let record = filling_record(&recorded()).unwrap();
        assert!(record.get("nitrogen").is_some());
        assert!(record.get("argon").is_none());
    }

    #[test]
    fn zero_total_is_rejected() {
        let err = filling_record(&[(Species::N2.into(), 0.0)]).unwrap_err();
        assert!(matches!(err, BlendError::EmptyRecord { .. }));
        assert!(filling_record(&[]).is_err());
        assert!(filling_record(&[(Species::N2.into(), -1.0)]).is_err());
    }
}
