//! Mixtures and the critical-property mixing rule.

use crate::component::{Component, CriticalProperties};
use crate::error::{EosError, EosResult};
use gm_core::numeric::{Tolerances, nearly_equal};
use serde::Serialize;

/// Allowed deviation of the mole-fraction sum from one.
pub const MOLE_FRACTION_TOLERANCE: f64 = 1e-6;

/// Ordered set of components with mole fractions summing to one.
///
/// Unlike a normalizing constructor, a sum that is off by more than
/// [`MOLE_FRACTION_TOLERANCE`] is rejected rather than rescaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mixture {
    items: Vec<(Component, f64)>,
}

impl Mixture {
    /// Pure-component "mixture".
    pub fn pure(component: Component) -> Self {
        Self {
            items: vec![(component, 1.0)],
        }
    }

    /// Create a mixture from mole fractions.
    pub fn new(items: Vec<(Component, f64)>) -> EosResult<Self> {
        validate_fractions(items.iter().map(|(c, x)| (c.name(), *x)))?;
        Ok(Self { items })
    }

    /// Create a mixture from mole percentages in [0, 100] summing to 100.
    pub fn from_percentages(items: Vec<(Component, f64)>) -> EosResult<Self> {
        for (component, pct) in &items {
            if !pct.is_finite() || !(0.0..=100.0).contains(pct) {
                return Err(EosError::PercentOutOfRange {
                    component: component.name().to_string(),
                    value: *pct,
                });
            }
        }
        let fractions = items.into_iter().map(|(c, pct)| (c, pct / 100.0)).collect();
        Self::new(fractions)
    }

    /// Create from parallel component and fraction lists.
    pub fn from_parts(components: Vec<Component>, mole_fractions: &[f64]) -> EosResult<Self> {
        if components.len() != mole_fractions.len() {
            return Err(EosError::LengthMismatch {
                components: components.len(),
                fractions: mole_fractions.len(),
            });
        }
        Self::new(components.into_iter().zip(mole_fractions.iter().copied()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Component, f64)> + '_ {
        self.items.iter().map(|(c, x)| (c, *x))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.items.iter().map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mole fraction of the named component (0.0 if not present).
    pub fn mole_fraction(&self, name: &str) -> f64 {
        self.items
            .iter()
            .filter(|(c, _)| c.name().eq_ignore_ascii_case(name))
            .map(|(_, x)| *x)
            .sum()
    }

    /// Mixture molar mass [g/mol]: M_mix = Σ x_i M_i.
    pub fn molar_mass(&self) -> f64 {
        self.items
            .iter()
            .map(|(c, x)| c.molar_mass() * x)
            .sum()
    }

    /// Mixture critical constants from the mixing rule.
    pub fn critical_properties(&self) -> CriticalProperties {
        combine(self.items.iter().map(|(c, x)| (c.critical(), *x)))
    }
}

/// Mixture Tc, Pc and omega from component data and mole fractions.
///
/// Tc and omega mix linearly; Pc uses the geometric-mean combining rule
/// Pc_mix = Σ_i Σ_j x_i x_j √(Pc_i Pc_j).
pub fn mixture_properties(
    components: &[Component],
    mole_fractions: &[f64],
) -> EosResult<CriticalProperties> {
    if components.len() != mole_fractions.len() {
        return Err(EosError::LengthMismatch {
            components: components.len(),
            fractions: mole_fractions.len(),
        });
    }
    validate_fractions(
        components
            .iter()
            .zip(mole_fractions)
            .map(|(c, x)| (c.name(), *x)),
    )?;
    Ok(combine(
        components
            .iter()
            .zip(mole_fractions)
            .map(|(c, x)| (c.critical(), *x)),
    ))
}

fn validate_fractions<'a>(fractions: impl Iterator<Item = (&'a str, f64)>) -> EosResult<()> {
    let mut sum = 0.0;
    let mut count = 0;
    for (name, x) in fractions {
        if !x.is_finite() || x < 0.0 {
            return Err(EosError::InvalidFraction {
                component: name.to_string(),
                value: x,
            });
        }
        sum += x;
        count += 1;
    }
    if count == 0 {
        return Err(EosError::EmptyMixture);
    }
    if !nearly_equal(sum, 1.0, Tolerances::absolute(MOLE_FRACTION_TOLERANCE)) {
        return Err(EosError::FractionSum {
            sum,
            tolerance: MOLE_FRACTION_TOLERANCE,
        });
    }
    Ok(())
}

fn combine(items: impl Iterator<Item = (CriticalProperties, f64)> + Clone) -> CriticalProperties {
    let mut tc_k = 0.0;
    let mut omega = 0.0;
    let mut pc_bar = 0.0;

    for (i, (ci, xi)) in items.clone().enumerate() {
        tc_k += xi * ci.tc_k;
        omega += xi * ci.omega;
        for (j, (cj, xj)) in items.clone().enumerate() {
            // Diagonal once, each unordered cross pair twice.
            if i == j {
                pc_bar += xi * xi * ci.pc_bar;
            } else if i < j {
                pc_bar += 2.0 * xi * xj * (ci.pc_bar * cj.pc_bar).sqrt();
            }
        }
    }

    CriticalProperties {
        tc_k,
        pc_bar,
        omega,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;

    fn comp(species: Species) -> Component {
        Component::from_species(species)
    }

    #[test]
    fn single_component_equals_pure_values() {
        let n2 = comp(Species::N2);
        let props = mixture_properties(&[n2.clone()], &[1.0]).unwrap();
        assert_eq!(props.tc_k, n2.tc_k());
        assert_eq!(props.pc_bar, n2.pc_bar());
        assert_eq!(props.omega, n2.omega());

        let mixture = Mixture::pure(n2.clone());
        assert_eq!(mixture.critical_properties(), n2.critical());
    }

    #[test]
    fn binary_equimolar_pc_is_squared_mean_root() {
        let ch4 = comp(Species::CH4);
        let co2 = comp(Species::CO2);
        let props = mixture_properties(&[ch4.clone(), co2.clone()], &[0.5, 0.5]).unwrap();

        let expected_pc = (0.5 * ch4.pc_bar().sqrt() + 0.5 * co2.pc_bar().sqrt()).powi(2);
        assert!((props.pc_bar - expected_pc).abs() < 1e-9);
        assert!((props.tc_k - 0.5 * (ch4.tc_k() + co2.tc_k())).abs() < 1e-9);
        assert!((props.omega - 0.5 * (ch4.omega() + co2.omega())).abs() < 1e-12);
    }

    #[test]
    fn fraction_sum_outside_tolerance_rejected() {
        let comps = [comp(Species::N2), comp(Species::O2)];
        let err = mixture_properties(&comps, &[0.79, 0.2]).unwrap_err();
        assert!(matches!(err, EosError::FractionSum { .. }));
        assert!(err.is_input_validation());

        let err = mixture_properties(&comps, &[0.79, 0.21 + 2e-6]).unwrap_err();
        assert!(matches!(err, EosError::FractionSum { .. }));
    }

    #[test]
    fn fraction_sum_within_tolerance_accepted() {
        let comps = [comp(Species::N2), comp(Species::O2)];
        assert!(mixture_properties(&comps, &[0.79, 0.21 + 5e-7]).is_ok());
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = mixture_properties(&[comp(Species::N2)], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            EosError::LengthMismatch {
                components: 1,
                fractions: 2
            }
        ));
    }

    #[test]
    fn empty_and_negative_rejected() {
        assert!(matches!(
            mixture_properties(&[], &[]),
            Err(EosError::EmptyMixture)
        ));
        let comps = [comp(Species::N2), comp(Species::O2)];
        assert!(matches!(
            mixture_properties(&comps, &[1.5, -0.5]),
            Err(EosError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn percentages_out_of_range_rejected() {
        let err = Mixture::from_percentages(vec![
            (comp(Species::N2), 120.0),
            (comp(Species::O2), -20.0),
        ])
        .unwrap_err();
        assert!(matches!(err, EosError::PercentOutOfRange { .. }));
    }

    #[test]
    fn percentages_build_mixture() {
        let mixture = Mixture::from_percentages(vec![
            (comp(Species::O2), 0.0008),
            (comp(Species::N2), 99.9992),
        ])
        .unwrap();
        assert_eq!(mixture.len(), 2);
        assert!((mixture.mole_fraction("nitrogen") - 0.999992).abs() < 1e-12);
    }

    #[test]
    fn molar_mass_of_air_like_blend() {
        let mixture = Mixture::new(vec![(comp(Species::N2), 0.79), (comp(Species::O2), 0.21)])
            .unwrap();
        let expected = 0.79 * Species::N2.molar_mass() + 0.21 * Species::O2.molar_mass();
        assert!((mixture.molar_mass() - expected).abs() < 1e-9);
    }

    #[test]
    fn from_parts_checks_lengths() {
        let err = Mixture::from_parts(vec![comp(Species::N2)], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, EosError::LengthMismatch { .. }));
    }
}
