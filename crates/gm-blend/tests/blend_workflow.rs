//! Blend a mixture, then read the weighed-in record back.

use gm_blend::{CylinderSettings, ZSource, blend_weights, filling_record};
use gm_eos::{Component, ComponentRegistry, EosModel, Mixture, PropertySource};
use proptest::prelude::*;

fn registry_mixture(parts: &[(&str, f64)]) -> Mixture {
    let registry = ComponentRegistry::with_builtins();
    let items = parts
        .iter()
        .map(|&(name, pct)| (registry.component(name).unwrap(), pct))
        .collect();
    Mixture::from_percentages(items).unwrap()
}

#[test]
fn record_of_blend_recovers_composition() {
    let mixture = registry_mixture(&[("SO2", 0.03), ("CO", 0.03), ("CO2", 16.0), ("N2", 83.94)]);
    let report = blend_weights(
        &mixture,
        &CylinderSettings::default(),
        ZSource::Model(EosModel::PengRobinson),
    )
    .unwrap();

    let weights: Vec<(Component, f64)> = mixture
        .components()
        .cloned()
        .zip(report.components.iter().map(|c| c.weight_g))
        .collect();
    let record = filling_record(&weights).unwrap();

    for ((_, x), recorded) in mixture.iter().zip(&record.components) {
        assert!((recorded.mol_percent - 100.0 * x).abs() < 1e-9);
    }
    assert!((record.total_moles - report.total_moles).abs() < 1e-9);
}

#[test]
fn every_model_gives_a_plausible_fill() {
    let mixture = registry_mixture(&[("methane", 5.0), ("nitrogen", 95.0)]);
    let settings = CylinderSettings::default();
    let ideal = blend_weights(&mixture, &settings, ZSource::Fixed(1.0)).unwrap();

    for model in EosModel::ALL {
        let report = blend_weights(&mixture, &settings, ZSource::Model(model)).unwrap();
        let ratio = report.total_weight_g / ideal.total_weight_g;
        assert!((0.9..1.1).contains(&ratio), "{model}: {ratio}");
    }
}

proptest! {
    #[test]
    fn weights_scale_with_pressure(p in 1.0f64..200.0, z in 0.8f64..1.2) {
        let mixture = registry_mixture(&[("argon", 50.0), ("oxygen", 50.0)]);
        let base = CylinderSettings { pressure_bar: p, ..CylinderSettings::default() };
        let doubled = CylinderSettings { pressure_bar: 2.0 * p, ..base };
        let a = blend_weights(&mixture, &base, ZSource::Fixed(z)).unwrap();
        let b = blend_weights(&mixture, &doubled, ZSource::Fixed(z)).unwrap();
        prop_assert!((b.total_weight_g / a.total_weight_g - 2.0).abs() < 1e-9);
    }
}
