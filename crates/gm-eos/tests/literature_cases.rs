//! End-to-end checks of Z against hand-verified and literature values.

use gm_eos::{
    ComponentRegistry, CriticalProperties, EosModel, ErrorKind, Mixture, PropertySource, Species,
    StatePoint, evaluate_all, mixture_properties, psat_peng_robinson, z_virial,
};

fn pure_props(species: Species) -> CriticalProperties {
    Mixture::pure(species.into()).critical_properties()
}

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn nitrogen_at_ten_bar() {
    let state = StatePoint::new(10.0, 293.15).unwrap();
    let results = evaluate_all(&state, &pure_props(Species::N2));
    let expected = [
        (EosModel::Virial2, 0.9973),
        (EosModel::Virial3, 0.9976),
        (EosModel::PengRobinson, 0.9953),
        (EosModel::RedlichKwong, 0.9960),
        (EosModel::SoaveRedlichKwong, 0.9992),
        (EosModel::VanDerWaals, 0.9930),
    ];
    for (row, (model, z)) in results.iter().zip(expected) {
        assert_eq!(row.model, model);
        assert_close(row.z.clone().unwrap(), z, 1e-3, model.label());
    }
}

#[test]
fn methane_at_ten_bar() {
    let state = StatePoint::new(10.0, 293.15).unwrap();
    let props = pure_props(Species::CH4);
    let pr = EosModel::PengRobinson.evaluate(&state, &props).unwrap();
    let v2 = EosModel::Virial2.evaluate(&state, &props).unwrap();
    assert_close(pr, 0.977, 2e-3, "PR");
    assert_close(v2, 0.982, 2e-3, "virial");
}

#[test]
fn argon_all_models_near_ideal() {
    let state = StatePoint::new(10.0, 293.15).unwrap();
    for row in evaluate_all(&state, &pure_props(Species::Ar)) {
        let z = row.z.unwrap();
        assert!((0.990..=0.994).contains(&z), "{}: {z}", row.model);
    }
}

#[test]
fn ideal_limit_at_low_pressure() {
    let state = StatePoint::new(0.01, 400.0).unwrap();
    for species in [Species::N2, Species::CO2, Species::He, Species::Propane] {
        for row in evaluate_all(&state, &pure_props(species)) {
            assert_close(row.z.unwrap(), 1.0, 1e-3, species.key());
        }
    }
}

#[test]
fn pure_mixture_matches_pure_component() {
    let n2 = Species::N2;
    let props = mixture_properties(&[n2.into()], &[1.0]).unwrap();
    let direct = z_virial(50.0, 300.0, n2.tc_k(), n2.pc_bar(), n2.omega());
    let state = StatePoint::new(50.0, 300.0).unwrap();
    let via_mixture = EosModel::Virial2.evaluate(&state, &props).unwrap();
    assert_eq!(direct.to_bits(), via_mixture.to_bits());
}

#[test]
fn binary_mixture_pressure_rule() {
    let (a, b) = (Species::N2, Species::CO2);
    let props = mixture_properties(&[a.into(), b.into()], &[0.5, 0.5]).unwrap();
    let expected = (0.5 * a.pc_bar().sqrt() + 0.5 * b.pc_bar().sqrt()).powi(2);
    assert_close(props.pc_bar, expected, 1e-9, "Pc_mix");
    assert_close(props.tc_k, 0.5 * (a.tc_k() + b.tc_k()), 1e-9, "Tc_mix");
}

#[test]
fn invalid_mixtures_are_input_errors() {
    let comps = [Species::N2.into(), Species::O2.into()];
    let sum_err = mixture_properties(&comps, &[0.5, 0.6]).unwrap_err();
    assert_eq!(sum_err.kind(), ErrorKind::InputValidation);

    let len_err = mixture_properties(&comps, &[1.0]).unwrap_err();
    assert_eq!(len_err.kind(), ErrorKind::InputValidation);

    let empty_err = mixture_properties(&[], &[]).unwrap_err();
    assert_eq!(empty_err.kind(), ErrorKind::InputValidation);
}

#[test]
fn registry_supplies_mixture_components() {
    let registry = ComponentRegistry::with_builtins();
    let comps = registry.components(&["methane", "ethane"]).unwrap();
    let mixture = Mixture::from_parts(comps, &[0.9, 0.1]).unwrap();
    let state = StatePoint::new(30.0, 290.0).unwrap();
    let z = EosModel::PengRobinson
        .evaluate(&state, &mixture.critical_properties())
        .unwrap();
    assert!(z > 0.85 && z < 0.97, "Z = {z}");

    assert!(registry.component("unobtainium").is_err());
}

#[test]
fn virial_and_cubic_diverge_near_critical() {
    // Methane at 195 K, 40 bar sits close to its critical point.
    let state = StatePoint::new(40.0, 195.0).unwrap();
    let props = pure_props(Species::CH4);
    let virial = EosModel::Virial2.evaluate(&state, &props).unwrap();
    let pr = EosModel::PengRobinson.evaluate(&state, &props).unwrap();
    assert!(virial - pr > 0.05, "virial {virial}, PR {pr}");
}

#[test]
fn propane_vapor_pressure_near_nist() {
    let c3 = Species::Propane;
    let p = psat_peng_robinson(300.0, c3.tc_k(), c3.pc_bar(), c3.omega()).unwrap();
    assert_close(p, 9.98, 0.2, "Psat");
}
