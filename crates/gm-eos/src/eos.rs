//! Compressibility factor evaluators.
//!
//! All functions take pressure in bar and temperature in K with critical
//! constants in the same units. They are pure: identical inputs give
//! bit-identical output.
//!
//! The virial forms are closed-form and unchecked. The cubic forms build
//! their dimensionless A and B directly from reduced properties (the gas
//! constant cancels) and return the largest real root of the cubic in Z.

use crate::component::CriticalProperties;
use crate::cubic::{cubic_roots, largest_real_root};
use crate::error::{EosError, EosResult};
use crate::state::StatePoint;
use gm_core::units::constants::R_L_BAR;
use serde::Serialize;
use std::fmt;

/// Pitzer second-virial coefficient B·Pc/(R·Tc).
fn pitzer_b(tr: f64, omega: f64) -> f64 {
    let b0 = 0.083 - 0.422 / tr.powf(1.6);
    let b1 = 0.139 - 0.172 / tr.powf(4.2);
    b0 + omega * b1
}

/// Third-virial coefficient correlation (Orbey-Vera form).
fn third_virial_c(tr: f64, omega: f64) -> f64 {
    let c0 = 0.01407 + 0.02432 / tr - 0.00313 / tr.powf(10.5);
    let c1 = -0.02676 + 0.05539 / tr.powf(2.7) - 0.00242 / tr.powf(10.5);
    c0 + omega * c1
}

/// Z from the truncated second-virial (Pitzer) correlation.
///
/// Z = 1 + B·Pr/Tr. Meant for low to moderate pressure; see
/// [`virial_validity`].
pub fn z_virial(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> f64 {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    1.0 + pitzer_b(tr, omega) * (pr / tr)
}

/// Z with second and third virial terms: 1 + B·(Pr/Tr) + C·(Pr/Tr)².
pub fn z_virial3(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> f64 {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    let x = pr / tr;
    1.0 + pitzer_b(tr, omega) * x + third_virial_c(tr, omega) * x * x
}

/// Peng-Robinson m(ω), with the heavy-component branch above ω = 0.49.
fn peng_robinson_m(omega: f64) -> f64 {
    if omega <= 0.49 {
        0.37464 + 1.54226 * omega - 0.26992 * omega * omega
    } else {
        0.379642 + 1.48503 * omega - 0.164423 * omega.powi(2) + 0.016666 * omega.powi(3)
    }
}

/// Soave α(Tr) = (1 + m(1 - √Tr))².
fn soave_alpha(m: f64, tr: f64) -> f64 {
    (1.0 + m * (1.0 - tr.sqrt())).powi(2)
}

/// Peng-Robinson dimensionless A and B at a state point.
pub(crate) fn peng_robinson_ab(
    p_bar: f64,
    t_k: f64,
    tc_k: f64,
    pc_bar: f64,
    omega: f64,
) -> (f64, f64) {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    let alpha = soave_alpha(peng_robinson_m(omega), tr);
    (0.45724 * alpha * pr / (tr * tr), 0.07780 * pr / tr)
}

/// Coefficients of the Peng-Robinson cubic in Z (monic).
pub(crate) fn peng_robinson_cubic(a: f64, b: f64) -> [f64; 4] {
    [
        1.0,
        -(1.0 - b),
        a - 3.0 * b * b - 2.0 * b,
        -(a * b - b * b - b * b * b),
    ]
}

fn vapor_root(model: EosModel, p_bar: f64, t_k: f64, coeffs: [f64; 4]) -> EosResult<f64> {
    let [a3, a2, a1, a0] = coeffs;
    let roots = cubic_roots(a3, a2, a1, a0)?;
    let z = largest_real_root(&roots).ok_or(EosError::NoRealRoot { model, p_bar, t_k })?;
    if z <= 0.0 {
        return Err(EosError::non_physical(format!(
            "{model} compressibility factor {z} at P={p_bar} bar, T={t_k} K"
        )));
    }
    Ok(z)
}

/// Z from the Peng-Robinson equation of state (largest real root).
pub fn z_peng_robinson(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    let (a, b) = peng_robinson_ab(p_bar, t_k, tc_k, pc_bar, omega);
    vapor_root(EosModel::PengRobinson, p_bar, t_k, peng_robinson_cubic(a, b))
}

/// Redlich-Kwong / SRK cubic: Z³ − Z² + (A − B − B²)Z − AB = 0.
fn rk_cubic(a: f64, b: f64) -> [f64; 4] {
    [1.0, -1.0, a - b - b * b, -a * b]
}

/// Z from the two-parameter Redlich-Kwong equation of state.
pub fn z_redlich_kwong(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64) -> EosResult<f64> {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    let a = 0.42748 * pr / tr.powf(2.5);
    let b = 0.08664 * pr / tr;
    vapor_root(EosModel::RedlichKwong, p_bar, t_k, rk_cubic(a, b))
}

/// Z from the Soave-Redlich-Kwong equation of state.
pub fn z_soave_rk(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    let m = 0.480 + 1.574 * omega - 0.176 * omega * omega;
    let a = 0.42748 * soave_alpha(m, tr) * pr / (tr * tr);
    let b = 0.08664 * pr / tr;
    vapor_root(EosModel::SoaveRedlichKwong, p_bar, t_k, rk_cubic(a, b))
}

fn vdw_cubic(a: f64, b: f64) -> [f64; 4] {
    [1.0, -(1.0 + b), a, -a * b]
}

/// Z from van der Waals with a, b derived from critical constants.
pub fn z_van_der_waals(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64) -> EosResult<f64> {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    let a = 27.0 / 64.0 * pr / (tr * tr);
    let b = pr / (8.0 * tr);
    vapor_root(EosModel::VanDerWaals, p_bar, t_k, vdw_cubic(a, b))
}

/// Z from van der Waals with tabulated constants.
///
/// `a` in L²·bar/mol², `b` in L/mol.
pub fn z_van_der_waals_ab(p_bar: f64, t_k: f64, a: f64, b: f64) -> EosResult<f64> {
    let rt = R_L_BAR * t_k;
    let big_a = a * p_bar / (rt * rt);
    let big_b = b * p_bar / rt;
    vapor_root(EosModel::VanDerWaals, p_bar, t_k, vdw_cubic(big_a, big_b))
}

/// Where a state point sits relative to the virial correlation's domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum VirialValidity {
    /// Inside the usual domain of the truncated virial series.
    Valid,
    /// Reduced pressure at or above [`VIRIAL_MAX_PR`].
    PressureTooHigh { pr: f64 },
    /// Reduced temperature at or below [`VIRIAL_MIN_TR`].
    TemperatureTooLow { tr: f64 },
}

impl VirialValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Upper reduced pressure for the virial correlations.
pub const VIRIAL_MAX_PR: f64 = 0.8;
/// Lower reduced temperature for the virial correlations.
pub const VIRIAL_MIN_TR: f64 = 1.0;

/// Classify a state point against the virial correlation's domain.
///
/// The truncated series is not meant for the critical region: B0 grows
/// without bound as Tr falls, so Tr ≤ 1 and Pr ≥ 0.8 are both out of domain.
pub fn virial_validity(p_bar: f64, t_k: f64, tc_k: f64, pc_bar: f64) -> VirialValidity {
    let tr = t_k / tc_k;
    let pr = p_bar / pc_bar;
    if pr >= VIRIAL_MAX_PR {
        VirialValidity::PressureTooHigh { pr }
    } else if tr <= VIRIAL_MIN_TR {
        VirialValidity::TemperatureTooLow { tr }
    } else {
        VirialValidity::Valid
    }
}

/// Equation-of-state selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EosModel {
    /// Second-virial Pitzer correlation
    Virial2,
    /// Second + third virial correlation
    Virial3,
    PengRobinson,
    RedlichKwong,
    SoaveRedlichKwong,
    VanDerWaals,
}

impl EosModel {
    pub const ALL: [EosModel; 6] = [
        EosModel::Virial2,
        EosModel::Virial3,
        EosModel::PengRobinson,
        EosModel::RedlichKwong,
        EosModel::SoaveRedlichKwong,
        EosModel::VanDerWaals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Virial2 => "2nd Virial",
            Self::Virial3 => "3rd Virial",
            Self::PengRobinson => "Peng-Robinson",
            Self::RedlichKwong => "Redlich-Kwong",
            Self::SoaveRedlichKwong => "Soave-Redlich-Kwong",
            Self::VanDerWaals => "van der Waals",
        }
    }

    /// Short machine-friendly key (CSV headers, CLI).
    pub fn key(self) -> &'static str {
        match self {
            Self::Virial2 => "virial2",
            Self::Virial3 => "virial3",
            Self::PengRobinson => "pr",
            Self::RedlichKwong => "rk",
            Self::SoaveRedlichKwong => "srk",
            Self::VanDerWaals => "vdw",
        }
    }

    pub fn is_virial(self) -> bool {
        matches!(self, Self::Virial2 | Self::Virial3)
    }

    /// Evaluate Z at a state point for the given critical constants.
    pub fn evaluate(self, state: &StatePoint, props: &CriticalProperties) -> EosResult<f64> {
        let (p, t) = (state.pressure_bar(), state.temperature_k());
        let (tc, pc, omega) = (props.tc_k, props.pc_bar, props.omega);

        if self.is_virial() {
            let validity = virial_validity(p, t, tc, pc);
            if !validity.is_valid() {
                tracing::warn!(model = self.key(), p_bar = p, t_k = t, ?validity,
                    "virial correlation evaluated outside its domain");
            }
        }

        let z = match self {
            Self::Virial2 => z_virial(p, t, tc, pc, omega),
            Self::Virial3 => z_virial3(p, t, tc, pc, omega),
            Self::PengRobinson => z_peng_robinson(p, t, tc, pc, omega)?,
            Self::RedlichKwong => z_redlich_kwong(p, t, tc, pc)?,
            Self::SoaveRedlichKwong => z_soave_rk(p, t, tc, pc, omega)?,
            Self::VanDerWaals => z_van_der_waals(p, t, tc, pc)?,
        };
        if !z.is_finite() || z <= 0.0 {
            return Err(EosError::non_physical(format!(
                "{self} compressibility factor {z} at P={p} bar, T={t} K"
            )));
        }
        Ok(z)
    }
}

impl fmt::Display for EosModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EosModel {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "virial2" | "virial" | "pitzer" | "2nd-virial" => Ok(Self::Virial2),
            "virial3" | "3rd-virial" => Ok(Self::Virial3),
            "pr" | "peng-robinson" | "pengrobinson" => Ok(Self::PengRobinson),
            "rk" | "redlich-kwong" | "redlichkwong" => Ok(Self::RedlichKwong),
            "srk" | "soave" | "soave-redlich-kwong" => Ok(Self::SoaveRedlichKwong),
            "vdw" | "van-der-waals" | "vanderwaals" => Ok(Self::VanDerWaals),
            other => Err(EosError::invalid(format!("unknown equation of state '{other}'"))),
        }
    }
}

/// One model's outcome at a state point.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelZ {
    pub model: EosModel,
    pub z: EosResult<f64>,
}

/// Evaluate every model at one state point; each row carries its own result.
pub fn evaluate_all(state: &StatePoint, props: &CriticalProperties) -> Vec<ModelZ> {
    EosModel::ALL
        .iter()
        .map(|&model| ModelZ {
            model,
            z: model.evaluate(state, props),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;

    fn props(species: Species) -> CriticalProperties {
        CriticalProperties::new(species.tc_k(), species.pc_bar(), species.omega()).unwrap()
    }

    #[test]
    fn near_ideal_at_reference_state() {
        let state = StatePoint::new(10.0, 293.0).unwrap();
        for species in [Species::CH4, Species::N2, Species::Ar] {
            let p = props(species);
            for row in evaluate_all(&state, &p) {
                let z = row.z.unwrap();
                assert!(
                    (0.90..=1.05).contains(&z),
                    "{species} {}: Z = {z}",
                    row.model
                );
            }
        }
    }

    #[test]
    fn virial_matches_hand_calculation() {
        // Tr = 2, Pr = 0.2, omega = 0
        let b0 = 0.083 - 0.422 / 2f64.powf(1.6);
        let expected = 1.0 + b0 * 0.1;
        let z = z_virial(20.0, 400.0, 200.0, 100.0, 0.0);
        assert!((z - expected).abs() < 1e-14);
    }

    #[test]
    fn third_virial_adds_small_correction_at_low_pressure() {
        let n2 = Species::N2;
        let z2 = z_virial(5.0, 300.0, n2.tc_k(), n2.pc_bar(), n2.omega());
        let z3 = z_virial3(5.0, 300.0, n2.tc_k(), n2.pc_bar(), n2.omega());
        assert!((z2 - z3).abs() < 1e-3);
    }

    #[test]
    fn peng_robinson_heavy_branch_is_nearly_continuous() {
        let below = peng_robinson_m(0.49);
        let above = peng_robinson_m(0.490_001);
        assert!((below - above).abs() < 1e-2);
    }

    #[test]
    fn nitrogen_high_pressure_literature_cross_check() {
        // N2 at 300 K, 150 bar: Z ≈ 1.004.
        let n2 = Species::N2;
        let z_pr = z_peng_robinson(150.0, 300.0, n2.tc_k(), n2.pc_bar(), n2.omega()).unwrap();
        let z_rk = z_redlich_kwong(150.0, 300.0, n2.tc_k(), n2.pc_bar()).unwrap();
        assert!((z_pr - 1.004).abs() / 1.004 < 0.01, "PR Z = {z_pr}");
        assert!((z_rk - 1.004).abs() / 1.004 < 0.01, "RK Z = {z_rk}");
    }

    #[test]
    fn argon_van_der_waals_with_tabulated_constants() {
        let z = z_van_der_waals_ab(150.0, 300.0, 1.355, 0.03201).unwrap();
        assert!((z - 0.9093).abs() < 1e-3, "Z = {z}");
    }

    #[test]
    fn liquid_like_state_returns_vapor_branch() {
        // Propane at 300 K, 5 bar is below its vapor pressure (~10 bar) so the
        // largest root is the vapor one.
        let c3 = Species::Propane;
        let z = z_peng_robinson(5.0, 300.0, c3.tc_k(), c3.pc_bar(), c3.omega()).unwrap();
        assert!(z > 0.85 && z < 0.95, "Z = {z}");
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let state = StatePoint::new(42.0, 311.0).unwrap();
        let p = props(Species::CO2);
        for model in EosModel::ALL {
            let a = model.evaluate(&state, &p).unwrap();
            let b = model.evaluate(&state, &p).unwrap();
            assert_eq!(a.to_bits(), b.to_bits(), "{model}");
        }
    }

    #[test]
    fn negative_temperature_is_numeric_failure() {
        let n2 = Species::N2;
        let err = z_peng_robinson(10.0, -5.0, n2.tc_k(), n2.pc_bar(), n2.omega()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NumericFailure);
    }

    #[test]
    fn negative_virial_z_is_numeric_failure() {
        // CO2 at 200 bar, 293 K is far outside the virial domain and the
        // truncated series goes negative.
        let state = StatePoint::new(200.0, 293.0).unwrap();
        let p = props(Species::CO2);
        let err = EosModel::Virial2.evaluate(&state, &p).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NumericFailure);
    }

    #[test]
    fn critical_point_is_outside_virial_domain() {
        let ch4 = Species::CH4;
        let at_critical = virial_validity(ch4.pc_bar(), ch4.tc_k(), ch4.tc_k(), ch4.pc_bar());
        assert!(!at_critical.is_valid());

        let near_critical =
            virial_validity(0.75 * ch4.pc_bar(), 1.0 * ch4.tc_k(), ch4.tc_k(), ch4.pc_bar());
        assert!(matches!(
            near_critical,
            VirialValidity::TemperatureTooLow { .. }
        ));

        let ambient = virial_validity(10.0, 293.0, ch4.tc_k(), ch4.pc_bar());
        assert!(ambient.is_valid());
    }

    #[test]
    fn model_parsing() {
        assert_eq!("PR".parse::<EosModel>().unwrap(), EosModel::PengRobinson);
        assert_eq!("pitzer".parse::<EosModel>().unwrap(), EosModel::Virial2);
        assert_eq!("srk".parse::<EosModel>().unwrap(), EosModel::SoaveRedlichKwong);
        for model in EosModel::ALL {
            assert_eq!(model.key().parse::<EosModel>().unwrap(), model);
        }
        assert!("bwr".parse::<EosModel>().is_err());
    }
}
