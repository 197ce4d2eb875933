//! Vapor (saturation) pressure of pure components.
//!
//! Two corresponding-states correlations give closed-form estimates; the
//! Peng-Robinson routine refines the Lee-Kesler estimate until the liquid and
//! vapor fugacities agree.

use crate::component::CriticalProperties;
use crate::cubic::{cubic_roots, real_roots_sorted};
use crate::eos::{peng_robinson_ab, peng_robinson_cubic};
use crate::error::{EosError, EosResult};
use std::f64::consts::SQRT_2;
use std::fmt;

/// Fugacity ratio convergence threshold.
pub const FUGACITY_TOLERANCE: f64 = 1e-10;
/// Iteration cap for the Peng-Robinson saturation loop.
pub const MAX_ITERATIONS: usize = 200;

fn reduced_subcritical(t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    if !(t_k.is_finite() && tc_k.is_finite() && pc_bar.is_finite() && omega.is_finite()) {
        return Err(EosError::non_physical("non-finite saturation input"));
    }
    if t_k <= 0.0 || tc_k <= 0.0 || pc_bar <= 0.0 {
        return Err(EosError::non_physical(format!(
            "saturation requires positive T, Tc and Pc (T={t_k} K, Tc={tc_k} K, Pc={pc_bar} bar)"
        )));
    }
    if t_k >= tc_k {
        return Err(EosError::non_physical(format!(
            "no saturation pressure above the critical temperature (T={t_k} K, Tc={tc_k} K)"
        )));
    }
    Ok(t_k / tc_k)
}

/// Lee-Kesler vapor pressure in bar.
pub fn psat_lee_kesler(t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    let tr = reduced_subcritical(t_k, tc_k, pc_bar, omega)?;
    let ln_tr = tr.ln();
    let tr6 = tr.powi(6);
    let f0 = 5.92714 - 6.09648 / tr - 1.28862 * ln_tr + 0.169347 * tr6;
    let f1 = 15.2518 - 15.6875 / tr - 13.4721 * ln_tr + 0.43577 * tr6;
    Ok(pc_bar * (f0 + omega * f1).exp())
}

/// Ambrose-Walton vapor pressure in bar.
pub fn psat_ambrose_walton(t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    let tr = reduced_subcritical(t_k, tc_k, pc_bar, omega)?;
    let tau = 1.0 - tr;
    let (t15, t25, t5) = (tau.powf(1.5), tau.powf(2.5), tau.powi(5));
    let f0 = (-5.97616 * tau + 1.29874 * t15 - 0.60394 * t25 - 1.06841 * t5) / tr;
    let f1 = (-5.03365 * tau + 1.11505 * t15 - 5.41217 * t25 - 7.46628 * t5) / tr;
    let f2 = (-0.64771 * tau + 2.41539 * t15 - 4.26979 * t25 + 3.25259 * t5) / tr;
    Ok(pc_bar * (f0 + omega * f1 + omega * omega * f2).exp())
}

/// ln φ for a Peng-Robinson root.
fn ln_fugacity_coefficient(z: f64, a: f64, b: f64) -> f64 {
    let log_term = ((z + (1.0 + SQRT_2) * b) / (z + (1.0 - SQRT_2) * b)).ln();
    z - 1.0 - (z - b).ln() - a / (2.0 * SQRT_2 * b) * log_term
}

/// Peng-Robinson vapor pressure in bar from equal liquid and vapor fugacity.
///
/// Fails with `ConvergenceFailed` when the cubic no longer has distinct liquid
/// and vapor roots, or when the iteration cap is reached.
pub fn psat_peng_robinson(t_k: f64, tc_k: f64, pc_bar: f64, omega: f64) -> EosResult<f64> {
    let mut p = psat_lee_kesler(t_k, tc_k, pc_bar, omega)?;

    for iteration in 1..=MAX_ITERATIONS {
        let (a, b) = peng_robinson_ab(p, t_k, tc_k, pc_bar, omega);
        let [a3, a2, a1, a0] = peng_robinson_cubic(a, b);
        let roots = cubic_roots(a3, a2, a1, a0)?;
        let physical: Vec<f64> = real_roots_sorted(&roots)
            .into_iter()
            .filter(|&z| z > b)
            .collect();

        let (z_liquid, z_vapor) = match (physical.first(), physical.last()) {
            (Some(&l), Some(&v)) if physical.len() >= 2 && v > l => (l, v),
            _ => {
                return Err(EosError::ConvergenceFailed {
                    what: format!(
                        "Peng-Robinson saturation at T={t_k} K lost its two-phase roots at P={p} bar"
                    ),
                });
            }
        };

        let ratio = (ln_fugacity_coefficient(z_liquid, a, b)
            - ln_fugacity_coefficient(z_vapor, a, b))
        .exp();
        if !ratio.is_finite() {
            return Err(EosError::non_physical("fugacity ratio"));
        }
        p *= ratio;

        if (ratio - 1.0).abs() < FUGACITY_TOLERANCE {
            tracing::debug!(t_k, p_bar = p, iteration, "saturation pressure converged");
            return Ok(p);
        }
    }

    Err(EosError::ConvergenceFailed {
        what: format!("Peng-Robinson saturation at T={t_k} K after {MAX_ITERATIONS} iterations"),
    })
}

/// Vapor pressure method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationMethod {
    LeeKesler,
    AmbroseWalton,
    PengRobinson,
}

impl SaturationMethod {
    pub const ALL: [SaturationMethod; 3] = [
        SaturationMethod::LeeKesler,
        SaturationMethod::AmbroseWalton,
        SaturationMethod::PengRobinson,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::LeeKesler => "Lee-Kesler",
            Self::AmbroseWalton => "Ambrose-Walton",
            Self::PengRobinson => "Peng-Robinson",
        }
    }

    pub fn psat(self, t_k: f64, props: &CriticalProperties) -> EosResult<f64> {
        let (tc, pc, omega) = (props.tc_k, props.pc_bar, props.omega);
        match self {
            Self::LeeKesler => psat_lee_kesler(t_k, tc, pc, omega),
            Self::AmbroseWalton => psat_ambrose_walton(t_k, tc, pc, omega),
            Self::PengRobinson => psat_peng_robinson(t_k, tc, pc, omega),
        }
    }
}

impl fmt::Display for SaturationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SaturationMethod {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lk" | "lee-kesler" => Ok(Self::LeeKesler),
            "aw" | "ambrose-walton" => Ok(Self::AmbroseWalton),
            "pr" | "peng-robinson" => Ok(Self::PengRobinson),
            other => Err(EosError::invalid(format!("unknown saturation method '{other}'"))),
        }
    }
}

/// One temperature of a saturation curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationPoint {
    pub t_k: f64,
    pub psat_bar: EosResult<f64>,
}

/// Vapor pressure at each temperature; failures stay attached to their point.
pub fn saturation_curve(
    method: SaturationMethod,
    temperatures: &[f64],
    props: &CriticalProperties,
) -> Vec<SaturationPoint> {
    temperatures
        .iter()
        .map(|&t_k| SaturationPoint {
            t_k,
            psat_bar: method.psat(t_k, props),
        })
        .collect()
}
