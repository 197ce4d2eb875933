//! gm-eos: compressibility factors of gases and gas mixtures.
//!
//! Provides:
//! - Built-in substance data and an explicit component registry
//! - Mixture pseudo-critical properties (mixing rule)
//! - Virial and cubic equations of state (PR, RK, SRK, vdW)
//! - Vapor pressure correlations and a Peng-Robinson saturation solver
//! - Parallel pressure × temperature grids
//!
//! # Example
//!
//! ```
//! use gm_eos::{EosModel, Mixture, Species, StatePoint};
//!
//! let mixture = Mixture::pure(Species::N2.into());
//! let props = mixture.critical_properties();
//! let state = StatePoint::new(10.0, 293.15).unwrap();
//! let z = EosModel::PengRobinson.evaluate(&state, &props).unwrap();
//! assert!((z - 0.995).abs() < 0.01);
//! ```

pub mod catalog;
pub mod component;
pub mod cubic;
pub mod eos;
pub mod error;
pub mod formula;
pub mod grid;
pub mod mixture;
pub mod registry;
pub mod saturation;
pub mod species;
pub mod state;
pub mod sweeps;
pub mod units;

// Re-exports for ergonomics
pub use catalog::{CatalogEntry, builtin_catalog, filter_catalog};
pub use component::{Component, CriticalProperties};
pub use eos::{
    EosModel, ModelZ, VirialValidity, evaluate_all, virial_validity, z_peng_robinson,
    z_redlich_kwong, z_soave_rk, z_van_der_waals, z_van_der_waals_ab, z_virial, z_virial3,
};
pub use error::{EosError, EosResult, ErrorKind};
pub use formula::molar_mass;
pub use grid::{GridResult, GridRow, evaluate_grid};
pub use mixture::{MOLE_FRACTION_TOLERANCE, Mixture, mixture_properties};
pub use registry::{BuiltinProperties, ComponentRegistry, PropertySource};
pub use saturation::{
    SaturationMethod, SaturationPoint, psat_ambrose_walton, psat_lee_kesler, psat_peng_robinson,
    saturation_curve,
};
pub use species::Species;
pub use state::StatePoint;
pub use sweeps::{SweepDefinition, SweepType};
pub use units::{Quantity, UnitError, UnitValue, parse_quantity};
