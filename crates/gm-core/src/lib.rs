//! gm-core: stable foundation for gasmix.
//!
//! Contains:
//! - units (uom SI types + constructors, gas constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
