//! gm-blend: cylinder blending calculations built on gm-eos.
//!
//! - Component weights for a target mixture, pressure and temperature
//! - Filling records: weighed-in grams back to mol % and ppm
//! - Lumped thermal model of a cylinder fill

pub mod cylinder;
pub mod error;
pub mod fill;
pub mod record;

pub use cylinder::{BlendReport, ComponentWeight, CylinderSettings, ZSource, blend_weights};
pub use error::{BlendError, BlendResult};
pub use fill::{FillSample, FillSimulation, FillTrajectory, MAX_STEPS};
pub use record::{FillingRecord, RecordedComponent, filling_record};
