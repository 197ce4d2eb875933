//! Error types for blend calculations.

use gm_eos::EosError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlendError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Recorded weights give no gas (total {total_moles} mol)")]
    EmptyRecord { total_moles: f64 },

    #[error("Equation of state: {0}")]
    Eos(#[from] EosError),
}

pub type BlendResult<T> = Result<T, BlendError>;

impl BlendError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArg { what: what.into() }
    }

    /// True when the caller supplied bad input, as opposed to a numeric failure.
    pub fn is_input_validation(&self) -> bool {
        match self {
            Self::InvalidArg { .. } | Self::EmptyRecord { .. } => true,
            Self::Eos(e) => e.is_input_validation(),
        }
    }
}

impl From<gm_core::CoreError> for BlendError {
    fn from(e: gm_core::CoreError) -> Self {
        Self::InvalidArg {
            what: e.to_string(),
        }
    }
}
