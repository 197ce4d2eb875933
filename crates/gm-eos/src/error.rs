//! Equation-of-state errors.

use crate::eos::EosModel;
use gm_core::CoreError;
use thiserror::Error;

/// Result type for EOS and mixture operations.
pub type EosResult<T> = Result<T, EosError>;

/// Coarse classification used by callers to tell bad input apart from
/// a computation that could not produce a physical answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call was rejected before any computation.
    InputValidation,
    /// The inputs were accepted but the numerics failed for this point.
    NumericFailure,
}

/// Errors that can occur during EOS, mixing-rule and substance lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Component and mole-fraction lists disagree in length.
    #[error("Number of components ({components}) must match number of mole fractions ({fractions})")]
    LengthMismatch { components: usize, fractions: usize },

    /// Mixture with no components.
    #[error("Mixture must contain at least one component")]
    EmptyMixture,

    /// A single mole fraction is negative or non-finite.
    #[error("Invalid mole fraction {value} for {component}")]
    InvalidFraction { component: String, value: f64 },

    /// Mole fractions do not sum to one.
    #[error("Mole fractions must sum to 1 (got {sum}, tolerance {tolerance})")]
    FractionSum { sum: f64, tolerance: f64 },

    /// Percentage outside [0, 100].
    #[error("Percentage {value} for {component} is out of range [0, 100]")]
    PercentOutOfRange { component: String, value: f64 },

    /// Component not known to the property source.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// Component name already registered.
    #[error("Component already exists: {name}")]
    DuplicateComponent { name: String },

    /// Chemical formula could not be parsed.
    #[error("Invalid formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },

    /// Cubic EOS produced no real root for this state point.
    #[error("{model} cubic has no real root at P={p_bar} bar, T={t_k} K")]
    NoRealRoot { model: EosModel, p_bar: f64, t_k: f64 },

    /// Non-physical intermediate or result (negative, complex, non-finite).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: String },

    /// Iterative method did not converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: String },
}

impl EosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoRealRoot { .. } | Self::NonPhysical { .. } | Self::ConvergenceFailed { .. } => {
                ErrorKind::NumericFailure
            }
            _ => ErrorKind::InputValidation,
        }
    }

    pub fn is_input_validation(&self) -> bool {
        self.kind() == ErrorKind::InputValidation
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArg { what: what.into() }
    }

    pub(crate) fn non_physical(what: impl Into<String>) -> Self {
        Self::NonPhysical { what: what.into() }
    }
}

impl From<CoreError> for EosError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => EosError::InvalidArg {
                what: format!("{what} is not finite ({value})"),
            },
            CoreError::InvalidArg { what } => EosError::InvalidArg { what },
            CoreError::Numeric { what } => EosError::NonPhysical { what },
        }
    }
}

impl From<EosError> for CoreError {
    fn from(err: EosError) -> Self {
        match err.kind() {
            ErrorKind::InputValidation => CoreError::InvalidArg {
                what: err.to_string(),
            },
            ErrorKind::NumericFailure => CoreError::Numeric {
                what: err.to_string(),
            },
        }
    }
}
