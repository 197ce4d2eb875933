use gm_blend::BlendError;
use gm_eos::{EosError, UnitError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Eos(#[from] EosError),

    #[error("{0}")]
    Blend(#[from] BlendError),

    #[error("{0}")]
    Unit(#[from] UnitError),

    #[error("Invalid argument: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML output error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type CliResult<T> = Result<T, CliError>;
