use thiserror::Error;

use crate::domain::parameters::SamplerType;

/// A parameter value that cannot take part in a fingerprint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unhashable problem parameter value at position {position}: {kind}")]
pub struct UnhashableParameterError {
    pub position: usize,
    pub kind: &'static str,
}

/// Failure raised by a sampler backend while generating a solution.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{sampler} solver failed: {details}")]
pub struct SolverExecutionError {
    pub sampler: SamplerType,
    pub details: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
pub struct InvalidConfigurationError {
    pub details: String,
}

/// Why a run request was ignored. Never shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTrigger {
    #[error("triggered by '{0}' rather than the run button")]
    NotRunAction(String),
    #[error("run button has not been clicked")]
    NoClicks,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfigurationError),

    #[error(transparent)]
    Unhashable(#[from] UnhashableParameterError),

    #[error(transparent)]
    Solver(#[from] SolverExecutionError),

    #[error("run cancelled")]
    Cancelled,
}
