//! Simulation error types.

use thiserror::Error;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that stop a simulation run or its report.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration value outside the range the model can run with.
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Percentiles requested for a run where nobody finished service.
    #[error("no completed events for {label}")]
    NoCompletedEvents { label: String },

    /// Report could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> SimError {
        SimError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
