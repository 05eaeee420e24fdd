use assay_engine::{CalculationError, PlateMapError};
use thiserror::Error;

/// Anything that stops a request from producing a result. The display
/// text is meant for the scientist filling in the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    PlateMap(#[from] PlateMapError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

impl ProtocolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
