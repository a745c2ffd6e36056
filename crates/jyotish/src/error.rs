use thiserror::Error;

/// Errors that can occur while building a chart.
///
/// Every variant is deterministic: retrying the same request yields the
/// same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },
    #[error("Ephemeris unavailable: {message}")]
    EphemerisUnavailable { message: String },
    #[error("Numeric degeneracy: {message}")]
    NumericDegeneracy { message: String },
}

impl ChartError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        ChartError::NumericDegeneracy {
            message: message.into(),
        }
    }

    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        ChartError::EphemerisUnavailable {
            message: message.into(),
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
