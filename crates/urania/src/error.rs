use thiserror::Error;

/// Errors produced while computing a chart.
///
/// Computation is atomic: any of these aborts the whole chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed request field; the caller can correct it.
    #[error("invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
    /// Input is well formed but the geometry is undefined for it.
    #[error("chart undefined for this input: {message}")]
    Domain { message: String },
    /// Arithmetic or backend failure that validated input should never reach.
    #[error("internal computation failure: {message}")]
    Internal { message: String },
}

impl EngineError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Fails with [`EngineError::Internal`] when `value` is NaN or infinite.
pub(crate) fn ensure_finite(what: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        let err = EngineError::internal(format!("{what} is not finite ({value})"));
        log::error!("{err}");
        Err(err)
    }
}
