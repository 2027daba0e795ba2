//! Error types for tsagg operations

use thiserror::Error;

/// Result type for tsagg operations
pub type TsaggResult<T> = Result<T, TsaggError>;

/// Error types raised while configuring or driving aggregation functions.
///
/// An empty input series is not an error: functions record `NaN` for it.
#[derive(Error, Debug)]
pub enum TsaggError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TsaggError {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a new function-not-found error
    pub fn function_not_found<S: Into<String>>(name: S) -> Self {
        Self::FunctionNotFound(name.into())
    }

    /// Create a new precondition error
    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::Precondition(message.into())
    }

    /// Whether the error was raised while setting a function up, before execution
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            TsaggError::Configuration(_) | TsaggError::FunctionNotFound(_)
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TsaggError::Configuration(_) => "configuration",
            TsaggError::FunctionNotFound(_) => "function_not_found",
            TsaggError::Precondition(_) => "precondition",
            TsaggError::Json(_) => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            TsaggError::configuration("bad arg").category(),
            "configuration"
        );
        assert_eq!(
            TsaggError::function_not_found("p99").category(),
            "function_not_found"
        );
        assert_eq!(TsaggError::precondition("idx").category(), "precondition");
    }

    #[test]
    fn test_setup_errors() {
        assert!(TsaggError::configuration("x").is_setup_error());
        assert!(TsaggError::function_not_found("x").is_setup_error());
        assert!(!TsaggError::precondition("x").is_setup_error());
    }

    #[test]
    fn test_error_display() {
        let err = TsaggError::function_not_found("median");
        assert_eq!(err.to_string(), "Function not found: median");
    }
}
