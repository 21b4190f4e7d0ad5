//! Error types for the chord recognition engine
//!
//! Analysis-quality problems (silence, ambiguous frames, nothing surviving the
//! duration filter) are never errors: they end in a fallback progression. Only
//! inputs and configurations that are invalid outright are rejected here.

use std::fmt;

/// Errors that can occur before or around chord recognition
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input (wrong chroma dimensionality, negative duration, malformed request, ...)
    InvalidInput(String),

    /// Invalid configuration parameters
    InvalidConfig(String),

    /// Numerical error (non-finite template weights, etc.)
    NumericalError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::InvalidInput(format!("malformed request: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            AnalysisError::InvalidInput("x".to_string()).to_string(),
            "Invalid input: x"
        );
        assert_eq!(
            AnalysisError::InvalidConfig("stride".to_string()).to_string(),
            "Invalid configuration: stride"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: AnalysisError = err.into();
        assert!(matches!(converted, AnalysisError::InvalidInput(_)));
    }
}
