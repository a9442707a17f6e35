//! Error types for the synthesis backend.

use siggen_spec::{BackendError, SpecError, ValidationError};
use thiserror::Error;

use crate::filter::FilterDesignError;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur during synthesis.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The requested signal type has no generator.
    #[error("signal type '{0}' not supported")]
    UnsupportedSignalType(String),

    /// The config failed validation.
    #[error("config validation failed: {}", format_errors(.0))]
    ValidationFailed(Vec<ValidationError>),

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The prime search for a coherent frequency gave up.
    #[error(
        "coherent frequency search exhausted: no prime >= {window} cycles below ceiling {ceiling}"
    )]
    CoherentSearchExhausted {
        /// Cycle count the search started from.
        window: u64,
        /// Last search ceiling tried.
        ceiling: u64,
    },

    /// FIR filter design failed.
    #[error("filter design failed: {0}")]
    FilterDesign(#[from] FilterDesignError),

    /// Config parsing error.
    #[error(transparent)]
    Spec(SpecError),

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<SpecError> for SynthError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::UnsupportedSignalType(name) => SynthError::UnsupportedSignalType(name),
            other => SynthError::Spec(other),
        }
    }
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }
}

impl BackendError for SynthError {
    fn code(&self) -> &'static str {
        match self {
            SynthError::UnsupportedSignalType(_) => "SYNTH_001",
            SynthError::ValidationFailed(_) => "SYNTH_002",
            SynthError::InvalidParameter { .. } => "SYNTH_003",
            SynthError::CoherentSearchExhausted { .. } => "SYNTH_004",
            SynthError::FilterDesign(_) => "SYNTH_005",
            SynthError::Spec(_) => "SYNTH_006",
            SynthError::Synthesis { .. } => "SYNTH_007",
        }
    }

    fn category(&self) -> &'static str {
        "synthesis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siggen_spec::ErrorCode;

    #[test]
    fn test_invalid_param_helper() {
        let err = SynthError::invalid_param("fs", "must be positive");
        assert!(err.to_string().contains("fs"));
        assert!(err.to_string().contains("must be positive"));
        assert_eq!(err.code(), "SYNTH_003");
    }

    #[test]
    fn test_unsupported_type_from_spec_error() {
        let err: SynthError = SpecError::UnsupportedSignalType("square".to_string()).into();
        assert!(matches!(err, SynthError::UnsupportedSignalType(_)));
        assert_eq!(err.code(), "SYNTH_001");
        assert_eq!(err.category(), "synthesis");
    }

    #[test]
    fn test_invalid_config_lists_errors() {
        let err = SynthError::ValidationFailed(vec![
            ValidationError::with_path(ErrorCode::InvalidSampleRate, "fs must be positive", "fs"),
            ValidationError::new(ErrorCode::InvalidSampleCount, "no samples"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("E001"));
        assert!(msg.contains("E002"));
    }

    #[test]
    fn test_coherent_exhausted_message() {
        let err = SynthError::CoherentSearchExhausted {
            window: 100,
            ceiling: 64,
        };
        assert!(err.to_string().contains(">= 100"));
    }
}
