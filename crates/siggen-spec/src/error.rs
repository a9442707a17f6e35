//! Error types for config validation and processing.

use thiserror::Error;

/// Error codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Sample rate is not a positive finite number
    InvalidSampleRate,
    /// E002: Sample count is zero
    InvalidSampleCount,
    /// E003: Oversampling ratio is zero
    InvalidOversampling,
    /// E004: Signal frequency is not a positive finite number
    InvalidFrequency,
    /// E005: Amplitude, common-mode or level is not finite
    InvalidLevel,
    /// E006: Duty cycle outside [0, 1]
    InvalidDutyCycle,
    /// E007: Rise or fall time is negative or not finite
    InvalidEdgeTime,
    /// E008: Rise/fall time does not fit inside the pulse high/low time
    EdgeExceedsPulseWidth,
    /// E009: Jitter standard deviation is negative or not finite
    InvalidJitter,
    /// E010: SNR is not finite
    InvalidSnr,
    /// E011: Phase, delay or time offset is not finite
    InvalidTiming,
    /// E012: Frequency, amplitude or common-mode list is empty
    EmptyToneList,
    /// E013: Output would exceed the row limit
    TooManySamples,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSampleRate => "E001",
            ErrorCode::InvalidSampleCount => "E002",
            ErrorCode::InvalidOversampling => "E003",
            ErrorCode::InvalidFrequency => "E004",
            ErrorCode::InvalidLevel => "E005",
            ErrorCode::InvalidDutyCycle => "E006",
            ErrorCode::InvalidEdgeTime => "E007",
            ErrorCode::EdgeExceedsPulseWidth => "E008",
            ErrorCode::InvalidJitter => "E009",
            ErrorCode::InvalidSnr => "E010",
            ErrorCode::InvalidTiming => "E011",
            ErrorCode::EmptyToneList => "E012",
            ErrorCode::TooManySamples => "E013",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Amplitude/common-mode list length differs from frequency list
    ToneLengthMismatch,
    /// W002: Oversampling is not supported for sampled sine and is forced to 1
    OversamplingIgnored,
    /// W003: Negative SNR disables noise injection
    NegativeSnrIgnored,
    /// W004: Only the first tone is used by this signal type
    ExtraTonesIgnored,
    /// W005: Rise time is not shorter than the sample period
    RiseTimeExceedsSamplePeriod,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ToneLengthMismatch => "W001",
            WarningCode::OversamplingIgnored => "W002",
            WarningCode::NegativeSnrIgnored => "W003",
            WarningCode::ExtraTonesIgnored => "W004",
            WarningCode::RiseTimeExceedsSamplePeriod => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "sig_freq\[1\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for config operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Config validation failed with one or more errors.
    #[error("config validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// The requested signal type is not one of the supported generators.
    #[error("signal type '{0}' not supported")]
    UnsupportedSignalType(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of config validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Returns true if an error with the given code was recorded.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Gives every backend error a stable code and a category so that callers
/// can report failures uniformly without matching on backend-specific enums.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting (e.g. "SYNTH_001").
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
