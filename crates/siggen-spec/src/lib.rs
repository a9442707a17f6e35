//! SigGen Configuration Library
//!
//! This crate provides the configuration record, validation, and hashing for
//! the SigGen waveform synthesizer. A config is a flat JSON document naming a
//! signal type and its parameters; every field has a default.
//!
//! # Example
//!
//! ```
//! use siggen_spec::{validate_config, SignalType, SynthesisConfig};
//!
//! let config = SynthesisConfig::from_json(r#"{
//!     "sigtype": "pulse",
//!     "sig_freq": 1e9,
//!     "nsamp": 16,
//!     "jitter_sd": 1e-13
//! }"#).unwrap();
//!
//! assert_eq!(config.sigtype, SignalType::Pulse);
//! assert!(validate_config(&config).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: Config record, signal/slope types, tone broadcasting
//! - [`error`]: Error and warning types for validation
//! - [`hash`]: Canonical config hashing
//! - [`validation`]: Config validation functions

pub mod config;
pub mod error;
pub mod hash;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::{SignalType, SlopeType, SynthesisConfig, Tone};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_config_hash, canonical_value_hash};
pub use validation::{validate_config, MAX_OUTPUT_ROWS};
