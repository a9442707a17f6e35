//! Config loading for CLI commands.
//!
//! Reads a JSON synthesis config from disk and records a BLAKE3 hash of the
//! raw source so reports can tie their output back to the exact file.

use siggen_spec::SynthesisConfig;
use std::path::{Path, PathBuf};

/// Recognized config extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a config file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed config.
    pub config: SynthesisConfig,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during config loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// JSON parsing failed.
    JsonParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::JsonParse { message } => {
                write!(f, "JSON parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a synthesis config from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use siggen_cli::input::load_config;
///
/// let result = load_config(Path::new("sine.json")).unwrap();
/// println!("Loaded {} config", result.config.sigtype);
/// ```
pub fn load_config(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => {}
        _ => return Err(InputError::UnknownExtension { extension }),
    }

    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(&content)
}

/// Parse config source text, hashing the raw bytes.
pub fn parse_config(content: &str) -> Result<LoadResult, InputError> {
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let config = SynthesisConfig::from_json(content).map_err(|e| InputError::JsonParse {
        message: e.to_string(),
    })?;

    Ok(LoadResult {
        config,
        source_hash,
    })
}
