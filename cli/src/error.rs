//! Error types for configuration loading and batch execution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Errors reported by a save-file codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document parsed but is not a save-file object.
    #[error("document is not a JSON object")]
    NotAnObject,
}

/// Per-file failure during a batch run. Never aborts the remaining files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The input path does not name an existing file.
    #[error("file \"{}\" does not exist", .0.display())]
    MissingInput(PathBuf),

    /// The codec could not open the input.
    #[error("could not open file \"{}\": {source}", path.display())]
    Open {
        /// Absolute input path.
        path: PathBuf,
        /// Underlying codec failure.
        source: CodecError,
    },

    /// The output's parent directory could not be created.
    #[error("failed to create directory \"{}\": {source}", path.display())]
    CreateDirectory {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The codec could not write the output.
    #[error("failed to write output to \"{}\": {source}", path.display())]
    Save {
        /// Absolute output path.
        path: PathBuf,
        /// Underlying codec failure.
        source: CodecError,
    },
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
