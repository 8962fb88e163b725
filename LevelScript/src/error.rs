//! Error types for `LevelScript`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `LevelScript` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Asset Errors ====================
    /// An asset file could not be read from disk.
    #[error("failed to read asset {path}: {source}")]
    AssetRead {
        /// The asset file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The sanitized asset text is not a valid YAML document.
    #[error("failed to parse asset {path}: {message}")]
    AssetParse {
        /// The asset file that failed to parse.
        path: PathBuf,
        /// The parser's error message.
        message: String,
    },

    // ==================== Level Errors ====================
    /// The level-list directory does not exist.
    #[error("level directory not found: {path}")]
    MissingDirectory {
        /// The configured level-list directory.
        path: PathBuf,
    },

    /// A generated script could not be written.
    #[error("failed to write script {path}: {source}")]
    ScriptWrite {
        /// The output file path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Configuration Errors ====================
    /// The pipeline configuration file could not be loaded.
    #[error("invalid config {path}: {message}")]
    Config {
        /// The configuration file path.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `LevelScript` operations.
pub type Result<T> = std::result::Result<T, Error>;
