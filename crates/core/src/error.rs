//! Error type for the generator.
//!
//! Only the edges of the pipeline can fail: reading and parsing the input
//! document, loading configuration and writing the output tree. The
//! transformation phases degrade unmodeled constructs to `any` instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised while loading a specification or persisting generated files.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The input document is not valid YAML.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The input document is not valid JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        /// Offending config file
        path: PathBuf,
        /// Parse error
        #[source]
        source: toml::de::Error,
    },

    /// A generated relative path would land outside the output root.
    #[error("Generated path escapes the output directory: {0}")]
    InvalidOutputPath(String),
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
