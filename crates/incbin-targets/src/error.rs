//! Error types for target profile operations.

use std::path::PathBuf;

/// Errors that can occur while building, loading, or validating a target profile.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing profile files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile file not found.
    #[error("profile file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Validation error in a profile definition.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },

    /// The architecture name matches no known architecture.
    #[error("unsupported architecture: '{name}'")]
    UnsupportedArchitecture {
        /// The name as it was supplied.
        name: String,
    },

    /// The object-format family matches no known family.
    #[error("unsupported object-format family: '{name}'")]
    UnsupportedFamily {
        /// The name as it was supplied.
        name: String,
    },

    /// A required build-script environment variable is not set.
    #[error("environment variable {var} is not set (is this running inside a build script?)")]
    MissingEnv {
        /// The variable name.
        var: String,
    },

    /// An alignment that is not a power of two.
    #[error("alignment {bytes} is not a power of two")]
    InvalidAlignment {
        /// The rejected byte count.
        bytes: u32,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
