//! Code generation errors.

use std::path::PathBuf;

use incbin_targets::TargetError;
use thiserror::Error;

/// Errors that can occur while generating or writing embedding code.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid resource name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid symbol prefix '{prefix}': must be [A-Za-z_][A-Za-z0-9_]*")]
    InvalidPrefix { prefix: String },

    #[error("no assembler dialect for profile '{profile}': {detail}")]
    UnsupportedDialect { profile: String, detail: String },

    #[error("profile '{profile}' has no inline raw-include facility; only declarations can be emitted")]
    NoInlineAssembly { profile: String },

    #[error("source file for resource '{name}' not found: {}", path.display())]
    MissingSource { name: String, path: PathBuf },

    #[error("resource '{name}' is embedded more than once")]
    DuplicateResource { name: String },

    #[error("resources '{first}' and '{second}' both generate the accessor `{accessor}()`")]
    AccessorCollision {
        first: String,
        second: String,
        accessor: String,
    },

    #[error("source file for resource '{name}' is {len} bytes; the size symbol holds at most {max}")]
    SourceTooLarge { name: String, len: u64, max: u64 },

    #[error("environment variable {var} is not set (is this running inside a build script?)")]
    MissingEnv { var: String },

    #[error("definition provider failed: {detail}")]
    Provider { detail: String },

    #[error("target error: {0}")]
    Target(#[from] TargetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
