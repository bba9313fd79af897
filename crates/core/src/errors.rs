//! Error types for the dirprincipal core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Principal(#[from] PrincipalError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Principal resolution errors
// ---------------------------------------------------------------------------

/// Errors from turning a directory entry into a principal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrincipalError {
    /// The entry's `objectClass` values match neither the configured user
    /// class nor the configured group class.
    #[error("entry '{dn}' is neither a user nor a group (objectClass: [{}])", .object_classes.join(", "))]
    UnknownEntryType {
        dn: String,
        object_classes: Vec<String>,
    },
}

impl PrincipalError {
    /// Whether repeating the same resolution could succeed.
    ///
    /// Classification failures depend only on the entry and the schema, so
    /// they never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            PrincipalError::UnknownEntryType { .. } => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
