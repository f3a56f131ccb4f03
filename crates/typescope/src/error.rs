use thiserror::Error;

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Fatal errors that abort a schema-generation pass.
///
/// Recoverable problems never show up here; they are logged and recorded as
/// [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Declared type parameters and supplied type arguments differ in count
    #[error("type {identity} declares {expected} type parameter(s) but {found} argument(s) were supplied")]
    ArityMismatch {
        identity: String,
        expected: usize,
        found: usize,
    },

    /// Non-string map key while strict map keys are enabled
    #[error("map {identity} has non-string key type {key}")]
    NonStringMapKey { identity: String, key: String },
}

impl ResolveError {
    pub fn arity_mismatch<T: ToString>(identity: T, expected: usize, found: usize) -> Self {
        Self::ArityMismatch {
            identity: identity.to_string(),
            expected,
            found,
        }
    }

    pub fn non_string_map_key<T: ToString, K: ToString>(identity: T, key: K) -> Self {
        Self::NonStringMapKey {
            identity: identity.to_string(),
            key: key.to_string(),
        }
    }
}

/// Result type for component export
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while rendering or writing components
#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error while writing the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading a resolver configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
