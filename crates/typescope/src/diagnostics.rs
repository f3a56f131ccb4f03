//! Recorded messages for degraded resolution paths.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable problem found while resolving a type. The pass continues
/// with a fallback schema in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Identity of the type being resolved when the problem was found.
    pub identity: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            identity: identity.into(),
            message: message.into(),
        }
    }

    pub fn error(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            identity: identity.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", level, self.identity, self.message)
    }
}
