//! Provider error and diagnostic types.

use calico_client::CalicoError;
use std::fmt;
use thiserror::Error;

/// Errors returned by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Calico API error, surfaced with the server's message
    #[error("{0}")]
    Calico(#[from] CalicoError),

    /// Configuration rejected before any remote call
    #[error("invalid configuration:\n{0}")]
    Validation(Diagnostics),

    /// An update touched attributes that can only be set at creation
    #[error("attributes cannot be updated in place, the resource must be replaced: {}", .0.join(", "))]
    RequiresReplace(Vec<String>),

    /// Configuration or state document could not be decoded
    #[error("failed to decode {what}: {message}")]
    Decode {
        /// Document being decoded
        what: String,
        /// Decoder message
        message: String,
    },

    /// Reading or writing a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// True when the underlying remote error means the pool is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Calico(e) if e.is_not_found())
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks the operation
    Error,
    /// Reported but not blocking
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the finding
    pub severity: Severity,
    /// Human readable message
    pub summary: String,
    /// Attribute path the finding refers to, e.g. `spec.0.ipip_mode`
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Error diagnostic attached to an attribute
    pub fn error(attribute: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// Warning diagnostic attached to an attribute
    pub fn warning(attribute: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute: Some(attribute.into()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        match &self.attribute {
            Some(attribute) => write!(f, "{level}: {attribute}: {}", self.summary),
            None => write!(f, "{level}: {}", self.summary),
        }
    }
}

/// Collected diagnostics; validation never stops at the first finding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Append all diagnostics from another collection
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// True when at least one error is present
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// Error diagnostics only
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    /// All diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Turn collected errors into a [`ProviderError::Validation`]; warnings pass through
    pub fn into_result(self) -> Result<Diagnostics, ProviderError> {
        if self.has_errors() {
            Err(ProviderError::Validation(self))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
