//! Error types for the schemascope library.
//!
//! The analysis core is deliberately infallible for well-formed inputs:
//! dangling relation targets, empty schemas, and resource-cap hits are all
//! recovered locally into neutral findings. The error type here covers the
//! remaining surfaces: configuration validation, serialization at the I/O
//! boundary, and sampling failures raised by pluggable content samplers.

use std::io;

use thiserror::Error;

/// Main result type for schemascope operations.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Error type for all schemascope operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// I/O related errors (reading schema files, writing reports)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// A boundary content-sampling step failed or timed out.
    ///
    /// The audit engine absorbs this into a neutral default section; it never
    /// aborts report generation.
    #[error("Sampling failure in '{analyzer}': {message}")]
    Sampling {
        /// Analyzer whose sampling step failed
        analyzer: String,
        /// Error description
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
    },
}

impl AuditError {
    /// Create a new I/O error with context.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error tied to a specific field.
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new sampling failure for the named analyzer.
    pub fn sampling(analyzer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sampling {
            analyzer: analyzer.into(),
            message: message.into(),
        }
    }

    /// Create a new serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            data_type: None,
            source: None,
        }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is recoverable by substituting a neutral default.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Sampling { .. })
    }
}

impl From<io::Error> for AuditError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.kind().to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            data_type: Some("json".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for AuditError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            data_type: Some("yaml".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Extension trait adding audit-specific context to results.
pub trait AuditResultExt<T> {
    /// Attach a configuration field name to a config error.
    fn with_config_field(self, field: &str) -> Result<T>;
}

impl<T> AuditResultExt<T> for Result<T> {
    fn with_config_field(self, field: &str) -> Result<T> {
        self.map_err(|err| match err {
            AuditError::Config { message, .. } => AuditError::Config {
                message,
                field: Some(field.to_string()),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_helpers_build_expected_variants() {
        let err = AuditError::config("bad threshold");
        assert!(matches!(err, AuditError::Config { field: None, .. }));

        let err = AuditError::config_field("bad threshold", "max_depth");
        match err {
            AuditError::Config { field, .. } => assert_eq!(field.as_deref(), Some("max_depth")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn sampling_errors_are_recoverable() {
        assert!(AuditError::sampling("content_health", "timeout").is_recoverable());
        assert!(!AuditError::validation("empty name").is_recoverable());
    }

    #[test]
    fn config_field_context_is_attached() {
        let result: Result<()> = Err(AuditError::config("out of range"));
        let err = result.with_config_field("min_report_depth").unwrap_err();
        match err {
            AuditError::Config { field, .. } => {
                assert_eq!(field.as_deref(), Some("min_report_depth"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
