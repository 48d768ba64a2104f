//! Unified error types for production control data access.
//!
//! Every crate maps its internal errors into [`AppError`] so that the `?`
//! operator propagates a single error type up to the caller. Validation
//! anomalies on pagination input are absorbed by coercion and never show up
//! here; a missing entity is an absent value, not an error.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The backend could not be reached or the connection broke.
    Connection,
    /// The backend rejected a generated statement.
    MalformedStatement,
    /// The backend or the connection pool timed out.
    Timeout,
    /// An untrusted value could not be embedded as a SQL literal.
    EscapingBoundary,
    /// A result row could not be decoded into an entity.
    Mapping,
    /// A configuration error occurred.
    Configuration,
    /// Caller input was rejected outright.
    Validation,
    /// The requested entity does not exist.
    NotFound,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is a backend data access failure.
    ///
    /// These are propagated unchanged; retrying is the caller's decision.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            Self::Connection | Self::MalformedStatement | Self::Timeout
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => write!(f, "CONNECTION"),
            Self::MalformedStatement => write!(f, "MALFORMED_STATEMENT"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::EscapingBoundary => write!(f, "ESCAPING_BOUNDARY"),
            Self::Mapping => write!(f, "MAPPING"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout the workspace.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an escaping-boundary error.
    pub fn escaping_boundary(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EscapingBoundary, message)
    }

    /// Create a row mapping error.
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Mapping, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Whether this error is a backend data access failure.
    pub fn is_data_access(&self) -> bool {
        self.kind.is_data_access()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
