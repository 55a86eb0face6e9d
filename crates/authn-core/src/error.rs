//! Unified application error types for authn.
//!
//! Every crate maps its internal failures into [`AppError`] so they
//! propagate through `?` and reach the HTTP boundary with a stable
//! [`ErrorKind`]. The session-validation kinds stay distinct
//! so the boundary can report each one, while login failures collapse
//! into a single [`ErrorKind::InvalidCredentials`].

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Unknown username or wrong password. Never distinguishes the two.
    InvalidCredentials,
    /// No session identifier was presented.
    NoSession,
    /// The session does not exist or has been revoked.
    InvalidSession,
    /// The session passed its idle or absolute expiry.
    SessionExpired,
    /// The session's owning user record no longer exists.
    UserNotFound,
    /// The CSRF header is missing or does not match the session token.
    CsrfInvalid,
    /// Input validation failed.
    Validation,
    /// The caller may not use this operation.
    Forbidden,
    /// A uniqueness conflict occurred.
    Conflict,
    /// The durable session/user store failed.
    Database,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code surfaced to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::NoSession => "no_session",
            Self::InvalidSession => "invalid_session",
            Self::SessionExpired => "session_expired",
            Self::UserNotFound => "user_not_found",
            Self::CsrfInvalid => "csrf_invalid",
            Self::Validation => "validation_error",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Database => "store_error",
            Self::Serialization => "invalid_body",
            Self::Configuration => "configuration_error",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::NoSession => write!(f, "NO_SESSION"),
            Self::InvalidSession => write!(f, "INVALID_SESSION"),
            Self::SessionExpired => write!(f, "SESSION_EXPIRED"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::CsrfInvalid => write!(f, "CSRF_INVALID"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout authn.
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
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
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

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid username or password")
    }

    pub fn no_session() -> Self {
        Self::new(ErrorKind::NoSession, "No session presented")
    }

    pub fn invalid_session() -> Self {
        Self::new(ErrorKind::InvalidSession, "Session is unknown or revoked")
    }

    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, "Session has expired")
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, "Session user no longer exists")
    }

    pub fn csrf_invalid() -> Self {
        Self::new(ErrorKind::CsrfInvalid, "CSRF token missing or invalid")
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database (store) error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Wire detail for the HTTP boundary.
    ///
    /// Authentication failures report only their code; client-input
    /// failures carry their message; server faults never leak internals.
    pub fn detail(&self) -> String {
        match self.kind {
            ErrorKind::Validation
            | ErrorKind::Forbidden
            | ErrorKind::Conflict => self.message.clone(),
            kind => kind.code().to_string(),
        }
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
