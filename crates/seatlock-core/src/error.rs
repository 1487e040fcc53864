//! Unified application error types for SeatLock.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Seat-arbitration failures are
//! routine outcomes of contention and carry their own kinds so callers
//! can tell "someone else has it" from "you're too late".

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested seat does not exist in the venue.
    SeatNotFound,
    /// A hold was attempted on a seat that is not available.
    SeatUnavailable,
    /// A confirm/release was attempted by a user who does not hold the seat.
    NotHolder,
    /// A confirm/release was attempted on an available or sold seat.
    NotHeld,
    /// A confirm was attempted after the hold's TTL lapsed.
    HoldExpired,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
    /// The service is shutting down or temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeatNotFound => write!(f, "SEAT_NOT_FOUND"),
            Self::SeatUnavailable => write!(f, "SEAT_UNAVAILABLE"),
            Self::NotHolder => write!(f, "NOT_HOLDER"),
            Self::NotHeld => write!(f, "NOT_HELD"),
            Self::HoldExpired => write!(f, "HOLD_EXPIRED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout SeatLock.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
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

    /// Create a seat-not-found error.
    pub fn seat_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatNotFound, message)
    }

    /// Create a seat-unavailable error.
    pub fn seat_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SeatUnavailable, message)
    }

    /// Create a not-holder error.
    pub fn not_holder(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotHolder, message)
    }

    /// Create a not-held error.
    pub fn not_held(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotHeld, message)
    }

    /// Create a hold-expired error.
    pub fn hold_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HoldExpired, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
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
