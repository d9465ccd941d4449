//! Error taxonomy surfaced by the session manager.
//!
//! Callers branch on [`SessionErrorKind`], never on messages: an expired or
//! revoked session is usually dropped silently, while a `JsonWebToken` error
//! points at tampering or a client bug.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced while signing, verifying or tracking session tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The embedded `exp` has passed, or the registry entry is gone (revoked)
    #[error("jwt expired")]
    TokenExpired {
        /// Embedded expiry, `None` when the registry entry was missing
        expired_at: Option<DateTime<Utc>>,
    },

    /// The embedded `nbf` lies in the future
    #[error("jwt not active")]
    NotBefore { date: DateTime<Utc> },

    /// Malformed token, bad signature, wrong algorithm or failed claim check
    #[error("{message}")]
    JsonWebToken { message: String },

    /// An expiry could not be resolved to a positive number of seconds
    #[error("Invalid duration: {value}")]
    InvalidDuration { value: String },

    /// The registry store failed
    #[error("Registry error: {message}")]
    Registry { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Discriminant of [`SessionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionErrorKind {
    TokenExpired,
    NotBefore,
    JsonWebToken,
    InvalidDuration,
    Registry,
    Internal,
}

impl SessionError {
    /// Expiry caused by a missing or revoked registry entry
    pub fn revoked() -> Self {
        SessionError::TokenExpired { expired_at: None }
    }

    pub fn json_web_token(message: impl Into<String>) -> Self {
        SessionError::JsonWebToken {
            message: message.into(),
        }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        SessionError::Registry {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SessionError::Internal {
            message: message.into(),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            SessionError::TokenExpired { .. } => SessionErrorKind::TokenExpired,
            SessionError::NotBefore { .. } => SessionErrorKind::NotBefore,
            SessionError::JsonWebToken { .. } => SessionErrorKind::JsonWebToken,
            SessionError::InvalidDuration { .. } => SessionErrorKind::InvalidDuration,
            SessionError::Registry { .. } => SessionErrorKind::Registry,
            SessionError::Internal { .. } => SessionErrorKind::Internal,
        }
    }

    pub fn is_token_expired(&self) -> bool {
        self.kind() == SessionErrorKind::TokenExpired
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
