//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::constants::EMAIL_ALREADY_REGISTERED;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Password hashing or verification failed
    #[error("Password error: {0}")]
    Password(String),

    /// Entity already exists (conflict)
    #[error("{0}")]
    Conflict(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Conflict raised when an email is already bound to another account
    pub fn email_already_registered() -> Self {
        DomainError::Conflict(EMAIL_ALREADY_REGISTERED.to_string())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
