//! Domain-level constants.
//!
//! These constants define business rules shared by the store and the service.

/// Activation state of a freshly created account
pub const DEFAULT_IS_ACTIVE: bool = false;

/// Message carried by the conflict raised on a duplicate email
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
