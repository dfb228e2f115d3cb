//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    /// Set by an external verification flow; never written here
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert. The store assigns `id` and timestamps.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// User creation data transfer object
#[derive(Clone)]
pub struct CreateUser {
    /// User email address
    pub email: String,
    /// Plaintext password, hashed before anything is persisted
    pub password: String,
    /// User display name
    pub name: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Partial user update.
///
/// `None` means the field was omitted and its column is left alone;
/// `Some(value)` overwrites it, including falsy values such as `Some(false)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// True when the request carries no field at all
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.is_active.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Store-assigned user identifier
    pub id: i32,
    /// User email address
    pub email: String,
    /// User display name
    pub name: String,
    /// Activation flag
    pub is_active: bool,
    /// Verification timestamp (if verified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            verified_at: user.verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
