//! User service - Handles user lifecycle business rules.
//!
//! This is the only place where store-level errors are translated into the
//! domain vocabulary, and the only place that sees plaintext passwords.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use common::{AppError, AppResult};
use domain::{CreateUser, DomainError, NewUser, Password, UpdateUser, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Absence is a value, not an error: lookups and updates return `None`
/// and deletes return `false` when the user does not exist.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user, hashing the submitted password
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply a partial update; `None` when the user does not exist
    async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<Option<User>>;

    /// Delete user; `false` when the user does not exist
    async fn delete_user(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

/// Map a gateway uniqueness failure to the domain conflict.
fn translate_write_error(err: AppError) -> AppError {
    match err {
        AppError::ConstraintViolation(detail) => {
            warn!(%detail, "email already registered");
            DomainError::email_already_registered().into()
        }
        other => other,
    }
}

#[async_trait]
impl UserService for UserManager {
    #[instrument(skip(self, data), fields(email = %data.email))]
    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        let CreateUser {
            email,
            password,
            name,
        } = data;

        let password_hash = Password::new(&password)?.into_string();
        drop(password);

        let new_user = NewUser {
            email,
            password_hash,
            name,
        };

        let user = self
            .repo
            .create(new_user)
            .await
            .map_err(translate_write_error)?;
        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.repo.get_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.get_by_email(email).await
    }

    #[instrument(skip(self, data))]
    async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<Option<User>> {
        let Some(user) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };

        if data.is_empty() {
            debug!("update carries no fields; refreshing updated_at only");
        }

        let user = self
            .repo
            .update(user, data)
            .await
            .map_err(translate_write_error)?;
        Ok(Some(user))
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let Some(user) = self.repo.get_by_id(id).await? else {
            return Ok(false);
        };

        self.repo.delete(user).await?;
        Ok(true)
    }
}
