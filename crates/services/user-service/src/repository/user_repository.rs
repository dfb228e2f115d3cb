//! User repository: the persistence gateway for the `users` table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use tracing::debug;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups report a missing row as `Ok(None)`. Writes on a duplicate email
/// fail with `AppError::ConstraintViolation`; every other store failure is
/// `AppError::Database` with the driver error as its source.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the store assigns `id` and timestamps
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Find user by primary key
    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Write the fields present in `changes` onto a previously fetched user
    /// and return the stored row. Columns absent from `changes` are not
    /// written, so concurrent writes to them survive.
    async fn update(&self, user: User, changes: UpdateUser) -> AppResult<User>;

    /// Remove the user's row. Callers check existence first.
    async fn delete(&self, user: User) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        // is_active and verified_at fall back to column defaults
        let active_model = ActiveModel {
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        debug!(user_id = model.id, "user row inserted");
        Ok(User::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn update(&self, user: User, changes: UpdateUser) -> AppResult<User> {
        let mut active: ActiveModel = user::Model::from(user).into();
        active.apply(changes);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(|e| match e {
            // Row removed between fetch and write
            DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        })?;
        Ok(User::from(model))
    }

    async fn delete(&self, user: User) -> AppResult<()> {
        let result = UserEntity::delete_by_id(user.id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            debug!(user_id = user.id, "delete matched no row");
        }
        Ok(())
    }
}
