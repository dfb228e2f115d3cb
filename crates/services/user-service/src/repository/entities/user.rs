//! User database entity for SeaORM.

use sea_orm::{entity::prelude::*, ActiveValue::Set};

use domain::{UpdateUser, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub verified_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            is_active: model.is_active,
            verified_at: model.verified_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<User> for Model {
    fn from(user: User) -> Self {
        Model {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            is_active: user.is_active,
            verified_at: user.verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl ActiveModel {
    /// Mark the columns present in `changes` as `Set`. Every other column
    /// stays `Unchanged` and is left out of the UPDATE statement.
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(email) = changes.email {
            self.email = Set(email);
        }
        if let Some(name) = changes.name {
            self.name = Set(name);
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = Set(is_active);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::ActiveValue;

    use super::*;

    fn fetched() -> ActiveModel {
        let now = Utc::now();
        Model {
            id: 1,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$v=19$stored".to_string(),
            name: "A".to_string(),
            is_active: true,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
        .into()
    }

    #[test]
    fn test_apply_sets_only_present_columns() {
        let mut active = fetched();

        active.apply(UpdateUser {
            name: Some("A2".to_string()),
            ..Default::default()
        });

        assert!(matches!(active.name, ActiveValue::Set(ref name) if name == "A2"));
        assert!(matches!(active.email, ActiveValue::Unchanged(_)));
        assert!(matches!(active.is_active, ActiveValue::Unchanged(true)));
        assert!(matches!(active.password_hash, ActiveValue::Unchanged(_)));
        assert!(matches!(active.verified_at, ActiveValue::Unchanged(None)));
    }

    #[test]
    fn test_apply_explicit_false_is_set() {
        let mut active = fetched();

        active.apply(UpdateUser {
            is_active: Some(false),
            ..Default::default()
        });

        assert!(matches!(active.is_active, ActiveValue::Set(false)));
        assert!(matches!(active.name, ActiveValue::Unchanged(_)));
    }

    #[test]
    fn test_apply_empty_update_touches_nothing() {
        let mut active = fetched();

        active.apply(UpdateUser::default());

        assert!(!active.is_changed());
    }
}
