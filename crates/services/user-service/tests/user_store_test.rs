//! Persistence gateway and lifecycle service against a real store.

mod support;

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};

use common::AppError;
use domain::{CreateUser, NewUser, Password, UpdateUser};
use user_service_lib::repository::entities::user;
use user_service_lib::repository::{UserRepository, UserStore};
use user_service_lib::service::{UserManager, UserService};

fn create_request(email: &str, password: &str, name: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    }
}

fn new_user(email: &str, name: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$not-a-real-hash".to_string(),
        name: name.to_string(),
    }
}

async fn setup() -> (Arc<UserStore>, UserManager) {
    let db = support::test_database().await;
    let store = Arc::new(UserStore::new(db.get_connection()));
    let service = UserManager::new(store.clone());
    (store, service)
}

#[tokio::test]
async fn test_store_create_assigns_id_and_defaults() {
    let (store, _) = setup().await;

    let first = store.create(new_user("one@b.com", "One")).await.unwrap();
    let second = store.create(new_user("two@b.com", "Two")).await.unwrap();

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);
    assert!(!first.is_active);
    assert!(first.verified_at.is_none());
    assert_eq!(first.created_at, first.updated_at);
}

#[tokio::test]
async fn test_store_duplicate_email_is_constraint_violation() {
    let (store, _) = setup().await;
    store.create(new_user("dup@b.com", "First")).await.unwrap();

    let err = store.create(new_user("dup@b.com", "Second")).await.unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_store_lookups_report_absence() {
    let (store, _) = setup().await;

    assert!(store.get_by_id(12345).await.unwrap().is_none());
    assert!(store.get_by_email("nobody@b.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_update_refreshes_updated_at() {
    let (store, _) = setup().await;
    let user = store.create(new_user("u@b.com", "U")).await.unwrap();
    let created_at = user.created_at;

    let changes = UpdateUser {
        is_active: Some(true),
        ..Default::default()
    };
    let updated = store.update(user, changes).await.unwrap();

    assert!(updated.is_active);
    assert_eq!(updated.created_at, created_at);
    assert!(updated.updated_at >= created_at);
}

#[tokio::test]
async fn test_store_update_keeps_columns_written_after_fetch() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());
    let created = store.create(new_user("race@b.com", "A")).await.unwrap();
    let stale = store.get_by_id(created.id).await.unwrap().unwrap();

    // Another writer verifies and activates the account in between
    let verified_at = Utc::now();
    user::ActiveModel {
        id: sea_orm::ActiveValue::Unchanged(created.id),
        is_active: Set(true),
        verified_at: Set(Some(verified_at)),
        ..Default::default()
    }
    .update(&db.get_connection())
    .await
    .unwrap();

    let changes = UpdateUser {
        name: Some("A2".to_string()),
        ..Default::default()
    };
    let updated = store.update(stale, changes).await.unwrap();

    assert_eq!(updated.name, "A2");
    assert!(updated.is_active);
    assert_eq!(
        updated.verified_at.map(|at| at.timestamp()),
        Some(verified_at.timestamp())
    );

    let stored = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_store_update_of_removed_row_is_not_found() {
    let (store, _) = setup().await;
    let user = store.create(new_user("gone@b.com", "Gone")).await.unwrap();
    store.delete(user.clone()).await.unwrap();

    let changes = UpdateUser {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    let err = store.update(user, changes).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound), "got {:?}", err);
}

#[tokio::test]
async fn test_create_user_scenario() {
    let (_, service) = setup().await;

    let first = service
        .create_user(create_request("a@b.com", "secret123", "A"))
        .await
        .unwrap();
    assert!(first.id > 0);
    assert_eq!(first.email, "a@b.com");
    assert_eq!(first.name, "A");
    assert_ne!(first.password_hash, "secret123");
    assert!(Password::from_hash(first.password_hash.clone()).verify("secret123"));

    let err = service
        .create_user(create_request("a@b.com", "other", "B"))
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "Email already registered"),
        other => panic!("expected conflict, got {:?}", other),
    }

    // No duplicate row: the first account is still the one found by email
    let stored = service.get_user_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.name, "A");

    let update = UpdateUser {
        name: Some("A2".to_string()),
        ..Default::default()
    };
    let updated = service.update_user(first.id, update).await.unwrap().unwrap();
    assert_eq!(updated.email, "a@b.com");
    assert_eq!(updated.name, "A2");
    assert!(!updated.is_active);
    assert_eq!(updated.password_hash, first.password_hash);
}

#[tokio::test]
async fn test_update_user_explicit_false_and_missing_id() {
    let (_, service) = setup().await;
    let user = service
        .create_user(create_request("flag@b.com", "secret123", "Flag"))
        .await
        .unwrap();

    let activate = UpdateUser {
        is_active: Some(true),
        ..Default::default()
    };
    let active = service.update_user(user.id, activate).await.unwrap().unwrap();
    assert!(active.is_active);

    let deactivate = UpdateUser {
        is_active: Some(false),
        ..Default::default()
    };
    let inactive = service.update_user(user.id, deactivate).await.unwrap().unwrap();
    assert!(!inactive.is_active);
    assert_eq!(inactive.name, "Flag");

    let missing = service
        .update_user(user.id + 1000, UpdateUser::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_user_to_taken_email_is_conflict() {
    let (_, service) = setup().await;
    service
        .create_user(create_request("taken@b.com", "secret123", "T"))
        .await
        .unwrap();
    let other = service
        .create_user(create_request("free@b.com", "secret123", "F"))
        .await
        .unwrap();

    let update = UpdateUser {
        email: Some("taken@b.com".to_string()),
        ..Default::default()
    };
    let err = service.update_user(other.id, update).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);
    let unchanged = service.get_user_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.email, "free@b.com");
}

#[tokio::test]
async fn test_delete_user_lifecycle() {
    let (_, service) = setup().await;
    let user = service
        .create_user(create_request("del@b.com", "secret123", "Del"))
        .await
        .unwrap();

    assert!(service.delete_user(user.id).await.unwrap());
    assert!(service.get_user_by_id(user.id).await.unwrap().is_none());
    assert!(!service.delete_user(user.id).await.unwrap());
}
