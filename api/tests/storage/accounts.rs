use api::application::ports::account_repository::{AccountConflict, AccountRepository};
use api::domain::accounts::account::{AccountChanges, AccountLookup};
use api::infrastructure::db::repositories::account_repository_sqlx::SqlxAccountRepository;

use crate::containers::setup_postgres;

#[tokio::test]
#[ignore = "needs docker"]
async fn create_and_find_by_any_key() {
    let (pool, _container) = setup_postgres().await;
    let repo = SqlxAccountRepository::new(pool);

    let created = repo
        .create_account("mira@example.com", "Mira", "hash-1")
        .await
        .unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(created.username, "Mira");

    let by_id = repo
        .find(&AccountLookup::Id(created.id))
        .await
        .unwrap()
        .expect("Should find by id");
    assert_eq!(by_id.email, "mira@example.com");

    let by_email = repo
        .find(&AccountLookup::Email("mira@example.com".into()))
        .await
        .unwrap()
        .expect("Should find by email");
    assert_eq!(by_email.id, created.id);

    let by_username = repo
        .find(&AccountLookup::Username("mIRA".into()))
        .await
        .unwrap()
        .expect("Username lookup ignores case");
    assert_eq!(by_username.id, created.id);
    assert_eq!(by_username.username, "Mira");

    let missing = repo
        .find(&AccountLookup::Username("nobody".into()))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "needs docker"]
async fn partial_update_keeps_other_columns() {
    let (pool, _container) = setup_postgres().await;
    let repo = SqlxAccountRepository::new(pool);
    let created = repo
        .create_account("nils@example.com", "nils", "hash-1")
        .await
        .unwrap();

    let changes = AccountChanges {
        username: Some("Nils2".into()),
        ..Default::default()
    };
    let updated = repo
        .update_account(created.id, &changes)
        .await
        .unwrap()
        .expect("Row exists");
    assert_eq!(updated.username, "Nils2");
    assert_eq!(updated.email, "nils@example.com");
    assert_eq!(updated.password_hash, "hash-1");
    assert_eq!(updated.created_at, created.created_at);

    let changes = AccountChanges {
        password_hash: Some("hash-2".into()),
        ..Default::default()
    };
    let updated = repo
        .update_account(created.id, &changes)
        .await
        .unwrap()
        .expect("Row exists");
    assert_eq!(updated.username, "Nils2");
    assert_eq!(updated.password_hash, "hash-2");

    let gone = repo
        .update_account(uuid::Uuid::new_v4(), &changes)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
#[ignore = "needs docker"]
async fn unique_keys_raise_typed_conflicts() {
    let (pool, _container) = setup_postgres().await;
    let repo = SqlxAccountRepository::new(pool);
    repo.create_account("olga@example.com", "olga", "h")
        .await
        .unwrap();

    let err = repo
        .create_account("olga@example.com", "other", "h")
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<AccountConflict>(),
        Some(&AccountConflict::Email)
    );

    let err = repo
        .create_account("other@example.com", "OLGA", "h")
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<AccountConflict>(),
        Some(&AccountConflict::Username)
    );

    let second = repo
        .create_account("petra@example.com", "petra", "h")
        .await
        .unwrap();
    let changes = AccountChanges {
        email: Some("olga@example.com".into()),
        ..Default::default()
    };
    let err = repo.update_account(second.id, &changes).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<AccountConflict>(),
        Some(&AccountConflict::Email)
    );
}

#[tokio::test]
#[ignore = "needs docker"]
async fn delete_reports_whether_a_row_went() {
    let (pool, _container) = setup_postgres().await;
    let repo = SqlxAccountRepository::new(pool);
    let created = repo
        .create_account("rosa@example.com", "rosa", "h")
        .await
        .unwrap();

    assert!(repo.delete_account(created.id).await.unwrap());
    assert!(!repo.delete_account(created.id).await.unwrap());
    assert!(
        repo.find(&AccountLookup::Id(created.id))
            .await
            .unwrap()
            .is_none()
    );
}
