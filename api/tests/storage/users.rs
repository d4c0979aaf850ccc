use api::application::ports::account_repository::AccountRepository;
use api::application::ports::user_repository::UserRepository;
use api::domain::users::user::{
    DisplayUnit, DosageUnit, Medication, RouteOfAdministration, UserMedication, UserPreferences,
    UserProfile,
};
use api::infrastructure::db::repositories::account_repository_sqlx::SqlxAccountRepository;
use api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use chrono::NaiveDate;
use sqlx::Row;

use crate::containers::setup_postgres;

const KEY: &str = "storage-test-encryption-key";

fn medication(name: &str) -> UserMedication {
    UserMedication {
        medications: vec![Medication {
            name: name.into(),
            dosage: Some(50.0),
            unit: DosageUnit::Milligrams,
            route: RouteOfAdministration::Oral,
        }],
    }
}

#[tokio::test]
#[ignore = "needs docker"]
async fn profile_round_trips_with_sealed_medication() {
    let (pool, _container) = setup_postgres().await;
    let accounts = SqlxAccountRepository::new(pool.clone());
    let users = SqlxUserRepository::new(pool.clone(), KEY.into());
    let account = accounts
        .create_account("sam@example.com", "sam", "h")
        .await
        .unwrap();

    let profile = UserProfile {
        display_name: Some("Sam".into()),
        birth: NaiveDate::from_ymd_opt(1990, 4, 2),
        height: Some(180.0),
        weight: Some(72.5),
        medication: medication("sertraline"),
        preferences: UserPreferences {
            timezone: "Europe/Berlin".into(),
            height_format: DisplayUnit::Imperial,
            weight_format: DisplayUnit::Metric,
        },
    };
    let created = users.create_user(account.id, &profile).await.unwrap();
    assert_eq!(created.id, account.id);
    assert_eq!(created.medication, profile.medication);

    let raw: String = sqlx::query("SELECT medication FROM users WHERE id = $1")
        .bind(account.id)
        .fetch_one(&pool)
        .await
        .unwrap()
        .get("medication");
    assert!(raw.starts_with("v1:"));
    assert!(!raw.contains("sertraline"));

    let found = users
        .find_by_id(account.id)
        .await
        .unwrap()
        .expect("Profile exists");
    assert_eq!(found.display_name.as_deref(), Some("Sam"));
    assert_eq!(found.birth, profile.birth);
    assert_eq!(found.height, Some(180.0));
    assert_eq!(found.preferences, profile.preferences);
    assert_eq!(found.medication, profile.medication);

    // A different key cannot open the column
    let wrong_key = SqlxUserRepository::new(pool, "another-key".into());
    assert!(wrong_key.find_by_id(account.id).await.is_err());
}

#[tokio::test]
#[ignore = "needs docker"]
async fn save_overwrites_the_profile() {
    let (pool, _container) = setup_postgres().await;
    let accounts = SqlxAccountRepository::new(pool.clone());
    let users = SqlxUserRepository::new(pool, KEY.into());
    let account = accounts
        .create_account("tove@example.com", "tove", "h")
        .await
        .unwrap();
    let mut user = users
        .create_user(account.id, &UserProfile::default())
        .await
        .unwrap();
    assert!(user.medication.medications.is_empty());

    user.display_name = Some("Tove".into());
    user.weight = None;
    user.medication = medication("lithium");
    assert!(users.save_user(&user).await.unwrap());

    let found = users
        .find_by_id(account.id)
        .await
        .unwrap()
        .expect("Profile exists");
    assert_eq!(found.display_name.as_deref(), Some("Tove"));
    assert_eq!(found.weight, None);
    assert_eq!(found.medication, medication("lithium"));

    user.id = uuid::Uuid::new_v4();
    assert!(!users.save_user(&user).await.unwrap());
}

#[tokio::test]
#[ignore = "needs docker"]
async fn profile_goes_with_its_account() {
    let (pool, _container) = setup_postgres().await;
    let accounts = SqlxAccountRepository::new(pool.clone());
    let users = SqlxUserRepository::new(pool, KEY.into());
    let account = accounts
        .create_account("ulla@example.com", "ulla", "h")
        .await
        .unwrap();
    users
        .create_user(account.id, &UserProfile::default())
        .await
        .unwrap();

    accounts.delete_account(account.id).await.unwrap();
    assert!(users.find_by_id(account.id).await.unwrap().is_none());
}
