use api::application::ports::session_store::SessionStore;
use api::domain::sessions::session::Session;
use api::infrastructure::cache::RedisSessionStore;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::containers::setup_redis;

fn session(account_id: Uuid, token: &str) -> Session {
    let now = Utc::now();
    Session {
        account_id,
        refresh_token: token.into(),
        created_at: now,
        expires_at: now + Duration::hours(1),
    }
}

#[tokio::test]
#[ignore = "needs docker"]
async fn put_get_remove() {
    let (conn, _container) = setup_redis().await;
    let store = RedisSessionStore::new(conn, "test");
    store.ping().await.unwrap();

    let account = Uuid::new_v4();
    let stored = session(account, "token-a");
    store.put(&stored).await.unwrap();
    assert_eq!(store.get("token-a").await.unwrap(), Some(stored));
    assert_eq!(store.get("token-b").await.unwrap(), None);

    assert!(store.remove("token-a").await.unwrap());
    assert!(!store.remove("token-a").await.unwrap());
    assert_eq!(store.get("token-a").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "needs docker"]
async fn remove_all_only_touches_one_account() {
    let (conn, _container) = setup_redis().await;
    let store = RedisSessionStore::new(conn, "test");
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
    for token in ["a1", "a2", "a3"] {
        store.put(&session(alice, token)).await.unwrap();
    }
    store.put(&session(bob, "b1")).await.unwrap();

    assert_eq!(store.remove_all_for_account(alice).await.unwrap(), 3);
    assert_eq!(store.get("a2").await.unwrap(), None);
    assert!(store.get("b1").await.unwrap().is_some());
    assert_eq!(store.remove_all_for_account(alice).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "needs docker"]
async fn expired_sessions_are_refused() {
    let (conn, _container) = setup_redis().await;
    let store = RedisSessionStore::new(conn, "test");
    let mut expired = session(Uuid::new_v4(), "old");
    expired.expires_at = Utc::now() - Duration::seconds(1);
    assert!(store.put(&expired).await.is_err());
    assert_eq!(store.get("old").await.unwrap(), None);
}
