use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::sessions::session::Session;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores the session until its `expires_at`.
    async fn put(&self, session: &Session) -> anyhow::Result<()>;
    async fn get(&self, refresh_token: &str) -> anyhow::Result<Option<Session>>;
    async fn remove(&self, refresh_token: &str) -> anyhow::Result<bool>;
    /// Returns how many sessions were removed.
    async fn remove_all_for_account(&self, account_id: Uuid) -> anyhow::Result<u64>;
}
