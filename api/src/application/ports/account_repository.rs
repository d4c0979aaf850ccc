use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::accounts::account::{Account, AccountChanges, AccountLookup};

/// Raised by a store when a write collides with another account's email or
/// username. Travels inside the `anyhow::Error` of the write methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccountConflict {
    #[error("email is already in use")]
    Email,
    #[error("username is already in use")]
    Username,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with [`AccountConflict`] when the email or username is held.
    async fn create_account(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account>;
    /// Username lookups are case-insensitive; emails are stored normalized.
    async fn find(&self, lookup: &AccountLookup) -> anyhow::Result<Option<Account>>;
    /// Fails with [`AccountConflict`] like `create_account`.
    async fn update_account(
        &self,
        id: Uuid,
        changes: &AccountChanges,
    ) -> anyhow::Result<Option<Account>>;
    async fn delete_account(&self, id: Uuid) -> anyhow::Result<bool>;
}
