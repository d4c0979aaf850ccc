use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::session_store::SessionStore;
use crate::application::services::password::verify_password;
use crate::application::use_cases::sessions::revoke_session::RevokeSession;
use crate::domain::accounts::account::{Account, AccountLookup};

pub struct DeleteAccount<'a, A: AccountRepository + ?Sized, S: SessionStore + ?Sized> {
    pub accounts: &'a A,
    pub sessions: &'a S,
}

impl<'a, A: AccountRepository + ?Sized, S: SessionStore + ?Sized> DeleteAccount<'a, A, S> {
    /// The profile row goes with the account through the foreign key.
    pub async fn execute(&self, id: Uuid, password: &str) -> Result<Account, AccountError> {
        let account = self
            .accounts
            .find(&AccountLookup::Id(id))
            .await?
            .ok_or(AccountError::NotFound)?;

        if !verify_password(password, &account.password_hash)? {
            tracing::warn!(account_id = %id, "account_delete_denied");
            return Err(AccountError::BadCredentials);
        }

        let revoked = RevokeSession {
            sessions: self.sessions,
        }
        .execute_all(id)
        .await?;

        let deleted = self.accounts.delete_account(id).await?;
        if !deleted {
            return Err(AccountError::NotFound);
        }

        tracing::info!(account_id = %id, revoked_sessions = revoked, "account_deleted");
        Ok(account)
    }
}
