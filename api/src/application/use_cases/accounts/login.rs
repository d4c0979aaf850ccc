use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::session_store::SessionStore;
use crate::application::services::password::verify_password;
use crate::application::use_cases::sessions::issue_session::IssueSession;
use crate::domain::accounts::account::{Account, AccountLookup};
use crate::domain::sessions::session::Session;

pub struct Login<'a, A: AccountRepository + ?Sized, S: SessionStore + ?Sized> {
    pub accounts: &'a A,
    pub sessions: &'a S,
    pub session_ttl: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    // Email wins when both are supplied
    fn lookup(&self) -> Option<AccountLookup> {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        if let Some(email) = non_empty(&self.email) {
            return Some(AccountLookup::Email(email.to_lowercase()));
        }
        non_empty(&self.username).map(AccountLookup::Username)
    }
}

impl<'a, A: AccountRepository + ?Sized, S: SessionStore + ?Sized> Login<'a, A, S> {
    pub async fn execute(&self, req: &LoginRequest) -> Result<(Account, Session), AccountError> {
        let lookup = req.lookup().ok_or(AccountError::NotSpecified)?;
        let account = self
            .accounts
            .find(&lookup)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !verify_password(&req.password, &account.password_hash)? {
            tracing::warn!(account_id = %account.id, "login_failed");
            return Err(AccountError::BadCredentials);
        }

        let session = IssueSession {
            sessions: self.sessions,
            ttl: self.session_ttl,
        }
        .execute(account.id)
        .await?;
        tracing::info!(account_id = %account.id, "login_succeeded");
        Ok((account, session))
    }
}
