use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::session_store::SessionStore;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::password::hash_password;
use crate::application::use_cases::accounts::validate_field::{
    ensure_email_available, ensure_username_available,
};
use crate::application::use_cases::sessions::issue_session::IssueSession;
use crate::domain::accounts::account::Account;
use crate::domain::accounts::rules::AccountRules;
use crate::domain::accounts::validation::{validate_email, validate_password, validate_username};
use crate::domain::sessions::session::Session;
use crate::domain::users::user::{User, UserProfile};

pub struct CreateAccount<'a, A, U, S>
where
    A: AccountRepository + ?Sized,
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    pub accounts: &'a A,
    pub users: &'a U,
    pub sessions: &'a S,
    pub rules: &'a AccountRules,
    pub session_ttl: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    /// Blank profile when absent.
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub account: Account,
    pub user: User,
    pub session: Session,
}

impl<'a, A, U, S> CreateAccount<'a, A, U, S>
where
    A: AccountRepository + ?Sized,
    U: UserRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    pub async fn execute(&self, req: &CreateAccountRequest) -> Result<CreatedAccount, AccountError> {
        let email = validate_email(self.rules, &req.email)?;
        let username = validate_username(self.rules, &req.username)?;
        validate_password(self.rules, &req.password)?;

        let profile = req.profile.clone().unwrap_or_default();
        profile.validate(chrono::Utc::now().date_naive())?;

        ensure_email_available(self.accounts, &email, None).await?;
        ensure_username_available(self.accounts, &username, None).await?;

        let hash = hash_password(&req.password)?;
        let account = self
            .accounts
            .create_account(&email, &username, &hash)
            .await
            .map_err(AccountError::from_store)?;

        let user = match self.users.create_user(account.id, &profile).await {
            Ok(user) => user,
            Err(err) => {
                if let Err(cleanup) = self.accounts.delete_account(account.id).await {
                    tracing::warn!(account_id = %account.id, error = ?cleanup, "failed to remove account after user creation failed");
                }
                return Err(AccountError::UserSetup(err));
            }
        };

        let session = IssueSession {
            sessions: self.sessions,
            ttl: self.session_ttl,
        }
        .execute(account.id)
        .await?;

        tracing::info!(account_id = %account.id, "account_created");
        Ok(CreatedAccount {
            account,
            user,
            session,
        })
    }
}
