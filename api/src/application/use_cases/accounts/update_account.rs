use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::application::services::password::{hash_password, verify_password};
use crate::application::use_cases::accounts::validate_field::{
    ensure_email_available, ensure_username_available,
};
use crate::domain::accounts::account::{Account, AccountChanges, AccountLookup};
use crate::domain::accounts::rules::AccountRules;
use crate::domain::accounts::validation::{validate_email, validate_password, validate_username};

pub struct UpdateAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
    pub rules: &'a AccountRules,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

impl<'a, R: AccountRepository + ?Sized> UpdateAccount<'a, R> {
    pub async fn execute(&self, id: Uuid, req: &UpdateAccountRequest) -> Result<Account, AccountError> {
        let existing = self
            .repo
            .find(&AccountLookup::Id(id))
            .await?
            .ok_or(AccountError::NotFound)?;

        let mut changes = AccountChanges::default();

        if let Some(raw) = &req.email {
            let email = validate_email(self.rules, raw)?;
            if email != existing.email {
                ensure_email_available(self.repo, &email, Some(id)).await?;
                changes.email = Some(email);
            }
        }

        if let Some(raw) = &req.username {
            let username = validate_username(self.rules, raw)?;
            if username != existing.username {
                ensure_username_available(self.repo, &username, Some(id)).await?;
                changes.username = Some(username);
            }
        }

        if let Some(password) = &req.password {
            validate_password(self.rules, password)?;
            let current = req
                .current_password
                .as_deref()
                .ok_or(AccountError::CurrentPasswordRequired)?;
            if !verify_password(current, &existing.password_hash)? {
                return Err(AccountError::BadCredentials);
            }
            changes.password_hash = Some(hash_password(password)?);
        }

        if changes.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .repo
            .update_account(id, &changes)
            .await
            .map_err(AccountError::from_store)?
            .ok_or(AccountError::NotFound)?;
        tracing::info!(
            account_id = %id,
            email = changes.email.is_some(),
            username = changes.username.is_some(),
            password = changes.password_hash.is_some(),
            "account_updated"
        );
        Ok(updated)
    }
}
