use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::AccountLookup;
use crate::domain::accounts::rules::AccountRules;
use crate::domain::accounts::validation::{validate_email, validate_password, validate_username};

/// Backs the registration form's per-field checks.
pub struct ValidateField<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
    pub rules: &'a AccountRules,
}

impl<'a, R: AccountRepository + ?Sized> ValidateField<'a, R> {
    pub async fn email(&self, raw: &str) -> Result<String, AccountError> {
        let email = validate_email(self.rules, raw)?;
        ensure_email_available(self.repo, &email, None).await?;
        Ok(email)
    }

    pub async fn username(&self, raw: &str) -> Result<String, AccountError> {
        let username = validate_username(self.rules, raw)?;
        ensure_username_available(self.repo, &username, None).await?;
        Ok(username)
    }

    pub fn password(&self, raw: &str) -> Result<(), AccountError> {
        validate_password(self.rules, raw)?;
        Ok(())
    }
}

// `owner` is the account allowed to already hold the value (updates).
pub(crate) async fn ensure_email_available<R: AccountRepository + ?Sized>(
    repo: &R,
    email: &str,
    owner: Option<Uuid>,
) -> Result<(), AccountError> {
    match repo.find(&AccountLookup::Email(email.to_string())).await? {
        Some(existing) if Some(existing.id) != owner => Err(AccountError::EmailTaken),
        _ => Ok(()),
    }
}

pub(crate) async fn ensure_username_available<R: AccountRepository + ?Sized>(
    repo: &R,
    username: &str,
    owner: Option<Uuid>,
) -> Result<(), AccountError> {
    match repo
        .find(&AccountLookup::Username(username.to_string()))
        .await?
    {
        Some(existing) if Some(existing.id) != owner => Err(AccountError::UsernameTaken),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::MemoryAccounts;
    use crate::domain::accounts::validation::FieldError;

    #[tokio::test]
    async fn reports_taken_values() {
        let repo = MemoryAccounts::default();
        repo.create_account("user@email.com", "FrogGie", "hash")
            .await
            .unwrap();
        let rules = AccountRules::default();
        let uc = ValidateField {
            repo: &repo,
            rules: &rules,
        };

        assert!(matches!(
            uc.email("USER@email.com").await,
            Err(AccountError::EmailTaken)
        ));
        assert!(matches!(
            uc.username("froggie").await,
            Err(AccountError::UsernameTaken)
        ));
        assert_eq!(uc.email("other@email.com").await.unwrap(), "other@email.com");
        assert_eq!(uc.username("toad").await.unwrap(), "toad");
    }

    #[tokio::test]
    async fn password_is_format_only() {
        let repo = MemoryAccounts::default();
        let rules = AccountRules::default();
        let uc = ValidateField {
            repo: &repo,
            rules: &rules,
        };
        assert!(uc.password("examplePword").is_ok());
        assert!(matches!(
            uc.password("short"),
            Err(AccountError::Invalid(FieldError::PasswordLength { .. }))
        ));
    }

    #[tokio::test]
    async fn owner_may_keep_own_value() {
        let repo = MemoryAccounts::default();
        let acc = repo
            .create_account("user@email.com", "froggie", "hash")
            .await
            .unwrap();
        assert!(
            ensure_email_available(&repo, "user@email.com", Some(acc.id))
                .await
                .is_ok()
        );
        assert!(
            ensure_username_available(&repo, "FROGGIE", Some(acc.id))
                .await
                .is_ok()
        );
    }
}
