use thiserror::Error;

use crate::application::ports::account_repository::AccountConflict;
use crate::domain::accounts::validation::FieldError;
use crate::domain::users::user::ProfileError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account not specified")]
    NotSpecified,
    #[error("account not found")]
    NotFound,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Invalid(#[from] FieldError),
    #[error("user: {0}")]
    Profile(#[from] ProfileError),
    /// The profile row could not be stored; the account was rolled back.
    #[error("user: could not create profile")]
    UserSetup(#[source] anyhow::Error),
    #[error("email is already in use")]
    EmailTaken,
    #[error("username is already in use")]
    UsernameTaken,
    #[error("current_password is required to change the password")]
    CurrentPasswordRequired,
    #[error("invalid credentials")]
    BadCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<AccountConflict> for AccountError {
    fn from(c: AccountConflict) -> Self {
        match c {
            AccountConflict::Email => AccountError::EmailTaken,
            AccountConflict::Username => AccountError::UsernameTaken,
        }
    }
}

impl AccountError {
    /// Errors caused by the caller's input, as opposed to store or crypto failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AccountError::Internal(_) | AccountError::UserSetup(_))
    }

    /// Store write failures; a lost uniqueness race becomes the matching
    /// `*Taken` error instead of an internal one.
    pub fn from_store(err: anyhow::Error) -> Self {
        match err.downcast::<AccountConflict>() {
            Ok(conflict) => conflict.into(),
            Err(err) => AccountError::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflicts_map_to_taken() {
        assert!(matches!(
            AccountError::from_store(AccountConflict::Email.into()),
            AccountError::EmailTaken
        ));
        assert!(matches!(
            AccountError::from_store(AccountConflict::Username.into()),
            AccountError::UsernameTaken
        ));
        let other = AccountError::from_store(anyhow::anyhow!("connection reset"));
        assert!(matches!(other, AccountError::Internal(_)));
        assert!(!other.is_client_error());
    }
}
