use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::account::{Account, AccountLookup};

pub struct GetAccount<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> GetAccount<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<Account, AccountError> {
        if id.is_nil() {
            return Err(AccountError::NotSpecified);
        }
        self.repo
            .find(&AccountLookup::Id(id))
            .await?
            .ok_or(AccountError::NotFound)
    }
}
