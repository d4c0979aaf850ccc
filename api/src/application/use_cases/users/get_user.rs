use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<User, AccountError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }
}
