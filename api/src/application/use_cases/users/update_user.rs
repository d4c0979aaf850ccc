use uuid::Uuid;

use crate::application::error::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, UserChanges};

pub struct UpdateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> UpdateUser<'a, R> {
    pub async fn execute(&self, id: Uuid, changes: UserChanges) -> Result<User, AccountError> {
        let mut user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)?;
        user.apply(changes);
        user.profile().validate(chrono::Utc::now().date_naive())?;
        if !self.repo.save_user(&user).await? {
            return Err(AccountError::UserNotFound);
        }
        Ok(user)
    }
}
