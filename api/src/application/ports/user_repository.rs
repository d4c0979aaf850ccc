use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::{User, UserProfile};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, id: Uuid, profile: &UserProfile) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    // Returns false when no row exists for the id
    async fn save_user(&self, user: &User) -> anyhow::Result<bool>;
}
