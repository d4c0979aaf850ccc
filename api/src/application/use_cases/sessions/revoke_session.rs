use uuid::Uuid;

use crate::application::ports::session_store::SessionStore;

pub struct RevokeSession<'a, S: SessionStore + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: SessionStore + ?Sized> RevokeSession<'a, S> {
    pub async fn execute(&self, refresh_token: &str) -> anyhow::Result<bool> {
        self.sessions.remove(refresh_token).await
    }

    pub async fn execute_all(&self, account_id: Uuid) -> anyhow::Result<u64> {
        self.sessions.remove_all_for_account(account_id).await
    }
}
