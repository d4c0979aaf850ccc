use uuid::Uuid;

use crate::application::ports::session_store::SessionStore;
use crate::application::services::tokens::generate_refresh_token;
use crate::domain::sessions::session::Session;

pub struct IssueSession<'a, S: SessionStore + ?Sized> {
    pub sessions: &'a S,
    pub ttl: chrono::Duration,
}

impl<'a, S: SessionStore + ?Sized> IssueSession<'a, S> {
    pub async fn execute(&self, account_id: Uuid) -> anyhow::Result<Session> {
        let now = chrono::Utc::now();
        let session = Session {
            account_id,
            refresh_token: generate_refresh_token(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.put(&session).await?;
        tracing::debug!(account_id = %account_id, expires_at = %session.expires_at, "session_issued");
        Ok(session)
    }
}
