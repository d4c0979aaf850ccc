use crate::application::ports::session_store::SessionStore;
use crate::domain::sessions::session::Session;

pub struct ResolveSession<'a, S: SessionStore + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: SessionStore + ?Sized> ResolveSession<'a, S> {
    pub async fn execute(&self, refresh_token: &str) -> anyhow::Result<Option<Session>> {
        let token = refresh_token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        let Some(session) = self.sessions.get(token).await? else {
            return Ok(None);
        };
        if session.is_expired_at(chrono::Utc::now()) {
            let _ = self.sessions.remove(token).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }
}
