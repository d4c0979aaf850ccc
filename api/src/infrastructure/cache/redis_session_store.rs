use anyhow::Context;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use uuid::Uuid;

use crate::application::ports::session_store::SessionStore;
use crate::domain::sessions::session::Session;

/// Sessions live under `{prefix}:session:{token}` with a TTL matching their
/// expiry; `{prefix}:account:{id}:sessions` indexes the tokens per account.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}:session:{}", self.key_prefix, token)
    }

    fn account_key(&self, account_id: Uuid) -> String {
        format!("{}:account:{}:sessions", self.key_prefix, account_id)
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("redis_ping")?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &Session) -> anyhow::Result<()> {
        let ttl = session.ttl_secs(chrono::Utc::now());
        anyhow::ensure!(ttl > 0, "session already expired");
        let payload = serde_json::to_string(session)?;
        let account_key = self.account_key(session.account_id);
        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(self.session_key(&session.refresh_token))
            .arg(payload)
            .arg("EX")
            .arg(ttl)
            .ignore()
            .cmd("SADD")
            .arg(&account_key)
            .arg(&session.refresh_token)
            .ignore()
            // Every session gets the same TTL, so the newest one bounds the index
            .cmd("EXPIRE")
            .arg(&account_key)
            .arg(ttl)
            .ignore()
            .query_async(&mut conn)
            .await
            .context("redis_put_session")?;
        Ok(())
    }

    async fn get(&self, refresh_token: &str) -> anyhow::Result<Option<Session>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.session_key(refresh_token))
            .query_async(&mut conn)
            .await
            .context("redis_get_session")?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, refresh_token: &str) -> anyhow::Result<bool> {
        let Some(session) = self.get(refresh_token).await? else {
            return Ok(false);
        };
        let mut conn = self.conn.clone();
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .cmd("DEL")
            .arg(self.session_key(refresh_token))
            .cmd("SREM")
            .arg(self.account_key(session.account_id))
            .arg(refresh_token)
            .query_async(&mut conn)
            .await
            .context("redis_remove_session")?;
        Ok(removed > 0)
    }

    async fn remove_all_for_account(&self, account_id: Uuid) -> anyhow::Result<u64> {
        let account_key = self.account_key(account_id);
        let mut conn = self.conn.clone();
        let tokens: Vec<String> = redis::cmd("SMEMBERS")
            .arg(&account_key)
            .query_async(&mut conn)
            .await
            .context("redis_list_sessions")?;
        if tokens.is_empty() {
            let _: i64 = redis::cmd("DEL")
                .arg(&account_key)
                .query_async(&mut conn)
                .await?;
            return Ok(0);
        }
        let keys: Vec<String> = tokens.iter().map(|t| self.session_key(t)).collect();
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .cmd("DEL")
            .arg(&keys)
            .cmd("DEL")
            .arg(&account_key)
            .query_async(&mut conn)
            .await
            .context("redis_remove_account_sessions")?;
        Ok(removed.max(0) as u64)
    }
}
