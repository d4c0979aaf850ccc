use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A refresh token granted to an account on login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: Uuid,
    pub refresh_token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn ttl_secs(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
