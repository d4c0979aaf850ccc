use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fields of an account that may be changed after creation. The id never is.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.password_hash.is_none()
    }
}

/// How a caller identifies an existing account (login, lookups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountLookup {
    Id(Uuid),
    Email(String),
    Username(String),
}
