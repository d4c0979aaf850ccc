//! In-process adapters for the account, user and session ports. Nothing is
//! persisted; the router and use-case tests run against these.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::account_repository::{AccountConflict, AccountRepository};
use crate::application::ports::session_store::SessionStore;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::accounts::account::{Account, AccountChanges, AccountLookup};
use crate::domain::sessions::session::Session;
use crate::domain::users::user::{User, UserProfile};

/// Enforces the same uniqueness as the `accounts` table: exact email and
/// case-insensitive username.
#[derive(Default)]
pub struct MemoryAccounts {
    rows: Mutex<HashMap<Uuid, Account>>,
    stale_reads: AtomicBool,
}

impl MemoryAccounts {
    /// Email and username lookups report nothing while writes still see every
    /// row, like a concurrent insert that committed after the caller's read.
    pub fn with_stale_reads() -> Self {
        let accounts = Self::default();
        accounts.stale_reads.store(true, Ordering::SeqCst);
        accounts
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn conflict(
        rows: &HashMap<Uuid, Account>,
        skip: Option<Uuid>,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Option<AccountConflict> {
        let others = || rows.values().filter(move |a| Some(a.id) != skip);
        if email.is_some_and(|e| others().any(|a| a.email == e)) {
            return Some(AccountConflict::Email);
        }
        if username.is_some_and(|u| others().any(|a| a.username.eq_ignore_ascii_case(u))) {
            return Some(AccountConflict::Username);
        }
        None
    }
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn create_account(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(conflict) = Self::conflict(&rows, None, Some(email), Some(username)) {
            return Err(conflict.into());
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: chrono::Utc::now(),
        };
        rows.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find(&self, lookup: &AccountLookup) -> anyhow::Result<Option<Account>> {
        if self.stale_reads.load(Ordering::SeqCst) && !matches!(lookup, AccountLookup::Id(_)) {
            return Ok(None);
        }
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .values()
            .find(|a| match lookup {
                AccountLookup::Id(id) => a.id == *id,
                AccountLookup::Email(e) => a.email == *e,
                AccountLookup::Username(u) => a.username.eq_ignore_ascii_case(u),
            })
            .cloned())
    }

    async fn update_account(
        &self,
        id: Uuid,
        changes: &AccountChanges,
    ) -> anyhow::Result<Option<Account>> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(conflict) = Self::conflict(
            &rows,
            Some(id),
            changes.email.as_deref(),
            changes.username.as_deref(),
        ) {
            return Err(conflict.into());
        }
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(e) = &changes.email {
            row.email = e.clone();
        }
        if let Some(u) = &changes.username {
            row.username = u.clone();
        }
        if let Some(h) = &changes.password_hash {
            row.password_hash = h.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn delete_account(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<HashMap<Uuid, User>>,
    fail_create: AtomicBool,
}

impl MemoryUsers {
    /// Every `create_user` call errors.
    pub fn failing() -> Self {
        let users = Self::default();
        users.fail_create.store(true, Ordering::SeqCst);
        users
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create_user(&self, id: Uuid, profile: &UserProfile) -> anyhow::Result<User> {
        anyhow::ensure!(!self.fail_create.load(Ordering::SeqCst), "insert failed");
        let user = User {
            id,
            display_name: profile.display_name.clone(),
            birth: profile.birth,
            height: profile.height,
            weight: profile.weight,
            medication: profile.medication.clone(),
            preferences: profile.preferences.clone(),
            created_at: chrono::Utc::now(),
        };
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.get(&id).cloned())
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        match rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemorySessions {
    rows: Mutex<HashMap<String, Session>>,
}

impl MemorySessions {
    pub fn count_for(&self, account_id: Uuid) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|s| s.account_id == account_id)
            .count()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn put(&self, session: &Session) -> anyhow::Result<()> {
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(session.refresh_token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, refresh_token: &str) -> anyhow::Result<Option<Session>> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.get(refresh_token).cloned())
    }

    async fn remove(&self, refresh_token: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows.remove(refresh_token).is_some())
    }

    async fn remove_all_for_account(&self, account_id: Uuid) -> anyhow::Result<u64> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|_, s| s.account_id != account_id);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_enforce_uniqueness() {
        let repo = MemoryAccounts::default();
        let a = repo
            .create_account("a@email.com", "Froggie", "hash")
            .await
            .unwrap();
        repo.create_account("b@email.com", "toad", "hash")
            .await
            .unwrap();

        let err = repo
            .create_account("a@email.com", "newt", "hash")
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&AccountConflict::Email));

        let err = repo
            .update_account(
                a.id,
                &AccountChanges {
                    username: Some("TOAD".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&AccountConflict::Username));

        // Re-saving its own values is not a conflict
        let same = AccountChanges {
            email: Some("a@email.com".into()),
            username: Some("froggie".into()),
            ..Default::default()
        };
        assert!(repo.update_account(a.id, &same).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn stale_reads_hide_rows_from_field_lookups() {
        let repo = MemoryAccounts::with_stale_reads();
        let a = repo
            .create_account("a@email.com", "froggie", "hash")
            .await
            .unwrap();
        let by_email = AccountLookup::Email("a@email.com".into());
        assert!(repo.find(&by_email).await.unwrap().is_none());
        assert!(repo.find(&AccountLookup::Id(a.id)).await.unwrap().is_some());
        assert_eq!(repo.len(), 1);
    }
}
