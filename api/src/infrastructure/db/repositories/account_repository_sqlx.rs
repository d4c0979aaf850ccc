use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::account_repository::{AccountConflict, AccountRepository};
use crate::domain::accounts::account::{Account, AccountChanges, AccountLookup};
use crate::infrastructure::db::PgPool;

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_account(r: PgRow) -> Account {
    Account {
        id: r.get("id"),
        email: r.get("email"),
        username: r.get("username"),
        password_hash: r.get("password_hash"),
        created_at: r.get("created_at"),
    }
}

const EMAIL_UNIQUE: &str = "accounts_email_key";
const USERNAME_UNIQUE: &str = "accounts_username_lower_idx";

fn is_unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            Some(db.constraint().unwrap_or_default())
        }
        _ => None,
    }
}

fn conflict_for(constraint: &str) -> Option<AccountConflict> {
    match constraint {
        EMAIL_UNIQUE => Some(AccountConflict::Email),
        USERNAME_UNIQUE => Some(AccountConflict::Username),
        _ => None,
    }
}

// Unique violations on the account keys become `AccountConflict`
fn write_error(err: sqlx::Error) -> anyhow::Error {
    match is_unique_violation(&err).and_then(conflict_for) {
        Some(conflict) => conflict.into(),
        None => err.into(),
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn create_account(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account> {
        let row = sqlx::query(
            r#"INSERT INTO accounts (email, username, password_hash) VALUES ($1, $2, $3)
               RETURNING id, email, username, password_hash, created_at"#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;
        Ok(map_account(row))
    }

    async fn find(&self, lookup: &AccountLookup) -> anyhow::Result<Option<Account>> {
        let query = match lookup {
            AccountLookup::Id(id) => sqlx::query(
                r#"SELECT id, email, username, password_hash, created_at FROM accounts WHERE id = $1"#,
            )
            .bind(*id),
            AccountLookup::Email(email) => sqlx::query(
                r#"SELECT id, email, username, password_hash, created_at FROM accounts WHERE email = $1"#,
            )
            .bind(email.clone()),
            AccountLookup::Username(username) => sqlx::query(
                r#"SELECT id, email, username, password_hash, created_at FROM accounts
                   WHERE lower(username) = lower($1)"#,
            )
            .bind(username.clone()),
        };
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.map(map_account))
    }

    async fn update_account(
        &self,
        id: Uuid,
        changes: &AccountChanges,
    ) -> anyhow::Result<Option<Account>> {
        // NULL parameters keep the current column value
        let row = sqlx::query(
            r#"UPDATE accounts SET
                   email = COALESCE($2, email),
                   username = COALESCE($3, username),
                   password_hash = COALESCE($4, password_hash),
                   updated_at = now()
               WHERE id = $1
               RETURNING id, email, username, password_hash, created_at"#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.username.as_deref())
        .bind(changes.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?;
        Ok(row.map(map_account))
    }

    async fn delete_account(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_names_pick_the_field() {
        assert_eq!(conflict_for(EMAIL_UNIQUE), Some(AccountConflict::Email));
        assert_eq!(conflict_for(USERNAME_UNIQUE), Some(AccountConflict::Username));
        assert_eq!(conflict_for("accounts_pkey"), None);
    }

    #[test]
    fn non_database_errors_stay_internal() {
        let err = write_error(sqlx::Error::RowNotFound);
        assert!(err.downcast_ref::<AccountConflict>().is_none());
    }
}
