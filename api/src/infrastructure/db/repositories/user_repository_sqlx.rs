use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, UserMedication, UserPreferences, UserProfile};
use crate::infrastructure::crypto::{decrypt_json, encrypt_json};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
    encryption_key: String,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool, encryption_key: String) -> Self {
        Self {
            pool,
            encryption_key,
        }
    }

    fn map_user(&self, r: PgRow) -> anyhow::Result<User> {
        let sealed: String = r.get("medication");
        let medication: UserMedication = decrypt_json(&self.encryption_key, &sealed)?;
        let preferences: Json<UserPreferences> = r.get("preferences");
        Ok(User {
            id: r.get("id"),
            display_name: r.get("display_name"),
            birth: r.get("birth"),
            height: r.get("height"),
            weight: r.get("weight"),
            medication,
            preferences: preferences.0,
            created_at: r.get("created_at"),
        })
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, id: Uuid, profile: &UserProfile) -> anyhow::Result<User> {
        let medication = encrypt_json(&self.encryption_key, &profile.medication)?;
        let row = sqlx::query(
            r#"INSERT INTO users (id, display_name, birth, height, weight, medication, preferences)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id, display_name, birth, height, weight, medication, preferences, created_at"#,
        )
        .bind(id)
        .bind(profile.display_name.as_deref())
        .bind(profile.birth)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(medication)
        .bind(Json(&profile.preferences))
        .fetch_one(&self.pool)
        .await?;
        self.map_user(row)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, display_name, birth, height, weight, medication, preferences, created_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| self.map_user(r)).transpose()
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<bool> {
        let medication = encrypt_json(&self.encryption_key, &user.medication)?;
        let res = sqlx::query(
            r#"UPDATE users SET display_name = $2, birth = $3, height = $4, weight = $5,
                   medication = $6, preferences = $7, updated_at = now()
               WHERE id = $1"#,
        )
        .bind(user.id)
        .bind(user.display_name.as_deref())
        .bind(user.birth)
        .bind(user.height)
        .bind(user.weight)
        .bind(medication)
        .bind(Json(&user.preferences))
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
