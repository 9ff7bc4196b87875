//! User table operations

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::User;

/// Database row for the users table
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    created_at: i64,
    settings: String,
}

impl UserRow {
    fn into_user(self) -> User {
        let settings: serde_json::Value =
            serde_json::from_str(&self.settings).unwrap_or(serde_json::Value::Null);

        User {
            id: self.id,
            username: self.username,
            password: self.password,
            created_at: self.created_at,
            settings,
        }
    }
}

/// User table operations
pub struct UserTable;

impl UserTable {
    /// Get a user by id
    pub async fn get_by_id(id: i64) -> Result<Option<User>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Get a user by username
    pub async fn get_by_username(username: &str) -> Result<Option<User>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Insert a user, returning the new id
    pub async fn insert(user: &User) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let settings = serde_json::to_string(&user.settings)?;

        let result = sqlx::query(
            "INSERT INTO users (username, password, created_at, settings) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(&settings)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replace a user's settings blob
    pub async fn update_settings(id: i64, settings: &serde_json::Value) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let settings = serde_json::to_string(settings)?;

        sqlx::query("UPDATE users SET settings = ? WHERE id = ?")
            .bind(&settings)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
