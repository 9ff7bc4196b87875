//! User model

use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    /// pbkdf2 password hash, never serialized in API responses
    #[serde(skip_serializing)]
    pub password: String,
    /// Account creation time as a unix timestamp
    #[serde(default)]
    pub created_at: i64,
    /// Free-form client settings blob
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: -1,
            username,
            password: password_hash,
            created_at: chrono::Utc::now().timestamp(),
            settings: serde_json::Value::Null,
        }
    }
}
