//! Artist table operations

use anyhow::Result;

use crate::db::DbEngine;
use crate::models::Artist;

/// Artist table operations
pub struct ArtistTable;

impl ArtistTable {
    /// Get an artist by id
    pub async fn get_by_id(id: i64) -> Result<Option<Artist>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM artists WHERE id = ?")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(row.map(|(id, name)| Artist { id, name }))
    }

    /// Get an artist id by name, inserting the artist if missing
    pub async fn get_or_create(name: &str) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        sqlx::query("INSERT OR IGNORE INTO artists (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT id FROM artists WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }
}
