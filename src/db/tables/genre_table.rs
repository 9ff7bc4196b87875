//! Genre table operations

use anyhow::Result;
use std::collections::HashMap;

use crate::db::DbEngine;

/// Genre table operations
pub struct GenreTable;

impl GenreTable {
    /// Get the genre-name lists for every album in the catalog.
    ///
    /// Always loads all albums regardless of any active listing filter;
    /// affinity computation needs the tags of liked albums even when those
    /// albums fall outside the filtered set.
    pub async fn tags_by_album() -> Result<HashMap<i64, Vec<String>>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT ag.album_id, g.name FROM album_genres ag \
             JOIN genres g ON g.id = ag.genre_id \
             ORDER BY ag.album_id, g.id",
        )
        .fetch_all(pool)
        .await?;

        let mut map: HashMap<i64, Vec<String>> = HashMap::new();
        for (album_id, name) in rows {
            map.entry(album_id).or_default().push(name);
        }

        Ok(map)
    }

    /// Get the genre names for a single album
    pub async fn tags_for_album(album_id: i64) -> Result<Vec<String>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT g.name FROM album_genres ag \
             JOIN genres g ON g.id = ag.genre_id \
             WHERE ag.album_id = ? ORDER BY g.id",
        )
        .bind(album_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Get every genre name with its album count, most-tagged first
    pub async fn all_with_counts() -> Result<Vec<(String, i64)>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT g.name, COUNT(ag.album_id) AS album_count FROM genres g \
             LEFT JOIN album_genres ag ON ag.genre_id = g.id \
             GROUP BY g.id ORDER BY album_count DESC, g.name",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Get a genre id by name, inserting the genre if missing
    pub async fn get_or_create(name: &str) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        sqlx::query("INSERT OR IGNORE INTO genres (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT id FROM genres WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }

    /// Tag an album with a genre
    pub async fn tag_album(album_id: i64, genre_id: i64, is_primary: bool) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        sqlx::query(
            "INSERT OR IGNORE INTO album_genres (album_id, genre_id, is_primary) VALUES (?, ?, ?)",
        )
        .bind(album_id)
        .bind(genre_id)
        .bind(is_primary)
        .execute(pool)
        .await?;

        Ok(())
    }
}
