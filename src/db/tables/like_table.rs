//! Like table operations

use anyhow::Result;
use std::collections::HashSet;

use crate::db::DbEngine;

/// Like table operations
pub struct LikeTable;

impl LikeTable {
    /// Toggle a like; returns true when the album is now liked
    pub async fn toggle(user_id: i64, album_id: i64) -> Result<bool> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = ? AND album_id = ?")
            .bind(user_id)
            .bind(album_id)
            .execute(pool)
            .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        let timestamp = chrono::Utc::now().timestamp();
        sqlx::query("INSERT INTO likes (user_id, album_id, timestamp) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(album_id)
            .bind(timestamp)
            .execute(pool)
            .await?;

        Ok(true)
    }

    /// Check whether a user likes an album
    pub async fn exists(user_id: i64, album_id: i64) -> Result<bool> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM likes WHERE user_id = ? AND album_id = ?")
                .bind(user_id)
                .bind(album_id)
                .fetch_one(pool)
                .await?;

        Ok(row.0 > 0)
    }

    /// Get the set of album ids a user has liked
    pub async fn album_ids_for_user(user_id: i64) -> Result<HashSet<i64>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<(i64,)> = sqlx::query_as("SELECT album_id FROM likes WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Get the distinct artist ids among a user's liked albums
    pub async fn artist_ids_for_user(user_id: i64) -> Result<HashSet<i64>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT DISTINCT a.artist_id FROM likes l \
             JOIN albums a ON a.id = l.album_id \
             WHERE l.user_id = ?",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Find users sharing at least `min_shared` of the given liked albums,
    /// excluding `user_id` itself, ranked by shared-like count and capped
    /// to `cap` users.
    pub async fn neighbors_sharing(
        user_id: i64,
        liked: &[i64],
        min_shared: i64,
        cap: i64,
    ) -> Result<Vec<i64>> {
        if liked.is_empty() {
            return Ok(Vec::new());
        }

        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let placeholders = vec!["?"; liked.len()].join(", ");
        let query = format!(
            "SELECT user_id FROM likes \
             WHERE album_id IN ({}) AND user_id != ? \
             GROUP BY user_id \
             HAVING COUNT(album_id) >= ? \
             ORDER BY COUNT(album_id) DESC \
             LIMIT ?",
            placeholders
        );

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        for &album_id in liked {
            q = q.bind(album_id);
        }
        q = q.bind(user_id).bind(min_shared).bind(cap);

        let rows = q.fetch_all(pool).await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Get the union of album ids liked by any of the given users
    pub async fn album_ids_for_users(user_ids: &[i64]) -> Result<HashSet<i64>> {
        if user_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let query = format!(
            "SELECT DISTINCT album_id FROM likes WHERE user_id IN ({})",
            placeholders
        );

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        for &user_id in user_ids {
            q = q.bind(user_id);
        }

        let rows = q.fetch_all(pool).await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::init_test_db;
    use crate::db::{AlbumTable, ArtistTable, UserTable};
    use crate::models::{Album, User};

    #[tokio::test]
    async fn test_toggle_roundtrip() {
        init_test_db().await;

        let user_id = UserTable::insert(&User::new("like-toggler".into(), "hash".into()))
            .await
            .unwrap();
        let artist_id = ArtistTable::get_or_create("Like Artist").await.unwrap();
        let album_id = AlbumTable::insert(&Album {
            id: 0,
            title: "Toggled".into(),
            artist_id,
            artist_name: "Like Artist".into(),
            rank: None,
            rating: None,
            ratings_count: None,
            release_date: None,
            image_path: None,
            spotify_link: None,
            youtube_link: None,
            apple_music_link: None,
        })
        .await
        .unwrap();

        assert!(!LikeTable::exists(user_id, album_id).await.unwrap());

        assert!(LikeTable::toggle(user_id, album_id).await.unwrap());
        assert!(LikeTable::exists(user_id, album_id).await.unwrap());
        assert!(LikeTable::album_ids_for_user(user_id)
            .await
            .unwrap()
            .contains(&album_id));
        assert!(LikeTable::artist_ids_for_user(user_id)
            .await
            .unwrap()
            .contains(&artist_id));

        assert!(!LikeTable::toggle(user_id, album_id).await.unwrap());
        assert!(!LikeTable::exists(user_id, album_id).await.unwrap());
    }
}
