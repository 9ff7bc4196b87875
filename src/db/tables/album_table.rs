//! Album table operations

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::Album;

/// Database row for the albums table joined with the artist name
#[derive(Debug, FromRow)]
struct AlbumRow {
    id: i64,
    title: String,
    artist_id: i64,
    artist_name: String,
    rank: Option<i64>,
    rating: Option<f64>,
    ratings_count: Option<String>,
    release_date: Option<String>,
    image_path: Option<String>,
    spotify_link: Option<String>,
    youtube_link: Option<String>,
    apple_music_link: Option<String>,
}

impl AlbumRow {
    fn into_album(self) -> Album {
        Album {
            id: self.id,
            title: self.title,
            artist_id: self.artist_id,
            artist_name: self.artist_name,
            rank: self.rank,
            rating: self.rating,
            ratings_count: self.ratings_count,
            release_date: self.release_date,
            image_path: self.image_path,
            spotify_link: self.spotify_link,
            youtube_link: self.youtube_link,
            apple_music_link: self.apple_music_link,
        }
    }
}

const SELECT_JOINED: &str = r#"
    SELECT a.id, a.title, a.artist_id, ar.name AS artist_name,
           a.rank, a.rating, a.ratings_count, a.release_date, a.image_path,
           a.spotify_link, a.youtube_link, a.apple_music_link
    FROM albums a
    JOIN artists ar ON a.artist_id = ar.id
"#;

/// Album table operations
pub struct AlbumTable;

impl AlbumTable {
    /// Get all albums with artist names, optionally filtered to one genre.
    ///
    /// Ordered by album id so repeated reads of an unchanged catalog return
    /// rows in the same order.
    pub async fn all(genre: Option<&str>) -> Result<Vec<Album>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<AlbumRow> = if let Some(genre) = genre {
            let query = format!(
                "{} JOIN album_genres ag ON ag.album_id = a.id \
                 JOIN genres g ON g.id = ag.genre_id \
                 WHERE g.name = ? ORDER BY a.id",
                SELECT_JOINED
            );
            sqlx::query_as(&query).bind(genre).fetch_all(pool).await?
        } else {
            let query = format!("{} ORDER BY a.id", SELECT_JOINED);
            sqlx::query_as(&query).fetch_all(pool).await?
        };

        Ok(rows.into_iter().map(|r| r.into_album()).collect())
    }

    /// Get an album by id
    pub async fn get_by_id(id: i64) -> Result<Option<Album>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let query = format!("{} WHERE a.id = ?", SELECT_JOINED);
        let row: Option<AlbumRow> = sqlx::query_as(&query).bind(id).fetch_optional(pool).await?;

        Ok(row.map(|r| r.into_album()))
    }

    /// Get all albums by an artist
    pub async fn get_by_artist(artist_id: i64) -> Result<Vec<Album>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let query = format!("{} WHERE a.artist_id = ? ORDER BY a.rank", SELECT_JOINED);
        let rows: Vec<AlbumRow> = sqlx::query_as(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_album()).collect())
    }

    /// Insert an album, returning its id
    pub async fn insert(album: &Album) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let result = sqlx::query(
            "INSERT INTO albums (title, artist_id, rank, rating, ratings_count, release_date, \
             image_path, spotify_link, youtube_link, apple_music_link) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&album.title)
        .bind(album.artist_id)
        .bind(album.rank)
        .bind(album.rating)
        .bind(&album.ratings_count)
        .bind(&album.release_date)
        .bind(&album.image_path)
        .bind(&album.spotify_link)
        .bind(&album.youtube_link)
        .bind(&album.apple_music_link)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
