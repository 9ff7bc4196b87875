//! Catalog snapshot loading

use std::collections::{HashMap, HashSet};

use super::RankingError;
use crate::db::{AlbumTable, GenreTable, LikeTable};
use crate::models::Album;

/// A read-only snapshot of the catalog and, when a user is known, their
/// likes. Rebuilt fresh per request; never mutated once loaded.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    /// Albums matching the active genre filter (or all), joined with
    /// artist names, in stable storage order
    pub albums: Vec<Album>,
    /// Genre tags for every album in the catalog, filter or not; affinity
    /// needs the tags of liked albums outside the filtered set
    pub genres_by_album: HashMap<i64, Vec<String>>,
    /// Album ids the requesting user has liked
    pub liked_albums: HashSet<i64>,
    /// Distinct artist ids among the liked albums
    pub liked_artists: HashSet<i64>,
    /// Count of albums matching the filter, before pagination
    pub total: i64,
}

impl CatalogSnapshot {
    /// Load a snapshot via independent read queries. Surfaces any read
    /// failure; never substitutes defaults for unreadable data.
    pub async fn load(user_id: Option<i64>, genre: Option<&str>) -> Result<Self, RankingError> {
        let albums = AlbumTable::all(genre).await?;
        let genres_by_album = GenreTable::tags_by_album().await?;
        let total = albums.len() as i64;

        let (liked_albums, liked_artists) = match user_id {
            Some(uid) => (
                LikeTable::album_ids_for_user(uid).await?,
                LikeTable::artist_ids_for_user(uid).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        Ok(Self {
            albums,
            genres_by_album,
            liked_albums,
            liked_artists,
            total,
        })
    }

    /// Genre tags for an album; empty for untagged albums
    pub fn genres_of(&self, album_id: i64) -> &[String] {
        self.genres_by_album
            .get(&album_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::init_test_db;
    use crate::db::{AlbumTable, ArtistTable, GenreTable, LikeTable, UserTable};
    use crate::models::User;

    async fn make_album(artist: &str, title: &str, genres: &[&str]) -> i64 {
        let artist_id = ArtistTable::get_or_create(artist).await.unwrap();
        let album = Album {
            id: 0,
            title: title.to_string(),
            artist_id,
            artist_name: artist.to_string(),
            rank: None,
            rating: None,
            ratings_count: None,
            release_date: None,
            image_path: None,
            spotify_link: None,
            youtube_link: None,
            apple_music_link: None,
        };
        let album_id = AlbumTable::insert(&album).await.unwrap();

        for (i, genre) in genres.iter().enumerate() {
            let genre_id = GenreTable::get_or_create(genre).await.unwrap();
            GenreTable::tag_album(album_id, genre_id, i == 0)
                .await
                .unwrap();
        }

        album_id
    }

    #[tokio::test]
    async fn test_genre_filter_scopes_albums_but_not_tags() {
        init_test_db().await;

        // genre names unique to this test so the shared db stays inert
        let tagged = make_album("Snapshot Artist", "Tagged", &["Snap Krautrock"]).await;
        let other = make_album("Snapshot Artist", "Other", &["Snap Zeuhl"]).await;

        let user_id = UserTable::insert(&User::new("snapshot-user".into(), "hash".into()))
            .await
            .unwrap();
        // the like falls outside the filtered set but must still load
        LikeTable::toggle(user_id, other).await.unwrap();

        let snapshot = CatalogSnapshot::load(Some(user_id), Some("Snap Krautrock"))
            .await
            .unwrap();

        let ids: Vec<i64> = snapshot.albums.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![tagged]);
        assert_eq!(snapshot.total, 1);

        assert_eq!(snapshot.genres_of(other), ["Snap Zeuhl".to_string()]);
        assert!(snapshot.liked_albums.contains(&other));
        assert_eq!(snapshot.liked_artists.len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_snapshot_has_no_likes() {
        init_test_db().await;

        make_album("Anon Artist", "Anon Album", &["Snap Anonwave"]).await;

        let snapshot = CatalogSnapshot::load(None, Some("Snap Anonwave"))
            .await
            .unwrap();

        assert_eq!(snapshot.albums.len(), 1);
        assert!(snapshot.liked_albums.is_empty());
        assert!(snapshot.liked_artists.is_empty());
    }
}
