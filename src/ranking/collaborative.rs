//! Collaborative signal from like-overlapping users

use std::collections::HashSet;

use super::RankingError;
use crate::db::LikeTable;

/// A neighbor must share at least this many liked albums with the user
const MIN_SHARED_LIKES: i64 = 2;
/// At most this many neighbors contribute, ranked by shared-like count
const MAX_NEIGHBORS: i64 = 10;

/// Union of album ids liked by the user's closest neighbors.
///
/// Neighbors are other users sharing at least 2 liked albums, ranked by
/// overlap and capped to the top 10; ties rank in storage order. Their
/// entire like history feeds the union, not just the shared albums.
/// Empty when the user has no likes or no qualifying neighbor exists.
pub async fn collaborative_set(
    user_id: i64,
    liked: &HashSet<i64>,
) -> Result<HashSet<i64>, RankingError> {
    if liked.is_empty() {
        return Ok(HashSet::new());
    }

    let liked_ids: Vec<i64> = liked.iter().copied().collect();
    let neighbors =
        LikeTable::neighbors_sharing(user_id, &liked_ids, MIN_SHARED_LIKES, MAX_NEIGHBORS).await?;

    if neighbors.is_empty() {
        return Ok(HashSet::new());
    }

    Ok(LikeTable::album_ids_for_users(&neighbors).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::init_test_db;
    use crate::db::{AlbumTable, ArtistTable, LikeTable, UserTable};
    use crate::models::{Album, User};

    async fn make_user(name: &str) -> i64 {
        let user = User::new(name.to_string(), "hash".to_string());
        UserTable::insert(&user).await.unwrap()
    }

    async fn make_album(artist_name: &str, title: &str) -> i64 {
        let artist_id = ArtistTable::get_or_create(artist_name).await.unwrap();
        let album = Album {
            id: 0,
            title: title.to_string(),
            artist_id,
            artist_name: artist_name.to_string(),
            rank: None,
            rating: None,
            ratings_count: None,
            release_date: None,
            image_path: None,
            spotify_link: None,
            youtube_link: None,
            apple_music_link: None,
        };
        AlbumTable::insert(&album).await.unwrap()
    }

    async fn like(user_id: i64, album_id: i64) {
        assert!(LikeTable::toggle(user_id, album_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_collaborative_set_unions_neighbor_histories() {
        init_test_db().await;

        let target = make_user("collab-target").await;
        let close = make_user("collab-close").await;
        let distant = make_user("collab-distant").await;

        let shared_a = make_album("Collab Artist", "Shared A").await;
        let shared_b = make_album("Collab Artist", "Shared B").await;
        let close_extra = make_album("Collab Artist", "Close Extra").await;
        let distant_extra = make_album("Collab Artist", "Distant Extra").await;

        like(target, shared_a).await;
        like(target, shared_b).await;

        // close shares 2 likes and qualifies; their whole history counts
        like(close, shared_a).await;
        like(close, shared_b).await;
        like(close, close_extra).await;

        // distant shares only 1 like and is excluded entirely
        like(distant, shared_a).await;
        like(distant, distant_extra).await;

        let liked = LikeTable::album_ids_for_user(target).await.unwrap();
        let set = collaborative_set(target, &liked).await.unwrap();

        assert!(set.contains(&close_extra));
        assert!(set.contains(&shared_a));
        assert!(!set.contains(&distant_extra));
    }

    #[tokio::test]
    async fn test_collaborative_set_empty_without_likes() {
        init_test_db().await;

        let loner = make_user("collab-loner").await;
        let liked = LikeTable::album_ids_for_user(loner).await.unwrap();

        let set = collaborative_set(loner, &liked).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_neighbor_query_excludes_self_and_caps_at_10() {
        init_test_db().await;

        let target = make_user("collab-cap-target").await;
        let a = make_album("Cap Artist", "Cap A").await;
        let b = make_album("Cap Artist", "Cap B").await;

        like(target, a).await;
        like(target, b).await;

        for i in 0..12 {
            let neighbor = make_user(&format!("collab-cap-{}", i)).await;
            like(neighbor, a).await;
            like(neighbor, b).await;
        }

        let neighbors = LikeTable::neighbors_sharing(target, &[a, b], 2, 10)
            .await
            .unwrap();

        assert_eq!(neighbors.len(), 10);
        assert!(!neighbors.contains(&target));
    }
}
