//! Pagination of the ranked ordering

use super::{CatalogSnapshot, ScoredAlbum};
use crate::models::Album;

const MIN_LIMIT: i64 = 1;
const MAX_LIMIT: i64 = 100;

/// An album as it appears in a returned page: the public record plus its
/// genre tags and like state, with every internal scoring field gone.
#[derive(Debug, Clone)]
pub struct RankedAlbum {
    pub album: Album,
    pub genres: Vec<String>,
    pub is_liked: bool,
}

/// One page of the ranked listing
#[derive(Debug)]
pub struct AlbumPage {
    pub albums: Vec<RankedAlbum>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Slice the ranked ordering into a page.
///
/// Invalid pagination input is clamped, never rejected: offset floors at 0,
/// limit is clamped to [1, 100]. An offset past the end yields an empty
/// page.
pub fn paginate(
    scored: Vec<ScoredAlbum>,
    snapshot: &CatalogSnapshot,
    limit: i64,
    offset: i64,
) -> AlbumPage {
    let total = scored.len() as i64;
    let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let offset = offset.max(0);

    let albums: Vec<RankedAlbum> = scored
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(|s| RankedAlbum {
            genres: snapshot.genres_of(s.album.id).to_vec(),
            is_liked: snapshot.liked_albums.contains(&s.album.id),
            album: s.album,
        })
        .collect();

    AlbumPage {
        albums,
        total,
        limit,
        offset,
        has_more: offset + limit < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn album(id: i64) -> Album {
        Album {
            id,
            title: format!("Album {}", id),
            artist_id: 1,
            artist_name: "Artist".into(),
            rank: None,
            rating: None,
            ratings_count: None,
            release_date: None,
            image_path: None,
            spotify_link: None,
            youtube_link: None,
            apple_music_link: None,
        }
    }

    fn scored(n: i64) -> Vec<ScoredAlbum> {
        (1..=n)
            .map(|id| ScoredAlbum {
                album: album(id),
                score: (n - id) as f64,
            })
            .collect()
    }

    #[test]
    fn test_first_page() {
        let snapshot = CatalogSnapshot::default();
        let page = paginate(scored(5), &snapshot, 2, 0);

        let ids: Vec<i64> = page.albums.iter().map(|a| a.album.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.total, 5);
        assert!(page.has_more);
    }

    #[test]
    fn test_last_partial_page() {
        let snapshot = CatalogSnapshot::default();
        let page = paginate(scored(5), &snapshot, 2, 4);

        let ids: Vec<i64> = page.albums.iter().map(|a| a.album.id).collect();
        assert_eq!(ids, vec![5]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let snapshot = CatalogSnapshot::default();
        let page = paginate(scored(3), &snapshot, 10, 50);

        assert!(page.albums.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_pagination_input_is_clamped() {
        let snapshot = CatalogSnapshot::default();

        let page = paginate(scored(5), &snapshot, 0, -3);
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);
        assert_eq!(page.albums.len(), 1);

        let page = paginate(scored(5), &snapshot, 1000, 0);
        assert_eq!(page.limit, 100);
        assert_eq!(page.albums.len(), 5);
    }

    #[test]
    fn test_page_matches_full_order_slice() {
        let snapshot = CatalogSnapshot::default();
        let all = scored(9);
        let expected: Vec<i64> = all.iter().skip(3).take(4).map(|s| s.album.id).collect();

        let page = paginate(all, &snapshot, 4, 3);
        let ids: Vec<i64> = page.albums.iter().map(|a| a.album.id).collect();
        assert_eq!(ids, expected);
        assert!(page.albums.len() <= 4);
    }

    #[test]
    fn test_like_state_and_genres_attached() {
        let snapshot = CatalogSnapshot {
            genres_by_album: [(1, vec!["Rock".to_string()])].into_iter().collect(),
            liked_albums: HashSet::from([2]),
            ..Default::default()
        };

        let page = paginate(scored(2), &snapshot, 10, 0);

        assert_eq!(page.albums[0].genres, vec!["Rock".to_string()]);
        assert!(!page.albums[0].is_liked);
        assert!(page.albums[1].genres.is_empty());
        assert!(page.albums[1].is_liked);
    }
}
