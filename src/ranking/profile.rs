//! Preference profile derived from a user's likes

use std::collections::{HashMap, HashSet};

/// A user's taste, derived fresh per request from their liked albums.
///
/// The histogram counts liked albums per genre tag; an album with three
/// tags contributes 1 to each of the three, with no normalization.
#[derive(Debug, Default)]
pub struct PreferenceProfile {
    /// genre name -> number of liked albums carrying that tag
    pub genre_counts: HashMap<String, i64>,
    /// artists owning at least one liked album
    pub artist_ids: HashSet<i64>,
}

impl PreferenceProfile {
    pub fn build(
        liked_albums: &HashSet<i64>,
        genres_by_album: &HashMap<i64, Vec<String>>,
        artist_ids: HashSet<i64>,
    ) -> Self {
        let mut genre_counts: HashMap<String, i64> = HashMap::new();

        for album_id in liked_albums {
            if let Some(genres) = genres_by_album.get(album_id) {
                for genre in genres {
                    *genre_counts.entry(genre.clone()).or_insert(0) += 1;
                }
            }
        }

        Self {
            genre_counts,
            artist_ids,
        }
    }

    /// Liked-album count for one genre; 0 when the genre is unseen
    pub fn genre_count(&self, genre: &str) -> i64 {
        self.genre_counts.get(genre).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(entries: &[(i64, &[&str])]) -> HashMap<i64, Vec<String>> {
        entries
            .iter()
            .map(|(id, names)| (*id, names.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_histogram_counts_each_tag_once_per_album() {
        let map = genres(&[
            (1, &["Rock"]),
            (2, &["Rock", "Jazz", "Ambient"]),
            (3, &["Jazz"]),
        ]);
        let liked: HashSet<i64> = [1, 2].into_iter().collect();

        let profile = PreferenceProfile::build(&liked, &map, HashSet::new());

        assert_eq!(profile.genre_count("Rock"), 2);
        assert_eq!(profile.genre_count("Jazz"), 1);
        assert_eq!(profile.genre_count("Ambient"), 1);
        assert_eq!(profile.genre_count("Folk"), 0);
    }

    #[test]
    fn test_single_like_scenario() {
        // user liked only album A tagged Rock
        let map = genres(&[(1, &["Rock"]), (2, &["Rock", "Jazz"]), (3, &["Jazz"])]);
        let liked: HashSet<i64> = [1].into_iter().collect();

        let profile = PreferenceProfile::build(&liked, &map, [10].into_iter().collect());

        assert_eq!(profile.genre_counts.len(), 1);
        assert_eq!(profile.genre_count("Rock"), 1);
        assert!(profile.artist_ids.contains(&10));
    }

    #[test]
    fn test_empty_profile() {
        let map = genres(&[(1, &["Rock"])]);
        let profile = PreferenceProfile::build(&HashSet::new(), &map, HashSet::new());

        assert!(profile.genre_counts.is_empty());
        assert!(profile.artist_ids.is_empty());
    }
}
