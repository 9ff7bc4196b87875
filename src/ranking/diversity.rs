//! Diversity re-ranking
//!
//! A single greedy pass over the score-descending order that penalizes
//! artists and genres already seen among higher-ranked albums, followed by
//! one re-sort. Penalties depend on traversal order, which itself comes
//! from the pre-diversity scores; this order-dependence is an accepted
//! approximation, not a global optimum.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{CatalogSnapshot, ScoredAlbum};

const ARTIST_REPEAT_WEIGHT: f64 = 2.0;
const GENRE_REPEAT_WEIGHT: f64 = 0.5;
const PENALTY_SCALE: f64 = 0.1;

/// Subtract repetition penalties in place, then re-sort descending.
///
/// Scores only ever decrease here; an album with unseen artist and genres
/// is left untouched.
pub fn apply_diversity(scored: &mut [ScoredAlbum], snapshot: &CatalogSnapshot) {
    let mut artist_seen: HashMap<i64, i64> = HashMap::new();
    let mut genre_seen: HashMap<&str, i64> = HashMap::new();

    for item in scored.iter_mut() {
        let genres = snapshot.genres_of(item.album.id);

        let artist_penalty = ARTIST_REPEAT_WEIGHT
            * artist_seen.get(&item.album.artist_id).copied().unwrap_or(0) as f64;
        let genre_penalty = GENRE_REPEAT_WEIGHT
            * genres
                .iter()
                .map(|g| genre_seen.get(g.as_str()).copied().unwrap_or(0) as f64)
                .sum::<f64>();

        item.score -= PENALTY_SCALE * (artist_penalty + genre_penalty);

        // count this album's artist and genres regardless of the penalty
        // just applied
        *artist_seen.entry(item.album.artist_id).or_insert(0) += 1;
        for genre in genres {
            *genre_seen.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
