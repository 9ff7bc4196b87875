//! Composite album scoring
//!
//! Each candidate gets base + personalization + exploration. Scores are
//! only meaningful relative to each other within one request; there is no
//! fixed output range.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::collections::HashSet;
use xxhash_rust::xxh3::xxh3_64;

use super::{CatalogSnapshot, PreferenceProfile};
use crate::models::Album;
use crate::utils::parsers::parse_ratings_count;

const BASE_SCALE: f64 = 30.0;
const RANK_CEILING: f64 = 10_000.0;
const POPULARITY_CEILING: f64 = 50_000.0;

const GENRE_AFFINITY_CAP: f64 = 20.0;
const ARTIST_BONUS: f64 = 10.0;
const COLLABORATIVE_BONUS: f64 = 8.0;
const LIKED_BONUS: f64 = 15.0;
const UNEXPLORED_CAP: f64 = 10.0;

/// An album paired with its internal score. The score never leaves the
/// ranking pipeline; the paginator strips it before the page is returned.
#[derive(Debug, Clone)]
pub struct ScoredAlbum {
    pub album: Album,
    pub score: f64,
}

/// Seed for the request-scoped exploration generator.
///
/// Stable for the same user and calendar day, different across days and
/// across users, so repeated requests within one day draw identical
/// exploration values.
pub fn daily_seed(user_id: Option<i64>, date: NaiveDate) -> u64 {
    let who = match user_id {
        Some(id) => id.to_string(),
        None => "anonymous".to_string(),
    };

    xxh3_64(format!("{}:{}", who, date).as_bytes())
}

/// Score every album in the snapshot and sort descending.
///
/// Albums are visited in snapshot order, which is stable storage order;
/// together with the daily seed this keeps exploration draws identical
/// across same-day requests over an unchanged catalog.
pub fn score_albums(
    snapshot: &CatalogSnapshot,
    profile: Option<&PreferenceProfile>,
    collaborative: &HashSet<i64>,
    seed: u64,
) -> Vec<ScoredAlbum> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scored: Vec<ScoredAlbum> = snapshot
        .albums
        .iter()
        .map(|album| {
            let genres = snapshot.genres_of(album.id);
            let mut score = base_score(album);

            match profile {
                Some(profile) => {
                    score += personalization_score(
                        album,
                        genres,
                        profile,
                        collaborative,
                        &snapshot.liked_albums,
                    );
                    score += unexplored_boost(genres, profile);
                    score += rng.gen_range(0.0..10.0);
                }
                None => {
                    score += rng.gen_range(0.0..20.0);
                }
            }

            ScoredAlbum {
                album: album.clone(),
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// Quality/popularity score, scaled to a ceiling of about 30 points.
fn base_score(album: &Album) -> f64 {
    let rank_score = match album.rank {
        Some(rank) => (1.0 - rank as f64 / RANK_CEILING).max(0.0),
        None => 0.0,
    };

    let rating_score = match album.rating {
        Some(rating) => rating / 5.0,
        None => 0.6,
    };

    // malformed or missing ratings counts contribute zero popularity
    let ratings_count = album
        .ratings_count
        .as_deref()
        .and_then(parse_ratings_count)
        .unwrap_or(0);
    let popularity_score = (ratings_count as f64 / POPULARITY_CEILING).min(1.0);

    BASE_SCALE * (0.5 * rank_score + 0.3 * rating_score + 0.2 * popularity_score)
}

/// Personal taste score; zero without a known user.
///
/// The genre term is capped at 20; the flat bonuses are additive on top.
/// The collaborative boost never double-counts an already-liked album.
fn personalization_score(
    album: &Album,
    genres: &[String],
    profile: &PreferenceProfile,
    collaborative: &HashSet<i64>,
    liked_albums: &HashSet<i64>,
) -> f64 {
    let genre_matches: i64 = genres.iter().map(|g| profile.genre_count(g)).sum();
    let mut score = ((3 * genre_matches) as f64).min(GENRE_AFFINITY_CAP);

    if profile.artist_ids.contains(&album.artist_id) {
        score += ARTIST_BONUS;
    }

    let is_liked = liked_albums.contains(&album.id);
    if collaborative.contains(&album.id) && !is_liked {
        score += COLLABORATIVE_BONUS;
    }
    if is_liked {
        score += LIKED_BONUS;
    }

    score
}

/// Boost for genres the user has barely touched (fewer than 2 likes,
/// including none), capped at 10.
fn unexplored_boost(genres: &[String], profile: &PreferenceProfile) -> f64 {
    let fresh = genres.iter().filter(|g| profile.genre_count(g) < 2).count();

    ((3 * fresh) as f64).min(UNEXPLORED_CAP)
}
