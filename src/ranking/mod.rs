//! Personalized album ranking
//!
//! The listing endpoint's pipeline: load a catalog snapshot, derive the
//! user's preference profile and collaborative signal from it, score every
//! candidate album, re-rank for diversity, then paginate.
//!
//! All derived state is rebuilt per request from the snapshot; nothing here
//! caches across requests.

mod collaborative;
mod diversity;
mod paginate;
mod profile;
mod scoring;
mod snapshot;

pub use collaborative::collaborative_set;
pub use diversity::apply_diversity;
pub use paginate::{paginate, AlbumPage, RankedAlbum};
pub use profile::PreferenceProfile;
pub use scoring::{daily_seed, score_albums, ScoredAlbum};
pub use snapshot::CatalogSnapshot;

use std::collections::HashSet;
use thiserror::Error;

/// Ranking pipeline failure.
///
/// Only unreadable data fails a request; malformed fields inside the data
/// are recovered locally during scoring.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("catalog read failed: {0}")]
    DataAccess(#[from] anyhow::Error),
}

/// Produce one page of the personalized album listing.
///
/// `limit` and `offset` are clamped, never rejected. When a genre filter is
/// active the diversity pass is skipped; a single-genre listing is expected
/// to cluster.
pub async fn rank_albums(
    user_id: Option<i64>,
    genre: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<AlbumPage, RankingError> {
    let snapshot = CatalogSnapshot::load(user_id, genre).await?;

    let profile = user_id.map(|_| {
        PreferenceProfile::build(
            &snapshot.liked_albums,
            &snapshot.genres_by_album,
            snapshot.liked_artists.clone(),
        )
    });

    let collaborative = match user_id {
        Some(uid) => collaborative_set(uid, &snapshot.liked_albums).await?,
        None => HashSet::new(),
    };

    let seed = daily_seed(user_id, chrono::Utc::now().date_naive());
    let mut scored = score_albums(&snapshot, profile.as_ref(), &collaborative, seed);

    if genre.is_none() {
        apply_diversity(&mut scored, &snapshot);
    }

    Ok(paginate(scored, &snapshot, limit, offset))
}
