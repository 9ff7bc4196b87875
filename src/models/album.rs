//! Album model

use serde::{Deserialize, Serialize};

/// An album from the scraped charts, joined with its artist's display name.
///
/// Rank, rating, ratings count, release date and artwork all come from the
/// scraper and may be missing for any given record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Database ID
    #[serde(default)]
    pub id: i64,
    /// Album title
    pub title: String,
    /// Owning artist ID
    pub artist_id: i64,
    /// Artist display name (joined from the artists table)
    #[serde(default)]
    pub artist_name: String,
    /// Chart position, lower is more acclaimed
    pub rank: Option<i64>,
    /// Average rating, 0 to 5
    pub rating: Option<f64>,
    /// Raw ratings count as scraped, may contain thousands separators
    pub ratings_count: Option<String>,
    /// Release date string, first 4 chars are the year
    pub release_date: Option<String>,
    /// Cover art path as stored (e.g. "covers/foo.jpg")
    pub image_path: Option<String>,
    pub spotify_link: Option<String>,
    pub youtube_link: Option<String>,
    pub apple_music_link: Option<String>,
}

impl Album {
    /// Release year parsed from the first 4 characters of the release date
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        date.get(..4)?.parse().ok()
    }

    /// Cover art URL under the static /covers mount.
    ///
    /// Stored paths may or may not carry a "covers/" prefix; either way the
    /// served path is "/covers/<filename>".
    pub fn display_image(&self) -> Option<String> {
        let path = self.image_path.as_deref()?;
        let file = path.strip_prefix("covers/").unwrap_or(path);
        Some(format!("/covers/{}", file))
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Album {}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> Album {
        Album {
            id: 1,
            title: "Loveless".into(),
            artist_id: 1,
            artist_name: "My Bloody Valentine".into(),
            rank: Some(12),
            rating: Some(4.3),
            ratings_count: Some("41,236".into()),
            release_date: Some("1991-11-04".into()),
            image_path: Some("covers/loveless.jpg".into()),
            spotify_link: None,
            youtube_link: None,
            apple_music_link: None,
        }
    }

    #[test]
    fn test_release_year() {
        let mut a = album();
        assert_eq!(a.release_year(), Some(1991));

        a.release_date = Some("19".into());
        assert_eq!(a.release_year(), None);

        a.release_date = None;
        assert_eq!(a.release_year(), None);
    }

    #[test]
    fn test_display_image_strips_prefix() {
        let mut a = album();
        assert_eq!(a.display_image().as_deref(), Some("/covers/loveless.jpg"));

        a.image_path = Some("loveless.jpg".into());
        assert_eq!(a.display_image().as_deref(), Some("/covers/loveless.jpg"));

        a.image_path = None;
        assert_eq!(a.display_image(), None);
    }
}
