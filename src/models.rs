use serde::{Deserialize, Serialize};

/// A genre category used to select which tracks to fetch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "genre_id")]
    pub id: u64,
    #[serde(rename = "genre_title")]
    pub title: String,
    #[serde(rename = "genre_handle", default)]
    pub handle: Option<String>,
    #[serde(rename = "genre_parent_id", default)]
    pub parent_id: Option<u64>,
}

/// A single track as returned by the archive API
///
/// Server-provided order is preserved by the loader; no uniqueness is assumed.
/// The `qualifier` tag is attached after fetch and only interpreted by the
/// rendering layer (icon style).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "track_id")]
    pub id: u64,
    #[serde(rename = "track_title")]
    pub title: String,
    #[serde(rename = "artist_name")]
    pub artist: String,
    #[serde(rename = "album_title", default)]
    pub album: Option<String>,
    /// Duration in seconds
    #[serde(rename = "track_duration", default)]
    pub duration: Option<u32>,
    #[serde(rename = "track_url", default)]
    pub url: Option<String>,
    #[serde(rename = "track_image_file", default)]
    pub image: Option<String>,
    #[serde(skip)]
    pub qualifier: Option<String>,
}

impl Track {
    #[cfg(test)]
    pub fn stub(id: u64, title: impl Into<String>) -> Self {
        Track {
            id,
            title: title.into(),
            artist: String::from("test artist"),
            album: None,
            duration: None,
            url: None,
            image: None,
            qualifier: None,
        }
    }
}

/// One fetched batch: the API envelope around an ordered dataset
///
/// `total_pages` hints whether more pages may exist, but the loader only ever
/// relies on the page number it asked for.
#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(rename = "dataset")]
    pub items: Vec<T>,
}

/// Tag every track in a batch with a display qualifier, in place
///
/// Called on each batch before it is shown; earlier batches keep whatever tag
/// they already carry.
pub fn set_collection_qualifier(items: &mut [Track], qualifier: &str) {
    for item in items.iter_mut() {
        item.qualifier = Some(qualifier.to_string());
    }
}

/// Recently-played entry persisted by [`crate::storage::Storage`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayEntry {
    pub track_id: u64,
    pub title: String,
    pub artist: String,
    pub played_at: chrono::DateTime<chrono::Utc>,
}

impl PlayEntry {
    pub fn from_track(track: &Track) -> Self {
        PlayEntry {
            track_id: track.id,
            title: track.title.clone(),
            artist: track.artist.clone(),
            played_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks_envelope() {
        let body = r#"{
            "page": 1,
            "total_pages": 12,
            "limit": 20,
            "dataset": [
                {"track_id": 7, "track_title": "Night Owl", "artist_name": "Broke For Free",
                 "album_title": "Directionless EP", "track_duration": 205,
                 "track_url": "https://archive.example/track/7"},
                {"track_id": 9, "track_title": "Tabulasa", "artist_name": "Broke For Free"}
            ]
        }"#;
        let page: Page<Track> = serde_json::from_str(body).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, Some(12));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Night Owl");
        assert_eq!(page.items[0].duration, Some(205));
        assert_eq!(page.items[1].album, None);
        // Tag is local state, never part of the wire format
        assert_eq!(page.items[0].qualifier, None);
    }

    #[test]
    fn test_parse_genres_envelope() {
        let body = r#"{
            "page": 1,
            "dataset": [
                {"genre_id": 3, "genre_title": "Jazz", "genre_handle": "Jazz"},
                {"genre_id": 5, "genre_title": "Rock", "genre_parent_id": 1}
            ]
        }"#;
        let page: Page<Genre> = serde_json::from_str(body).unwrap();
        assert_eq!(page.items[0].title, "Jazz");
        assert_eq!(page.items[1].parent_id, Some(1));
    }

    #[test]
    fn test_qualifier_tags_only_given_batch() {
        let mut first = vec![Track::stub(1, "a"), Track::stub(2, "b")];
        set_collection_qualifier(&mut first, "TRACK_WITH_ICON");
        assert!(first.iter().all(|t| t.qualifier.as_deref() == Some("TRACK_WITH_ICON")));

        let mut second = vec![Track::stub(3, "c")];
        set_collection_qualifier(&mut second, "OTHER");
        // The earlier batch keeps its tag
        assert_eq!(first[0].qualifier.as_deref(), Some("TRACK_WITH_ICON"));
        assert_eq!(second[0].qualifier.as_deref(), Some("OTHER"));
    }
}
