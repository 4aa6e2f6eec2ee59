//! HTTP client wrapper - builds archive API requests and parses responses

use serde::de::DeserializeOwned;

use crate::constants::{DEFAULT_API_BASE, DEFAULT_PAGE_LIMIT};
use crate::messages::NetworkResponse;
use crate::models::{Genre, Page, Track};

/// Archive API configuration, passed explicitly to the network actor
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: String::from(DEFAULT_API_BASE),
            api_key: None,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Build a config from the environment
    ///
    /// `MINSTREL_API_BASE` overrides the archive base URL, `MINSTREL_API_KEY`
    /// supplies the key the archive hands out for API access.
    pub fn from_env() -> Self {
        let mut config = ApiConfig::default();
        if let Ok(base) = std::env::var("MINSTREL_API_BASE") {
            if !base.is_empty() {
                config.base_url = base;
            }
        }
        if let Ok(key) = std::env::var("MINSTREL_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        config
    }

    /// URL for one page of tracks in a genre
    pub fn tracks_url(&self, genre_id: u64, page: u32) -> String {
        let mut url = format!(
            "{}/tracks.json?genre_id={}&page={}&limit={}",
            self.base_url.trim_end_matches('/'),
            genre_id,
            page,
            self.page_limit
        );
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&api_key={}", key));
        }
        url
    }

    /// URL for the genre catalog
    pub fn genres_url(&self) -> String {
        let mut url = format!("{}/genres.json", self.base_url.trim_end_matches('/'));
        if let Some(key) = &self.api_key {
            url.push_str(&format!("?api_key={}", key));
        }
        url
    }
}

/// Fetch the genre catalog
pub async fn fetch_genres(
    client: &reqwest::Client,
    config: &ApiConfig,
    request_id: u64,
) -> NetworkResponse {
    match fetch_envelope::<Genre>(client, &config.genres_url()).await {
        Ok((status, page)) => NetworkResponse::Genres {
            id: request_id,
            status,
            genres: page.map(|p| p.items),
        },
        Err(message) => NetworkResponse::Error {
            id: request_id,
            status: None,
            message,
        },
    }
}

/// Fetch one page of tracks for a genre
pub async fn fetch_tracks_page(
    client: &reqwest::Client,
    config: &ApiConfig,
    request_id: u64,
    genre_id: u64,
    page: u32,
) -> NetworkResponse {
    match fetch_envelope::<Track>(client, &config.tracks_url(genre_id, page)).await {
        Ok((status, page)) => NetworkResponse::TracksPage {
            id: request_id,
            status,
            page,
        },
        Err(message) => NetworkResponse::Error {
            id: request_id,
            status: None,
            message,
        },
    }
}

/// Execute a GET and parse the archive envelope
///
/// An HTTP completion always yields the status; the payload is `None` when the
/// status is non-2xx or the body does not parse, which callers treat the same
/// as an explicit error. Transport failures yield a message only.
async fn fetch_envelope<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<(u16, Option<Page<T>>), String> {
    let resp = client.get(url).send().await.map_err(describe_error)?;
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(|e| format!("Error reading body: {}", e))?;

    if !(200..300).contains(&status) {
        return Ok((status, None));
    }
    let page = serde_json::from_str::<Page<T>>(&body).ok();
    Ok((status, page))
}

fn describe_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        String::from("Request timed out (30s)")
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_url_carries_paging_params() {
        let config = ApiConfig {
            base_url: String::from("https://archive.example/api/get/"),
            api_key: Some(String::from("k123")),
            page_limit: 20,
        };
        assert_eq!(
            config.tracks_url(7, 3),
            "https://archive.example/api/get/tracks.json?genre_id=7&page=3&limit=20&api_key=k123"
        );
    }

    #[test]
    fn test_genres_url_without_key() {
        let config = ApiConfig {
            base_url: String::from("https://archive.example/api/get"),
            api_key: None,
            page_limit: 20,
        };
        assert_eq!(config.genres_url(), "https://archive.example/api/get/genres.json");
    }
}
