//! Network messages - communication between App and Network layers

use crate::models::{Genre, Page, Track};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the genre catalog
    FetchGenres {
        id: u64,
    },
    /// Fetch one page of tracks for a genre
    FetchTracksPage {
        id: u64,
        genre_id: u64,
        page: u32,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
///
/// Exactly one response is sent per fetch command. An HTTP completion whose
/// body did not parse carries a `None` payload alongside the status; the App
/// layer treats that the same as an explicit error.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Genre catalog fetch completed
    Genres {
        id: u64,
        status: u16,
        genres: Option<Vec<Genre>>,
    },
    /// Track page fetch completed
    TracksPage {
        id: u64,
        status: u16,
        page: Option<Page<Track>>,
    },
    /// Fetch never reached an HTTP status (timeout, connection failure)
    Error {
        id: u64,
        status: Option<u16>,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Genres { id, .. } => *id,
            NetworkResponse::TracksPage { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_id() {
        let resp = NetworkResponse::Error {
            id: 42,
            status: Some(500),
            message: String::from("boom"),
        };
        assert_eq!(resp.id(), 42);

        let resp = NetworkResponse::TracksPage {
            id: 7,
            status: 200,
            page: None,
        };
        assert_eq!(resp.id(), 7);
    }
}
