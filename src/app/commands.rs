//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::Screen;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::PlayEntry;

/// Track cards per grid row on the tracks screen
pub const GRID_COLUMNS: usize = 2;

impl AppState {
    // ========================
    // Genre catalog
    // ========================

    /// Issue the startup genre-catalog fetch
    pub fn fetch_genres(&mut self) -> Option<NetworkCommand> {
        if self.pending_genres_id.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_genres_id = Some(id);
        self.genres_loading = true;
        Some(NetworkCommand::FetchGenres { id })
    }

    // ========================
    // Selection movement
    // ========================

    pub fn move_up(&mut self) -> Option<NetworkCommand> {
        match self.screen {
            Screen::Genres => {
                if !self.genres.is_empty() {
                    self.selected_genre = self
                        .selected_genre
                        .checked_sub(1)
                        .unwrap_or(self.genres.len() - 1);
                }
                None
            }
            Screen::Tracks => {
                self.selected_track = self.selected_track.saturating_sub(GRID_COLUMNS);
                self.maybe_load_more()
            }
            Screen::Player => None,
        }
    }

    pub fn move_down(&mut self) -> Option<NetworkCommand> {
        match self.screen {
            Screen::Genres => {
                if !self.genres.is_empty() {
                    self.selected_genre = (self.selected_genre + 1) % self.genres.len();
                }
                None
            }
            Screen::Tracks => {
                let len = self.track_count();
                if len > 0 {
                    self.selected_track = (self.selected_track + GRID_COLUMNS).min(len - 1);
                }
                self.maybe_load_more()
            }
            Screen::Player => None,
        }
    }

    pub fn move_left(&mut self) -> Option<NetworkCommand> {
        if self.screen == Screen::Tracks && self.selected_track % GRID_COLUMNS != 0 {
            self.selected_track -= 1;
        }
        None
    }

    pub fn move_right(&mut self) -> Option<NetworkCommand> {
        if self.screen == Screen::Tracks
            && self.selected_track % GRID_COLUMNS == 0
            && self.selected_track + 1 < self.track_count()
        {
            self.selected_track += 1;
        }
        self.maybe_load_more()
    }

    fn track_count(&self) -> usize {
        self.pager.as_ref().map(|p| p.items().len()).unwrap_or(0)
    }

    // ========================
    // Navigation
    // ========================

    /// Enter on the current selection
    pub fn select(&mut self) -> Option<NetworkCommand> {
        match self.screen {
            Screen::Genres => self.open_tracks(),
            Screen::Tracks => {
                self.open_player();
                None
            }
            Screen::Player => None,
        }
    }

    /// Walk one screen back; leaving the tracks screen tears the pager down
    pub fn back(&mut self) {
        match self.screen {
            Screen::Player => {
                self.player_index = None;
                self.screen = Screen::Tracks;
            }
            Screen::Tracks => {
                self.pager = None;
                self.selected_track = 0;
                self.screen = Screen::Genres;
            }
            Screen::Genres => {}
        }
    }

    /// Open the tracks screen for the selected genre with a fresh pager
    fn open_tracks(&mut self) -> Option<NetworkCommand> {
        let genre = self.genres.get(self.selected_genre)?.clone();
        tracing::info!(genre_id = genre.id, genre = %genre.title, "Opening track grid");

        let mut pager = crate::app::pager::TrackPager::new(genre.id);
        let id = self.next_id();
        let spec = pager.start_refresh(id);
        self.pager = Some(pager);
        self.selected_track = 0;
        self.screen = Screen::Tracks;

        Some(NetworkCommand::FetchTracksPage {
            id: spec.request_id,
            genre_id: spec.genre_id,
            page: spec.page,
        })
    }

    /// Hand the current list and selected index over to the player view
    fn open_player(&mut self) {
        let Some(pager) = self.pager.as_ref() else {
            return;
        };
        let Some(track) = pager.items().get(self.selected_track) else {
            return;
        };
        self.record_play(PlayEntry::from_track(track));
        self.player_index = Some(self.selected_track);
        self.screen = Screen::Player;
    }

    // ========================
    // Tracks screen actions
    // ========================

    /// Re-issue the first page (the pull-to-refresh analog)
    pub fn refresh_tracks(&mut self) -> Option<NetworkCommand> {
        self.pager.as_ref()?;
        let id = self.next_id();
        let spec = self.pager.as_mut()?.start_refresh(id);
        Some(NetworkCommand::FetchTracksPage {
            id: spec.request_id,
            genre_id: spec.genre_id,
            page: spec.page,
        })
    }

    /// Fetch the next page when the selection is near the bottom of the grid
    ///
    /// The pager enforces the single-flight guard; this just asks.
    fn maybe_load_more(&mut self) -> Option<NetworkCommand> {
        let selected = self.selected_track;
        if !self.pager.as_ref().is_some_and(|p| p.should_load_more(selected)) {
            return None;
        }
        let id = self.next_id();
        let spec = self.pager.as_mut()?.start_load_more(id)?;
        Some(NetworkCommand::FetchTracksPage {
            id: spec.request_id,
            genre_id: spec.genre_id,
            page: spec.page,
        })
    }

    // ========================
    // Player
    // ========================

    pub fn next_track(&mut self) {
        let count = self.track_count();
        if let Some(index) = self.player_index {
            if index + 1 < count {
                self.player_index = Some(index + 1);
                self.record_current_play();
            }
        }
    }

    pub fn prev_track(&mut self) {
        if let Some(index) = self.player_index {
            if index > 0 {
                self.player_index = Some(index - 1);
                self.record_current_play();
            }
        }
    }

    fn record_current_play(&mut self) {
        let entry = self
            .player_index
            .and_then(|i| self.pager.as_ref().and_then(|p| p.items().get(i)))
            .map(PlayEntry::from_track);
        if let Some(entry) = entry {
            self.record_play(entry);
        }
    }

    fn record_play(&mut self, entry: PlayEntry) {
        self.storage.add_recent(entry);
        let _ = self.storage.save_recents();
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::Genres { id, status, genres } => {
                if self.pending_genres_id != Some(id) {
                    return;
                }
                self.pending_genres_id = None;
                self.genres_loading = false;
                match genres {
                    Some(genres) if (200..300).contains(&status) => {
                        self.genres = genres;
                        self.selected_genre = 0;
                    }
                    _ => {
                        tracing::error!(status, "Genre fetch failed");
                        self.notice = Some(notice_text(Some(status), "Something went wrong!"));
                    }
                }
            }

            NetworkResponse::TracksPage { id, status, page } => {
                let Some(pager) = self.pager.as_mut() else {
                    // Screen was torn down while the fetch was in flight
                    tracing::debug!(id, "Dropping track page for a closed screen");
                    return;
                };
                let was_refresh = pager.is_refreshing();
                match page {
                    Some(page) if (200..300).contains(&status) => {
                        if pager.apply_success(id, page.items, page.total_pages) && was_refresh {
                            self.selected_track = 0;
                        }
                    }
                    _ => {
                        tracing::error!(id, status, "Track page fetch failed");
                        if let Some(err) =
                            pager.apply_error(id, Some(status), String::from("Something went wrong!"))
                        {
                            self.notice = Some(notice_text(err.status, &err.message));
                        }
                    }
                }
            }

            NetworkResponse::Error { id, status, message } => {
                if self.pending_genres_id == Some(id) {
                    self.pending_genres_id = None;
                    self.genres_loading = false;
                    tracing::error!(id, %message, "Genre fetch failed");
                    self.notice = Some(notice_text(status, &message));
                } else if let Some(pager) = self.pager.as_mut() {
                    if let Some(err) = pager.apply_error(id, status, message) {
                        tracing::error!(id, message = %err.message, "Track page fetch failed");
                        self.notice = Some(notice_text(err.status, &err.message));
                    }
                }
            }
        }
    }
}

/// Render a fetch failure the way the tracks screen surfaces it
fn notice_text(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Status code: {} error: {}", code, message),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Page, Track};

    fn genre(id: u64, title: &str) -> Genre {
        Genre {
            id,
            title: title.into(),
            handle: None,
            parent_id: None,
        }
    }

    fn tracks_page(ids: &[u64]) -> Page<Track> {
        Page {
            page: 0,
            total_pages: Some(9),
            limit: None,
            items: ids.iter().map(|&id| Track::stub(id, format!("t{id}"))).collect(),
        }
    }

    #[test]
    fn test_genre_fetch_roundtrip() {
        let mut state = AppState::new();
        let cmd = state.fetch_genres().unwrap();
        let NetworkCommand::FetchGenres { id } = cmd else {
            panic!("expected genre fetch");
        };
        // Duplicate fetch is suppressed while one is pending
        assert!(state.fetch_genres().is_none());

        state.handle_response(NetworkResponse::Genres {
            id,
            status: 200,
            genres: Some(vec![genre(3, "Jazz"), genre(5, "Rock")]),
        });
        assert!(!state.genres_loading);
        assert_eq!(state.genres.len(), 2);
    }

    #[test]
    fn test_open_tracks_and_error_notice() {
        let mut state = AppState::new();
        state.genres = vec![genre(3, "Jazz")];

        let cmd = state.select().unwrap();
        let NetworkCommand::FetchTracksPage { id, genre_id, page } = cmd else {
            panic!("expected track fetch");
        };
        assert_eq!((genre_id, page), (3, 1));
        assert_eq!(state.screen, Screen::Tracks);

        state.handle_response(NetworkResponse::TracksPage {
            id,
            status: 500,
            page: None,
        });
        assert_eq!(
            state.notice.as_deref(),
            Some("Status code: 500 error: Something went wrong!")
        );
    }

    #[test]
    fn test_late_response_after_teardown_is_noop() {
        let mut state = AppState::new();
        state.genres = vec![genre(3, "Jazz")];
        let NetworkCommand::FetchTracksPage { id, .. } = state.select().unwrap() else {
            panic!("expected track fetch");
        };

        // User backs out before the response lands
        state.back();
        assert!(state.pager.is_none());

        state.handle_response(NetworkResponse::TracksPage {
            id,
            status: 200,
            page: Some(tracks_page(&[1, 2])),
        });
        assert!(state.pager.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_scroll_triggers_load_more_once() {
        let mut state = AppState::new();
        state.genres = vec![genre(3, "Jazz")];
        let NetworkCommand::FetchTracksPage { id, .. } = state.select().unwrap() else {
            panic!("expected track fetch");
        };
        state.handle_response(NetworkResponse::TracksPage {
            id,
            status: 200,
            page: Some(tracks_page(&[1, 2, 3, 4])),
        });

        // threshold = max(1, 4/2) = 2; moving down lands in range of the bottom
        let cmd = state.move_down();
        let Some(NetworkCommand::FetchTracksPage { page, .. }) = cmd else {
            panic!("expected load-more fetch");
        };
        assert_eq!(page, 2);

        // Guard holds while the fetch is in flight
        assert!(state.move_down().is_none());
    }

    #[test]
    fn test_refresh_resets_selection() {
        let mut state = AppState::new();
        state.genres = vec![genre(3, "Jazz")];
        let NetworkCommand::FetchTracksPage { id, .. } = state.select().unwrap() else {
            panic!("expected track fetch");
        };
        state.handle_response(NetworkResponse::TracksPage {
            id,
            status: 200,
            page: Some(tracks_page(&[1, 2, 3, 4, 5, 6])),
        });
        state.selected_track = 5;

        let Some(NetworkCommand::FetchTracksPage { id, page, .. }) = state.refresh_tracks() else {
            panic!("expected refresh fetch");
        };
        assert_eq!(page, 1);
        state.handle_response(NetworkResponse::TracksPage {
            id,
            status: 200,
            page: Some(tracks_page(&[7, 8])),
        });
        assert_eq!(state.selected_track, 0);
        assert_eq!(state.pager.as_ref().unwrap().items().len(), 2);
    }
}
