//! App state - pure data structure with no I/O logic

use crate::app::pager::TrackPager;
use crate::messages::ui_events::Screen;
use crate::messages::RenderState;
use crate::models::Genre;
use crate::storage::Storage;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,

    // Genre catalog
    pub genres: Vec<Genre>,
    pub selected_genre: usize,
    pub genres_loading: bool,
    pub pending_genres_id: Option<u64>,

    // Track grid; present only while the tracks (or player) screen is alive
    pub pager: Option<TrackPager>,
    pub selected_track: usize,

    // Player
    pub player_index: Option<usize>,

    // Transient fetch-error notice, cleared on the next user input
    pub notice: Option<String>,

    // Request id source
    pub next_request_id: u64,

    // Storage (persisted data)
    pub storage: Storage,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            screen: Screen::Genres,
            genres: Vec::new(),
            selected_genre: 0,
            genres_loading: false,
            pending_genres_id: None,
            pager: None,
            selected_track: 0,
            player_index: None,
            notice: None,
            next_request_id: 1,
            storage: Storage::new(),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let genre_title = self.pager.as_ref().and_then(|p| {
            self.genres
                .iter()
                .find(|g| g.id == p.genre_id())
                .map(|g| g.title.clone())
        });

        RenderState {
            screen: self.screen,
            genres: self.genres.clone(),
            selected_genre: self.selected_genre,
            genres_loading: self.genres_loading,
            genre_title,
            tracks: self
                .pager
                .as_ref()
                .map(|p| p.items().to_vec())
                .unwrap_or_default(),
            selected_track: self.selected_track,
            page: self.pager.as_ref().map(|p| p.page()).unwrap_or(0),
            total_pages: self.pager.as_ref().and_then(|p| p.total_pages()),
            is_loading: self.pager.as_ref().is_some_and(|p| p.is_loading()),
            loading_footer: self.pager.as_ref().is_some_and(|p| {
                p.is_loading_more() && !p.items().is_empty()
            }),
            player_index: self.player_index,
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
