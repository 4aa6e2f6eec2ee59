//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::Screen;
use crate::models::{Genre, Track};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,

    // Genres screen
    pub genres: Vec<Genre>,
    pub selected_genre: usize,
    pub genres_loading: bool,

    // Tracks screen
    pub genre_title: Option<String>,
    pub tracks: Vec<Track>,
    pub selected_track: usize,
    pub page: u32,
    pub total_pages: Option<u32>,
    pub is_loading: bool,
    /// Show the "loading more" footer (load in flight over a non-empty grid)
    pub loading_footer: bool,

    // Player screen
    pub player_index: Option<usize>,

    // Transient fetch-error notice: status code (if any) and message
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: Screen::Genres,
            genres: Vec::new(),
            selected_genre: 0,
            genres_loading: false,
            genre_title: None,
            tracks: Vec::new(),
            selected_track: 0,
            page: 0,
            total_pages: None,
            is_loading: false,
            loading_footer: false,
            player_index: None,
            notice: None,
            show_help: false,
        }
    }
}
