//! # Minstrel TUI
//!
//! A terminal browser for a free music archive: pick a genre, scroll an
//! endlessly-growing grid of tracks, open one in the player view.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine, paged track loader)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod models;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Genre, Page, PlayEntry, Track};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, TrackPager};
pub use network::{ApiConfig, NetworkActor};
