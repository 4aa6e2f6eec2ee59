//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Base URL of the music archive API
pub const DEFAULT_API_BASE: &str = "https://freemusicarchive.org/api/get";

/// Tracks fetched per page
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Qualifier tag attached to fetched tracks, read by the grid renderer
/// to pick the icon style
pub const TRACK_QUALIFIER: &str = "TRACK_WITH_ICON";

/// Initial distance-from-bottom (in cards) that triggers the next page load
pub const DEFAULT_SCROLL_THRESHOLD: usize = 1;

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Minstrel TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
