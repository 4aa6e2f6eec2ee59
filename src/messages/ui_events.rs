//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens
///
/// Navigation is a stack: Genres -> Tracks -> Player, with Esc walking back.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Genres,
    Tracks,
    Player,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Selection movement (grid-aware on the tracks screen)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Navigation
    Select,
    Back,

    // Tracks screen actions
    Refresh,

    // Player screen actions
    NextTrack,
    PrevTrack,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on the current screen
pub fn key_to_ui_event(key: KeyEvent, screen: Screen, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Help popup swallows everything
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // Shared keys
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Esc | KeyCode::Backspace => return Some(UiEvent::Back),
        KeyCode::Up | KeyCode::Char('k') => return Some(UiEvent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => return Some(UiEvent::MoveDown),
        KeyCode::Enter => return Some(UiEvent::Select),
        _ => {}
    }

    // Screen-specific keys
    match screen {
        Screen::Genres => None,
        Screen::Tracks => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::MoveRight),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            _ => None,
        },
        Screen::Player => match key.code {
            KeyCode::Char('n') | KeyCode::Right => Some(UiEvent::NextTrack),
            KeyCode::Char('p') | KeyCode::Left => Some(UiEvent::PrevTrack),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_refresh_only_on_tracks_screen() {
        let key = press(KeyCode::Char('r'));
        assert!(matches!(
            key_to_ui_event(key, Screen::Tracks, false),
            Some(UiEvent::Refresh)
        ));
        assert!(key_to_ui_event(key, Screen::Genres, false).is_none());
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let key = press(KeyCode::Char('r'));
        assert!(matches!(
            key_to_ui_event(key, Screen::Tracks, true),
            Some(UiEvent::CloseHelp)
        ));
    }

    #[test]
    fn test_player_track_navigation() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('n')), Screen::Player, false),
            Some(UiEvent::NextTrack)
        ));
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('p')), Screen::Player, false),
            Some(UiEvent::PrevTrack)
        ));
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(matches!(
            key_to_ui_event(key, Screen::Player, true),
            Some(UiEvent::Quit)
        ));
    }
}
