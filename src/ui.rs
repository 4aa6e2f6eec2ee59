use ratatui::prelude::*;

use crate::constants::TRACK_QUALIFIER;

/// Icon glyph for a track card, decided by the batch qualifier tag
pub fn track_icon(qualifier: Option<&str>) -> &'static str {
    match qualifier {
        Some(TRACK_QUALIFIER) => "♪",
        _ => "·",
    }
}

/// Render a duration in seconds as m:ss
pub fn format_duration(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => String::from("--:--"),
    }
}

/// Style for the selected card/list entry
pub fn selection_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_icon_follows_qualifier() {
        assert_eq!(track_icon(Some("TRACK_WITH_ICON")), "♪");
        assert_eq!(track_icon(Some("other")), "·");
        assert_eq!(track_icon(None), "·");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(205)), "3:25");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(None), "--:--");
    }
}
