//! Minstrel TUI - actor-based terminal music-archive browser
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async archive API fetches

mod models;
mod storage;
mod ui;
mod messages;
mod app;
mod network;
mod constants;

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use messages::ui_events::{key_to_ui_event, Screen};
use app::AppActor;
use app::commands::GRID_COLUMNS;
use network::{ApiConfig, NetworkActor};
use ui::{format_duration, selection_style, track_icon};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "minstrel.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx, ApiConfig::from_env());
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.screen, current_state.show_help)
                {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    match state.screen {
        Screen::Genres => draw_genres_screen(f, state, main_chunks[1]),
        Screen::Tracks => draw_tracks_screen(f, state, main_chunks[1]),
        Screen::Player => draw_player_screen(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let crumb = match state.screen {
        Screen::Genres => String::from(" minstrel / genres"),
        Screen::Tracks => format!(
            " minstrel / genres / {}",
            state.genre_title.as_deref().unwrap_or("tracks")
        ),
        Screen::Player => String::from(" minstrel / player"),
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(crumb, Style::default().fg(Color::Cyan).bold()),
    ]));
    f.render_widget(bar, area);
}

fn draw_genres_screen(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Genres (Enter to browse) ");

    if state.genres.is_empty() {
        let text = if state.genres_loading {
            "Loading genres..."
        } else {
            "No genres available."
        };
        let placeholder = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .genres
        .iter()
        .enumerate()
        .map(|(i, g)| {
            ListItem::new(format!("  {}", g.title))
                .style(selection_style(i == state.selected_genre))
        })
        .collect();

    let list = List::new(items).block(block);
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_genre));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_tracks_screen(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = match (state.page, state.total_pages) {
        (0, _) => String::from(" Tracks "),
        (p, Some(total)) => format!(" Tracks - page {}/{} ", p, total),
        (p, None) => format!(" Tracks - page {} ", p),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Full-screen progress while the first page is in flight
    if state.tracks.is_empty() {
        let text = if state.is_loading {
            "Loading..."
        } else {
            "No tracks. Press 'r' to reload."
        };
        let placeholder =
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, inner);
        return;
    }

    // Reserve the bottom line for the load-more footer
    let (grid_area, footer_area) = if state.loading_footer && inner.height > 1 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    draw_track_grid(f, state, grid_area);

    if let Some(footer) = footer_area {
        let loading = Paragraph::new("Loading more tracks...")
            .style(Style::default().fg(Color::Yellow))
            .centered();
        f.render_widget(loading, footer);
    }
}

/// Two-column card grid, scrolled so the selection stays visible
fn draw_track_grid(f: &mut Frame, state: &RenderState, area: Rect) {
    const CARD_HEIGHT: u16 = 4;

    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = state.selected_track / GRID_COLUMNS;
    let first_row = if selected_row < visible_rows {
        0
    } else {
        selected_row - visible_rows + 1
    };
    let total_rows = (state.tracks.len() + GRID_COLUMNS - 1) / GRID_COLUMNS;

    for (slot, row) in (first_row..total_rows).take(visible_rows).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + (slot as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        }
        .intersection(area);
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row_area);

        for col in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + col;
            if let Some(track) = state.tracks.get(index) {
                draw_track_card(f, track, index == state.selected_track, cells[col]);
            }
        }
    }
}

fn draw_track_card(f: &mut Frame, track: &models::Track, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default().borders(Borders::ALL).border_style(border_style);

    let title_line = Line::from(vec![
        Span::styled(
            format!("{} ", track_icon(track.qualifier.as_deref())),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(track.title.clone(), selection_style(selected)),
    ]);
    let detail_line = Line::from(Span::styled(
        format!("{} - {}", track.artist, format_duration(track.duration)),
        Style::default().fg(Color::Gray),
    ));

    let card = Paragraph::new(vec![title_line, detail_line]).block(block);
    f.render_widget(card, area);
}

fn draw_player_screen(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing ");

    let index = state.player_index.unwrap_or(0);
    let track = match state.tracks.get(index) {
        Some(track) => track,
        None => {
            let placeholder = Paragraph::new("Nothing selected.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, area);
            return;
        }
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", track_icon(track.qualifier.as_deref()), track.title),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            format!("  by {}", track.artist),
            Style::default().fg(Color::White),
        )),
    ];
    if let Some(album) = &track.album {
        lines.push(Line::from(Span::styled(
            format!("  from {}", album),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  duration {}", format_duration(track.duration)),
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        format!("  track {} of {}", index + 1, state.tracks.len()),
        Style::default().fg(Color::DarkGray),
    )));
    if let Some(url) = &track.url {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", url),
            Style::default().fg(Color::Blue),
        )));
    }

    let player = Paragraph::new(lines).block(block);
    f.render_widget(player, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    // A fetch-error notice takes over the bar until the next key press
    if let Some(notice) = &state.notice {
        let bar = Paragraph::new(format!(" {}", notice))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        f.render_widget(bar, area);
        return;
    }

    let status = match state.screen {
        Screen::Genres => " ↑/↓:select | Enter:browse | ?:help | q:quit ",
        Screen::Tracks => {
            if state.is_loading {
                " Loading... "
            } else {
                " arrows:move | Enter:play | r:refresh | Esc:back | ?:help | q:quit "
            }
        }
        Screen::Player => " n:next | p:prev | Esc:back | ?:help | q:quit ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 MINSTREL TUI - Keyboard Shortcuts

 GENRES
   ↑ / ↓ (j/k)        Move selection
   Enter              Browse tracks in genre

 TRACKS
   Arrows (hjkl)      Move around the grid
   Enter              Open track in player
   r                  Refresh (back to page 1)
   Esc / Backspace    Back to genres

   Scrolling near the bottom of the grid
   loads the next page automatically.

 PLAYER
   n / p              Next / previous track
   Esc / Backspace    Back to tracks

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
