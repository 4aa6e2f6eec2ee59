//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Kick off the genre catalog fetch and send the initial render state
        if let Some(cmd) = self.state.fetch_genres() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = response.id(), "Applying network response");
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        // Fetch-error notices are shown once, until the next input
        self.state.notice = None;

        match event {
            // Selection movement (may trigger an infinite-scroll fetch)
            UiEvent::MoveUp => self.dispatch(|s| s.move_up()),
            UiEvent::MoveDown => self.dispatch(|s| s.move_down()),
            UiEvent::MoveLeft => self.dispatch(|s| s.move_left()),
            UiEvent::MoveRight => self.dispatch(|s| s.move_right()),

            // Navigation
            UiEvent::Select => self.dispatch(|s| s.select()),
            UiEvent::Back => self.state.back(),

            // Tracks screen
            UiEvent::Refresh => self.dispatch(|s| s.refresh_tracks()),

            // Player
            UiEvent::NextTrack => self.state.next_track(),
            UiEvent::PrevTrack => self.state.prev_track(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    /// Run a handler and forward any network command it produced
    fn dispatch(&mut self, f: impl FnOnce(&mut AppState) -> Option<NetworkCommand>) {
        if let Some(cmd) = f(&mut self.state) {
            let _ = self.network_tx.send(cmd);
        }
    }
}
