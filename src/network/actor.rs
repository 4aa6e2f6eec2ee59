//! Network actor - runs archive API fetches in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_genres, fetch_tracks_page, ApiConfig};

/// Network actor that processes fetch commands
///
/// Exactly one response is sent back per fetch command; stale responses are
/// the app layer's problem (it matches them by request id).
pub struct NetworkActor {
    client: reqwest::Client,
    config: ApiConfig,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, config: ApiConfig) -> Self {
        NetworkActor {
            client: create_client(),
            config,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchGenres { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let config = self.config.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Fetching genre catalog");
                                let result = fetch_genres(&client, &config, id).await;
                                tracing::info!(id, "Genre fetch completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::FetchTracksPage { id, genre_id, page }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let config = self.config.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, genre_id, page, "Fetching track page");
                                let result =
                                    fetch_tracks_page(&client, &config, id, genre_id, page).await;
                                tracing::info!(id, "Track page fetch completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - responses were already sent by the tasks
                }
            }
        }
    }
}
