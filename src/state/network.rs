use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::scoreboard::{PageRequest, load_page};
use cfb_api::client::{LeagueApi, LeagueSource};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Receives requests and runs each one on its own task, so overlapping page
/// loads really overlap. Ordering is the view model's job, not ours.
pub struct NetworkWorker {
    requests: mpsc::Receiver<NetworkRequest>,
    handle: WorkerHandle,
}

#[derive(Clone)]
struct WorkerHandle {
    client: LeagueApi,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        client: LeagueApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            requests,
            handle: WorkerHandle {
                client,
                responses,
                in_flight: Arc::new(AtomicUsize::new(0)),
            },
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if self.handle.responses.is_closed() {
                break;
            }
            let handle = self.handle.clone();
            tokio::spawn(async move {
                handle.start_loading_animation().await;
                let (ok, response) = match request {
                    NetworkRequest::LoadSeason => handle.handle_load_season().await,
                    NetworkRequest::LoadGames(page) => handle.handle_load_games(page).await,
                };
                debug!("network request complete");
                handle.stop_loading_animation(ok).await;

                if let Err(e) = handle.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

impl WorkerHandle {
    async fn handle_load_season(&self) -> (bool, NetworkResponse) {
        debug!("loading current season");
        match self.client.fetch_season().await {
            Ok(season) => {
                info!("current season {} week {}", season.season, season.week);
                (true, NetworkResponse::SeasonLoaded { season: Some(season) })
            }
            Err(e) => {
                warn!("season lookup failed, filters start unseeded: {e}");
                (false, NetworkResponse::SeasonLoaded { season: None })
            }
        }
    }

    async fn handle_load_games(&self, request: PageRequest) -> (bool, NetworkResponse) {
        debug!(
            "loading {} page {} (generation {})",
            request.category.label(),
            request.query.page,
            request.generation
        );
        let result = load_page(&self.client, &request).await.map_err(|e| {
            error!("loading {} failed: {e}", request.category.label());
            e.to_string()
        });
        (
            result.is_ok(),
            NetworkResponse::GamesLoaded {
                category: request.category,
                generation: request.generation,
                result,
            },
        )
    }

    async fn start_loading_animation(&self) {
        // Only the first of several overlapping requests drives the spinner.
        if self.in_flight.fetch_add(1, Ordering::Relaxed) > 0 {
            return;
        }

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if in_flight.load(Ordering::Relaxed) == 0 {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        if self.in_flight.fetch_sub(1, Ordering::Relaxed) > 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
