use crate::state::network::LoadingState;
use crate::state::scoreboard::{LoadedPage, PageRequest};
use cfb_api::{GameCategory, SeasonInfo};
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum NetworkRequest {
    LoadSeason,
    LoadGames(PageRequest),
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// `None` when the season endpoint failed; views mount unseeded.
    SeasonLoaded { season: Option<SeasonInfo> },
    GamesLoaded {
        category: GameCategory,
        generation: u64,
        result: Result<LoadedPage, String>,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
