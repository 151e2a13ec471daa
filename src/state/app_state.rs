use crate::app::MenuItem;
use crate::state::filter_menu::FilterMenuState;
use crate::state::scoreboard::ScoreboardViewModel;
use cfb_api::{GameCategory, SeasonInfo};

// ---------------------------------------------------------------------------
// Per-tab scoreboards
// ---------------------------------------------------------------------------

/// One view model per listing. Each keeps its own filters, paging and team
/// cache for as long as it stays mounted.
#[derive(Debug)]
pub struct Scoreboards {
    ongoing: ScoreboardViewModel,
    past: ScoreboardViewModel,
    scrimmage: ScoreboardViewModel,
    past_scrimmage: ScoreboardViewModel,
}

impl Scoreboards {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            ongoing: ScoreboardViewModel::new(GameCategory::Ongoing, rows_per_page),
            past: ScoreboardViewModel::new(GameCategory::Past, rows_per_page),
            scrimmage: ScoreboardViewModel::new(GameCategory::Scrimmage, rows_per_page),
            past_scrimmage: ScoreboardViewModel::new(GameCategory::PastScrimmage, rows_per_page),
        }
    }

    pub fn get(&self, category: GameCategory) -> &ScoreboardViewModel {
        match category {
            GameCategory::Ongoing => &self.ongoing,
            GameCategory::Past => &self.past,
            GameCategory::Scrimmage => &self.scrimmage,
            GameCategory::PastScrimmage => &self.past_scrimmage,
        }
    }

    pub fn get_mut(&mut self, category: GameCategory) -> &mut ScoreboardViewModel {
        match category {
            GameCategory::Ongoing => &mut self.ongoing,
            GameCategory::Past => &mut self.past,
            GameCategory::Scrimmage => &mut self.scrimmage,
            GameCategory::PastScrimmage => &mut self.past_scrimmage,
        }
    }
}

impl Default for Scoreboards {
    fn default() -> Self {
        Self::new(crate::state::pagination::DEFAULT_ROWS_PER_PAGE)
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    /// Current season and week, once the info endpoint has answered.
    pub season: Option<SeasonInfo>,
    /// Set after the season lookup finished, whether it succeeded or not.
    pub season_loaded: bool,
    pub scoreboards: Scoreboards,
    pub filter_menu: FilterMenuState,
}

impl AppState {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            scoreboards: Scoreboards::new(rows_per_page),
            ..Self::default()
        }
    }
}
