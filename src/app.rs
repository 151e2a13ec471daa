use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::filter_menu::FilterField;
use crate::state::scoreboard::{LoadedPage, PageRequest, ScoreboardViewModel};
use cfb_api::{GameCategory, SeasonInfo};
use log::{debug, info};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Ongoing,
    Past,
    Scrimmages,
    PastScrimmages,
    Help,
}

impl MenuItem {
    pub const TABS: [MenuItem; 5] = [
        MenuItem::Ongoing,
        MenuItem::Past,
        MenuItem::Scrimmages,
        MenuItem::PastScrimmages,
        MenuItem::Help,
    ];

    /// The listing behind this tab, if it shows one.
    pub fn category(&self) -> Option<GameCategory> {
        match self {
            MenuItem::Ongoing => Some(GameCategory::Ongoing),
            MenuItem::Past => Some(GameCategory::Past),
            MenuItem::Scrimmages => Some(GameCategory::Scrimmage),
            MenuItem::PastScrimmages => Some(GameCategory::PastScrimmage),
            MenuItem::Help => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuItem::Ongoing => "Ongoing",
            MenuItem::Past => "Past",
            MenuItem::Scrimmages => "Scrimmages",
            MenuItem::PastScrimmages => "Past Scrimmages",
            MenuItem::Help => "Help",
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(settings.rows_per_page),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Views wait for the season so past listings can seed their filters.
    /// Returns the first load for whichever tab is showing.
    pub fn on_season_loaded(&mut self, season: Option<SeasonInfo>) -> Option<PageRequest> {
        self.state.season = season;
        self.state.season_loaded = true;
        self.mount_active()
    }

    /// Returns whether the result reached the screen.
    pub fn on_games_loaded(
        &mut self,
        category: GameCategory,
        generation: u64,
        result: Result<LoadedPage, String>,
    ) -> bool {
        self.state.scoreboards.get_mut(category).on_page_loaded(generation, result)
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switching tabs abandons any half-edited filter and mounts a listing the
    /// first time it is shown.
    pub fn update_tab(&mut self, next: MenuItem) -> Option<PageRequest> {
        if self.state.active_tab == next {
            return None;
        }
        self.close_filter_menu();
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.mount_active()
    }

    fn mount_active(&mut self) -> Option<PageRequest> {
        let category = self.state.active_tab.category()?;
        if !self.state.season_loaded {
            return None;
        }
        let season = self.state.season;
        let view = self.state.scoreboards.get_mut(category);
        if view.is_mounted() {
            return None;
        }
        info!("mounting {}", category.label());
        Some(view.mount(season))
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Scoreboard actions, delegated to the active view model
    // -----------------------------------------------------------------------

    pub fn active_scoreboard(&self) -> Option<&ScoreboardViewModel> {
        let category = self.state.active_tab.category()?;
        Some(self.state.scoreboards.get(category))
    }

    fn active_scoreboard_mut(&mut self) -> Option<&mut ScoreboardViewModel> {
        let category = self.state.active_tab.category()?;
        let view = self.state.scoreboards.get_mut(category);
        view.is_mounted().then_some(view)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.next_page()
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.prev_page()
    }

    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.change_page(0)
    }

    pub fn last_page(&mut self) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.last_page()
    }

    pub fn cycle_rows_per_page(&mut self, larger: bool) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.cycle_rows_per_page(larger)
    }

    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.active_scoreboard_mut()?.refresh()
    }

    /// Timer-driven reload. Only the visible live listing is refreshed, and
    /// never on top of a load that is still running.
    pub fn periodic_refresh(&mut self) -> Option<PageRequest> {
        let view = self.active_scoreboard_mut()?;
        if !view.category().is_live() || view.is_loading() {
            return None;
        }
        debug!("periodic refresh of {}", view.category().label());
        view.refresh()
    }

    pub fn select_next(&mut self) {
        if let Some(view) = self.active_scoreboard_mut() {
            view.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(view) = self.active_scoreboard_mut() {
            view.select_prev();
        }
    }

    // -----------------------------------------------------------------------
    // Filter menu
    // -----------------------------------------------------------------------

    pub fn is_filter_menu_open(&self) -> bool {
        self.state.filter_menu.open
    }

    pub fn open_filter_menu(&mut self) {
        if self.active_scoreboard_mut().is_some() {
            self.state.filter_menu.open = true;
        }
    }

    /// Closing without applying throws the pending edits away.
    pub fn close_filter_menu(&mut self) {
        if !self.state.filter_menu.open {
            return;
        }
        self.state.filter_menu.open = false;
        if let Some(view) = self.active_scoreboard_mut() {
            view.cancel_filters();
        }
    }

    pub fn filter_menu_next(&mut self) {
        self.state.filter_menu.next_field();
    }

    pub fn filter_menu_prev(&mut self) {
        self.state.filter_menu.prev_field();
    }

    /// Cycle the highlighted field's pending value.
    pub fn filter_menu_step(&mut self, forward: bool) {
        let field: FilterField = self.state.filter_menu.field();
        let season = self.state.season;
        if let Some(view) = self.active_scoreboard_mut() {
            let edit = field.step(view.filters().pending(), forward, season);
            view.edit_filter(edit);
        }
    }

    pub fn filter_menu_apply(&mut self) -> Option<PageRequest> {
        self.state.filter_menu.open = false;
        let view = self.active_scoreboard_mut()?;
        Some(view.apply_filters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::filter_spec::FilterState;
    use crate::state::scoreboard::LoadPhase;
    use cfb_api::Week;

    fn app() -> App {
        App::with_settings(AppSettings::default())
    }

    fn loaded(total: u64) -> Result<LoadedPage, String> {
        Ok(LoadedPage { entries: vec![], total_elements: total, server_total_pages: total.div_ceil(10) })
    }

    #[test]
    fn views_mount_once_the_season_is_known() {
        let mut app = app();
        assert!(app.update_tab(MenuItem::Past).is_none());

        let request = app.on_season_loaded(Some(SeasonInfo { season: 2026, week: 6 })).unwrap();
        assert_eq!(request.category, GameCategory::Past);
        assert_eq!(request.query.season, Some(2026));
        assert_eq!(request.query.week, Some(Week::Regular(6)));
    }

    #[test]
    fn failed_season_lookup_still_mounts_unseeded() {
        let mut app = app();
        let request = app.on_season_loaded(None).unwrap();
        assert_eq!(request.category, GameCategory::Ongoing);
        assert_eq!(request.query.season, None);
    }

    #[test]
    fn tabs_mount_on_first_visit_only() {
        let mut app = app();
        app.on_season_loaded(None);

        assert!(app.update_tab(MenuItem::Scrimmages).is_some());
        assert!(app.update_tab(MenuItem::Ongoing).is_none());
        assert!(app.update_tab(MenuItem::Scrimmages).is_none());
        assert!(app.update_tab(MenuItem::Help).is_none());
        assert!(app.active_scoreboard().is_none());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Past);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Past);
    }

    #[test]
    fn results_route_to_their_own_listing() {
        let mut app = app();
        let ongoing = app.on_season_loaded(None).unwrap();
        let past = app.update_tab(MenuItem::Past).unwrap();

        assert!(app.on_games_loaded(GameCategory::Ongoing, ongoing.generation, loaded(3)));
        assert!(app.on_games_loaded(GameCategory::Past, past.generation, loaded(42)));

        assert_eq!(app.state.scoreboards.get(GameCategory::Ongoing).pagination().total_elements(), 3);
        assert_eq!(app.state.scoreboards.get(GameCategory::Past).pagination().total_elements(), 42);
    }

    #[test]
    fn periodic_refresh_only_touches_live_listings() {
        let mut app = app();
        let first = app.on_season_loaded(None).unwrap();
        assert!(app.periodic_refresh().is_none(), "first load still running");

        app.on_games_loaded(GameCategory::Ongoing, first.generation, loaded(1));
        let tick = app.periodic_refresh().unwrap();
        assert_eq!(tick.generation, first.generation + 1);

        let past = app.update_tab(MenuItem::Past).unwrap();
        app.on_games_loaded(GameCategory::Past, past.generation, loaded(1));
        assert!(app.periodic_refresh().is_none());
    }

    #[test]
    fn filter_menu_apply_and_cancel() {
        let mut app = app();
        let first = app.on_season_loaded(None).unwrap();
        app.on_games_loaded(GameCategory::Ongoing, first.generation, loaded(0));

        app.open_filter_menu();
        assert!(app.is_filter_menu_open());
        app.filter_menu_step(true);
        let view = app.active_scoreboard().unwrap();
        assert_eq!(view.filters().state(), FilterState::Editing);
        assert_eq!(view.filters().pending().conference.as_deref(), Some("ACC"));

        app.close_filter_menu();
        let view = app.active_scoreboard().unwrap();
        assert_eq!(view.filters().pending().conference, None);
        assert_eq!(view.phase(), &LoadPhase::Ready);

        app.open_filter_menu();
        app.filter_menu_step(true);
        let request = app.filter_menu_apply().unwrap();
        assert!(!app.is_filter_menu_open());
        assert_eq!(request.query.conference.as_deref(), Some("ACC"));
    }

    #[test]
    fn switching_tabs_discards_pending_edits() {
        let mut app = app();
        app.on_season_loaded(None);
        app.open_filter_menu();
        app.filter_menu_next();
        app.filter_menu_step(true);

        app.update_tab(MenuItem::Past);
        app.update_tab(MenuItem::Ongoing);

        assert!(!app.is_filter_menu_open());
        let view = app.active_scoreboard().unwrap();
        assert!(!view.filters().has_unapplied_changes());
    }
}
