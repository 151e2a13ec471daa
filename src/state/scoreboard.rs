use crate::state::filter::{GamePredicates, filter_games};
use crate::state::filter_spec::{FilterEdit, FilterSpecification, FilterValues};
use crate::state::pagination::PaginationController;
use crate::state::sort::sort_games;
use crate::state::team_cache::TeamDirectoryCache;
use cfb_api::client::{ApiResult, LeagueSource};
use cfb_api::{Game, GameCategory, GameQuery, SeasonInfo, Side, SortOrder, TeamSummary};
use chrono::Local;
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Render-ready entries
// ---------------------------------------------------------------------------

/// A game plus whatever team metadata could be resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardEntry {
    pub game: Game,
    pub home: Option<TeamSummary>,
    pub away: Option<TeamSummary>,
}

impl AsRef<Game> for ScoreboardEntry {
    fn as_ref(&self) -> &Game {
        &self.game
    }
}

impl ScoreboardEntry {
    pub fn new(game: Game, teams: &HashMap<String, Option<TeamSummary>>) -> Self {
        let lookup = |name: &str| teams.get(name.trim()).cloned().flatten();
        Self {
            home: lookup(&game.home_team),
            away: lookup(&game.away_team),
            game,
        }
    }

    pub fn team(&self, side: Side) -> Option<&TeamSummary> {
        match side {
            Side::Home => self.home.as_ref(),
            Side::Away => self.away.as_ref(),
        }
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamSummary> {
        self.home.iter().chain(self.away.iter())
    }

    /// Abbreviation when known, otherwise the raw name from the game.
    pub fn label(&self, side: Side) -> &str {
        self.team(side)
            .map(|t| t.abbreviation.as_str())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.game.team(side))
    }

    /// The game's own ranking wins; team metadata fills in when it is absent.
    pub fn rank(&self, side: Side) -> Option<u8> {
        match self.game.rank(side) {
            0 => self.team(side).and_then(TeamSummary::best_rank),
            rank => Some(rank),
        }
    }

    pub fn is_ranked_matchup(&self) -> bool {
        self.game.is_ranked_matchup() || self.teams().any(TeamSummary::is_top_25)
    }
}

// ---------------------------------------------------------------------------
// Requests and the load pipeline
// ---------------------------------------------------------------------------

/// The part of the active filters the server cannot apply for this view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientRefinement {
    pub predicates: GamePredicates,
    pub sort: Option<SortOrder>,
}

impl ClientRefinement {
    pub fn apply(&self, entries: Vec<ScoreboardEntry>) -> Vec<ScoreboardEntry> {
        let entries = if self.predicates.is_empty() {
            entries
        } else {
            filter_games(&entries, &self.predicates)
        };
        match self.sort {
            Some(order) => sort_games(&entries, order),
            None => entries,
        }
    }
}

/// Everything needed to load one page, tagged with the generation that
/// issued it.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub category: GameCategory,
    pub generation: u64,
    pub query: GameQuery,
    pub refinement: ClientRefinement,
    pub teams: Arc<TeamDirectoryCache>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPage {
    pub entries: Vec<ScoreboardEntry>,
    pub total_elements: u64,
    /// As reported by the server. Only used to flag disagreements.
    pub server_total_pages: u64,
}

/// Fetch the page, then resolve every team on it, then refine client-side.
pub async fn load_page<S: LeagueSource>(source: &S, request: &PageRequest) -> ApiResult<LoadedPage> {
    let page = source.fetch_games(&request.query).await?;
    debug!(
        "{} page {} returned {} game(s) of {}",
        request.category.label(),
        request.query.page,
        page.games.len(),
        page.total_elements
    );

    let names = page
        .games
        .iter()
        .flat_map(|g| [g.home_team.clone(), g.away_team.clone()]);
    let teams = request.teams.resolve(source, names).await;
    debug!("{} team(s) cached for {}", request.teams.len(), request.category.label());

    let entries = page
        .games
        .into_iter()
        .map(|game| ScoreboardEntry::new(game, &teams))
        .collect();

    Ok(LoadedPage {
        entries: request.refinement.apply(entries),
        total_elements: page.total_elements,
        server_total_pages: page.total_pages,
    })
}

/// Server half of the active filters. Past listings keep the server's order
/// and are narrowed by season/week there; live listings pass the sort order.
pub fn build_query(category: GameCategory, values: &FilterValues, pagination: &PaginationController) -> GameQuery {
    let live = category.is_live();
    GameQuery {
        category,
        tokens: values.tokens.iter().cloned().collect(),
        sort: live.then_some(values.sort),
        conference: values.conference.clone(),
        season: if live { None } else { values.season },
        week: if live { None } else { values.week.clone() },
        page: pagination.page(),
        size: pagination.rows_per_page(),
    }
}

/// Client half: whatever needs team data or has no server parameter.
pub fn build_refinement(category: GameCategory, values: &FilterValues) -> ClientRefinement {
    let live = category.is_live();
    ClientRefinement {
        predicates: GamePredicates {
            conference: None,
            top_25_only: values.ranked_only,
            game_types: values.game_type.into_iter().collect::<BTreeSet<_>>(),
            status: values.status,
            week: if live { values.week.as_ref().map(|w| w.to_string()) } else { None },
            season: if live { values.season } else { None },
            tokens: values
                .tokens
                .iter()
                .filter(|t| t.as_str() == crate::state::filter::RANKED_MATCHUP)
                .cloned()
                .collect(),
        },
        sort: live.then_some(values.sort),
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// State behind one scoreboard tab.
///
/// Every transition that needs data returns a `PageRequest`; the caller
/// hands it to the network worker and later feeds the outcome back through
/// `on_page_loaded`. Only the most recently issued generation is ever
/// published.
#[derive(Debug)]
pub struct ScoreboardViewModel {
    category: GameCategory,
    filters: FilterSpecification,
    pagination: PaginationController,
    teams: Arc<TeamDirectoryCache>,
    generation: u64,
    phase: LoadPhase,
    entries: Vec<ScoreboardEntry>,
    mounted: bool,
    pub selected: usize,
    pub last_updated: Option<String>,
}

impl ScoreboardViewModel {
    pub fn new(category: GameCategory, rows_per_page: usize) -> Self {
        Self {
            category,
            filters: FilterSpecification::default(),
            pagination: PaginationController::new(rows_per_page),
            teams: Arc::new(TeamDirectoryCache::new()),
            generation: 0,
            phase: LoadPhase::Idle,
            entries: Vec::new(),
            mounted: false,
            selected: 0,
            last_updated: None,
        }
    }

    pub fn category(&self) -> GameCategory {
        self.category
    }

    pub fn filters(&self) -> &FilterSpecification {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn entries(&self) -> &[ScoreboardEntry] {
        &self.entries
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Seed filters from the season and issue the first load. A fresh cache
    /// comes with every mount.
    pub fn mount(&mut self, season: Option<SeasonInfo>) -> PageRequest {
        self.filters = FilterSpecification::new(FilterValues::seeded(self.category, season));
        self.pagination = PaginationController::new(self.pagination.rows_per_page());
        self.teams = Arc::new(TeamDirectoryCache::new());
        self.entries.clear();
        self.selected = 0;
        self.mounted = true;
        self.issue()
    }

    pub fn edit_filter(&mut self, edit: FilterEdit) {
        self.filters.edit(edit);
    }

    pub fn apply_filters(&mut self) -> PageRequest {
        self.filters.apply();
        self.pagination.reset();
        self.selected = 0;
        self.issue()
    }

    pub fn cancel_filters(&mut self) {
        self.filters.cancel();
    }

    pub fn change_page(&mut self, page: usize) -> Option<PageRequest> {
        self.pagination.request_page(page)?;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.pagination.next_page()?;
        Some(self.issue())
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.pagination.prev_page()?;
        Some(self.issue())
    }

    pub fn change_rows_per_page(&mut self, rows_per_page: usize) -> Option<PageRequest> {
        self.pagination
            .set_rows_per_page(rows_per_page)
            .then(|| self.issue())
    }

    pub fn cycle_rows_per_page(&mut self, larger: bool) -> Option<PageRequest> {
        let rows_per_page = self.pagination.neighbouring_rows_per_page(larger)?;
        self.change_rows_per_page(rows_per_page)
    }

    pub fn last_page(&mut self) -> Option<PageRequest> {
        let last = self.pagination.total_pages().checked_sub(1)?;
        self.change_page(last)
    }

    /// Reload the current page under the active filters.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.mounted.then(|| self.issue())
    }

    fn issue(&mut self) -> PageRequest {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        let active = self.filters.active();
        PageRequest {
            category: self.category,
            generation: self.generation,
            query: build_query(self.category, active, &self.pagination),
            refinement: build_refinement(self.category, active),
            teams: self.teams.clone(),
        }
    }

    /// Publish a finished load. Results from any generation but the latest
    /// are dropped. Returns whether the result was used.
    pub fn on_page_loaded(&mut self, generation: u64, result: Result<LoadedPage, String>) -> bool {
        if generation != self.generation {
            debug!(
                "{}: dropping stale result {generation} (latest {})",
                self.category.label(),
                self.generation
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.pagination.reconcile(page.total_elements);
                if page.server_total_pages as usize != self.pagination.total_pages() {
                    warn!(
                        "{}: server reports {} page(s), count implies {}",
                        self.category.label(),
                        page.server_total_pages,
                        self.pagination.total_pages()
                    );
                }
                self.entries = page.entries;
                self.selected = self.selected.min(self.entries.len().saturating_sub(1));
                self.last_updated = Some(Local::now().format("%H:%M:%S").to_string());
                self.phase = LoadPhase::Ready;
            }
            Err(message) => {
                self.entries.clear();
                self.pagination.reconcile(0);
                self.selected = 0;
                self.phase = LoadPhase::Error(message);
            }
        }
        true
    }

    pub fn selected_entry(&self) -> Option<&ScoreboardEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
