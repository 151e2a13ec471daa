//! In-memory league used by the pipeline tests.
use cfb_api::client::{ApiError, ApiResult, LeagueSource};
use cfb_api::{Game, GamePage, GameQuery, GameStatus, SeasonInfo, TeamSummary};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeLeague {
    teams: HashMap<String, TeamSummary>,
    failing_teams: HashSet<String>,
    games: Vec<Game>,
    fail_games: bool,
    team_calls: Mutex<Vec<String>>,
    game_queries: Mutex<Vec<GameQuery>>,
}

impl FakeLeague {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: TeamSummary) -> Self {
        self.teams.insert(team.name.clone(), team);
        self
    }

    pub fn with_failing_team(mut self, name: &str) -> Self {
        self.failing_teams.insert(name.to_owned());
        self
    }

    pub fn with_games(mut self, games: Vec<Game>) -> Self {
        self.games = games;
        self
    }

    pub fn with_failing_games(mut self) -> Self {
        self.fail_games = true;
        self
    }

    pub fn team_calls(&self) -> Vec<String> {
        let mut calls = self.team_calls.lock().unwrap().clone();
        calls.sort();
        calls
    }

    pub fn clear_team_calls(&self) {
        self.team_calls.lock().unwrap().clear();
    }

    pub fn game_queries(&self) -> Vec<GameQuery> {
        self.game_queries.lock().unwrap().clone()
    }
}

impl LeagueSource for FakeLeague {
    async fn fetch_games(&self, query: &GameQuery) -> ApiResult<GamePage> {
        self.game_queries.lock().unwrap().push(query.clone());
        if self.fail_games {
            return Err(ApiError::Other("connection refused".into()));
        }
        let start = query.page * query.size;
        let games: Vec<Game> = self.games.iter().skip(start).take(query.size).cloned().collect();
        let total = self.games.len() as u64;
        Ok(GamePage {
            games,
            total_elements: total,
            total_pages: total.div_ceil(query.size.max(1) as u64),
        })
    }

    async fn fetch_team(&self, name: &str) -> ApiResult<Option<TeamSummary>> {
        self.team_calls.lock().unwrap().push(name.to_owned());
        // Answer on a later poll, like a real round trip.
        tokio::task::yield_now().await;
        if self.failing_teams.contains(name) {
            return Err(ApiError::Other(format!("timed out looking up {name}")));
        }
        Ok(self.teams.get(name).cloned())
    }

    async fn fetch_season(&self) -> ApiResult<SeasonInfo> {
        Err(ApiError::NotFound("season".into()))
    }
}

pub fn team(name: &str, abbreviation: &str, conference: &str, rank: u8) -> TeamSummary {
    TeamSummary {
        name: name.into(),
        abbreviation: abbreviation.into(),
        logo: None,
        conference: conference.into(),
        coaches_poll_ranking: rank,
        playoff_committee_ranking: 0,
    }
}

pub fn live_game(id: &str, home: &str, away: &str, quarter: u8, clock: &str) -> Game {
    Game {
        id: id.into(),
        home_team: home.into(),
        away_team: away.into(),
        status: GameStatus::InProgress,
        quarter: Some(quarter),
        clock: Some(clock.into()),
        season: 2026,
        ..Default::default()
    }
}
