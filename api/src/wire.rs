//! Raw wire types for the league REST service.
//!
//! The backend is inconsistent about field naming: the same logical field
//! shows up as `snake_case` on some endpoints and `camelCase` on others.
//! Every shape here accepts both, and is mapped to the canonical domain
//! types via the From impls in client.rs.

use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamePageResponse {
    #[serde(default)]
    pub content: Vec<WireGame>,
    #[serde(alias = "totalElements")]
    pub total_elements: Option<u64>,
    #[serde(alias = "totalPages")]
    pub total_pages: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGame {
    #[serde(alias = "gameId", alias = "game_id")]
    pub id: Option<WireId>,
    #[serde(alias = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(alias = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(alias = "homeScore")]
    pub home_score: Option<u16>,
    #[serde(alias = "awayScore")]
    pub away_score: Option<u16>,
    /// "PREGAME", "IN_PROGRESS", "FINAL", ...
    pub status: Option<String>,
    pub quarter: Option<u8>,
    /// "mm:ss" on most endpoints, plain seconds on a few.
    pub clock: Option<WireClock>,
    pub down: Option<u8>,
    #[serde(alias = "yardsToGo")]
    pub yards_to_go: Option<u8>,
    #[serde(alias = "ballLocation")]
    pub ball_location: Option<u8>,
    /// "HOME" | "AWAY"
    pub possession: Option<String>,
    #[serde(alias = "waitingOn")]
    pub waiting_on: Option<String>,
    #[serde(alias = "gameType")]
    pub game_type: Option<String>,
    pub season: Option<u32>,
    /// Numbered weeks arrive as numbers on some endpoints and strings on others.
    pub week: Option<WireWeek>,
    #[serde(alias = "homeTeamRank", alias = "home_team_rank")]
    pub home_rank: Option<u8>,
    #[serde(alias = "awayTeamRank", alias = "away_team_rank")]
    pub away_rank: Option<u8>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireWeek {
    Number(u8),
    Text(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireClock {
    Seconds(u32),
    Text(String),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub conference: Option<String>,
    #[serde(alias = "coachesPollRanking")]
    pub coaches_poll_ranking: Option<u8>,
    #[serde(alias = "playoffCommitteeRanking")]
    pub playoff_committee_ranking: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireSeasonInfo {
    #[serde(alias = "currentSeason")]
    pub current_season: Option<u32>,
    #[serde(alias = "currentWeek")]
    pub current_week: Option<u8>,
}
