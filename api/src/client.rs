use crate::wire::{GamePageResponse, WireClock, WireGame, WireSeasonInfo, WireTeam, WireWeek};
use crate::{Game, GamePage, GameQuery, GameStatus, GameType, SeasonInfo, Side, TeamSummary, Week};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

/// Explicit per-user context for every request. Nothing is read from ambient
/// storage inside the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub base_url: String,
    pub token: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), token: None }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// The data the scoreboard pipeline consumes. `LeagueApi` is the real
/// implementation; anything else is a test double.
pub trait LeagueSource: Send + Sync {
    fn fetch_games(&self, query: &GameQuery) -> impl Future<Output = ApiResult<GamePage>> + Send;

    /// `Ok(None)` when the server has no team by that name.
    fn fetch_team(&self, name: &str) -> impl Future<Output = ApiResult<Option<TeamSummary>>> + Send;

    fn fetch_season(&self) -> impl Future<Output = ApiResult<SeasonInfo>> + Send;
}

/// REST client for the league service.
#[derive(Debug, Clone)]
pub struct LeagueApi {
    client: Client,
    session: Session,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Transport failures and 5xx are worth another attempt; 4xx never are.
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(..) => true,
            ApiError::Api(e, _) => e.status().is_some_and(|s| s.is_server_error()),
            _ => false,
        }
    }
}

impl LeagueApi {
    pub fn new(session: Session) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent("cfbtui/0.1 (terminal scoreboard)")
            .build()
            .map_err(|e| ApiError::Network(e, session.base_url.clone()))?;
        Ok(Self {
            client,
            session,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            backoff: DEFAULT_BACKOFF,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.session.base_url)
            .map_err(|e| ApiError::Other(format!("invalid base url {}: {e}", self.session.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Other(format!("base url cannot be a base: {}", self.session.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let mut attempt = 0;
        loop {
            match self.get_once(&url).await {
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    tokio::time::sleep(self.backoff * 2u32.pow(attempt)).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> ApiResult<T> {
        let mut request = self.client.get(url.clone()).timeout(self.timeout);
        if let Some(token) = &self.session.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_string())),
            Err(e) => Err(ApiError::Api(e, url.to_string())),
        }
    }
}

impl LeagueSource for LeagueApi {
    async fn fetch_games(&self, query: &GameQuery) -> ApiResult<GamePage> {
        let mut url = self.endpoint(&["games", "filtered"])?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        let raw: GamePageResponse = self.get(url).await?;
        Ok(raw.into())
    }

    async fn fetch_team(&self, name: &str) -> ApiResult<Option<TeamSummary>> {
        let url = self.endpoint(&["teams", "name", name])?;
        match self.get::<Option<WireTeam>>(url).await {
            Ok(raw) => Ok(raw.map(|t| map_team(t, name))),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fetch_season(&self) -> ApiResult<SeasonInfo> {
        let url = self.endpoint(&["info"])?;
        let raw: WireSeasonInfo = self.get(url).await?;
        match (raw.current_season, raw.current_week) {
            (Some(season), Some(week)) => Ok(SeasonInfo { season, week }),
            _ => Err(ApiError::Other("season info is missing season or week".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → canonical domain types
// ---------------------------------------------------------------------------

impl From<GamePageResponse> for GamePage {
    fn from(raw: GamePageResponse) -> Self {
        let games: Vec<Game> = raw.content.into_iter().map(Game::from).collect();
        let total_elements = raw.total_elements.unwrap_or(games.len() as u64);
        GamePage {
            total_pages: raw.total_pages.unwrap_or_default(),
            total_elements,
            games,
        }
    }
}

impl From<WireGame> for Game {
    fn from(g: WireGame) -> Self {
        Game {
            id: g.id.map(|id| id.into_string()).unwrap_or_default(),
            home_team: g.home_team.unwrap_or_default(),
            away_team: g.away_team.unwrap_or_default(),
            home_score: g.home_score.unwrap_or_default(),
            away_score: g.away_score.unwrap_or_default(),
            status: g.status.as_deref().map(parse_status).unwrap_or_default(),
            quarter: g.quarter,
            clock: g.clock.map(map_clock),
            down: g.down,
            yards_to_go: g.yards_to_go,
            ball_location: g.ball_location,
            possession: g.possession.as_deref().and_then(parse_side),
            waiting_on: g.waiting_on.as_deref().and_then(parse_side),
            game_type: g.game_type.as_deref().map(parse_game_type).unwrap_or_default(),
            season: g.season.unwrap_or_default(),
            week: g.week.and_then(map_week),
            home_rank: g.home_rank.unwrap_or_default(),
            away_rank: g.away_rank.unwrap_or_default(),
        }
    }
}

fn map_team(t: WireTeam, requested: &str) -> TeamSummary {
    TeamSummary {
        name: t.name.unwrap_or_else(|| requested.to_owned()),
        abbreviation: t.abbreviation.unwrap_or_default(),
        logo: t.logo,
        conference: t.conference.unwrap_or_default(),
        coaches_poll_ranking: t.coaches_poll_ranking.unwrap_or_default(),
        playoff_committee_ranking: t.playoff_committee_ranking.unwrap_or_default(),
    }
}

fn map_week(w: WireWeek) -> Option<Week> {
    match w {
        WireWeek::Number(n) => Some(Week::Regular(n)),
        WireWeek::Text(s) => Week::parse(&s),
    }
}

fn map_clock(c: WireClock) -> String {
    match c {
        WireClock::Seconds(n) => format!("{:02}:{:02}", n / 60, n % 60),
        WireClock::Text(s) => s,
    }
}

fn parse_status(s: &str) -> GameStatus {
    match s.trim().to_uppercase().as_str() {
        "OPENING_KICKOFF" => GameStatus::OpeningKickoff,
        "IN_PROGRESS" => GameStatus::InProgress,
        "HALFTIME" => GameStatus::Halftime,
        "OVERTIME" => GameStatus::Overtime,
        "FINAL" => GameStatus::Final,
        "END_OF_REGULATION" => GameStatus::EndOfRegulation,
        _ => GameStatus::Pregame,
    }
}

fn parse_game_type(s: &str) -> GameType {
    match s.trim().to_uppercase().as_str() {
        "CONFERENCE_GAME" => GameType::ConferenceGame,
        "CONFERENCE_CHAMPIONSHIP" => GameType::ConferenceChampionship,
        "PLAYOFFS" => GameType::Playoffs,
        "NATIONAL_CHAMPIONSHIP" => GameType::NationalChampionship,
        "BOWL" => GameType::Bowl,
        "SCRIMMAGE" => GameType::Scrimmage,
        _ => GameType::OutOfConference,
    }
}

fn parse_side(s: &str) -> Option<Side> {
    match s.trim().to_uppercase().as_str() {
        "HOME" => Some(Side::Home),
        "AWAY" => Some(Side::Away),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameCategory;
    use mockito::Matcher;

    fn api_for(server: &mockito::Server) -> LeagueApi {
        LeagueApi::new(Session::new(server.url()))
            .unwrap()
            .with_retry_policy(2, Duration::from_millis(1))
    }

    #[test]
    fn snake_and_camel_case_games_normalise_to_the_same_shape() {
        let snake = r#"{
            "id": 17, "home_team": "Ohio State", "away_team": "Michigan",
            "home_score": 21, "away_score": 17, "status": "IN_PROGRESS",
            "quarter": 4, "clock": "02:00", "down": 3, "yards_to_go": 7,
            "ball_location": 62, "possession": "HOME", "waiting_on": "AWAY",
            "game_type": "CONFERENCE_GAME", "season": 2026, "week": 12,
            "home_team_rank": 2, "away_team_rank": 0
        }"#;
        let camel = r#"{
            "gameId": "17", "homeTeam": "Ohio State", "awayTeam": "Michigan",
            "homeScore": 21, "awayScore": 17, "status": "IN_PROGRESS",
            "quarter": 4, "clock": "02:00", "down": 3, "yardsToGo": 7,
            "ballLocation": 62, "possession": "HOME", "waitingOn": "AWAY",
            "gameType": "CONFERENCE_GAME", "season": 2026, "week": "12",
            "homeTeamRank": 2, "awayTeamRank": 0
        }"#;
        let a: Game = serde_json::from_str::<WireGame>(snake).unwrap().into();
        let b: Game = serde_json::from_str::<WireGame>(camel).unwrap().into();
        assert_eq!(a, b);
        assert_eq!(a.id, "17");
        assert_eq!(a.week, Some(Week::Regular(12)));
        assert_eq!(a.possession, Some(Side::Home));
        assert_eq!(a.waiting_on, Some(Side::Away));
    }

    #[test]
    fn unknown_enum_strings_do_not_fail_the_game() {
        let raw = r#"{ "id": 1, "status": "DELAYED", "gameType": "EXHIBITION", "possession": "NEITHER" }"#;
        let game: Game = serde_json::from_str::<WireGame>(raw).unwrap().into();
        assert_eq!(game.status, GameStatus::Pregame);
        assert_eq!(game.game_type, GameType::OutOfConference);
        assert_eq!(game.possession, None);
    }

    #[test]
    fn numeric_clocks_become_minutes_and_seconds() {
        let raw = r#"{ "content": [
            { "id": 1, "clock": 120 },
            { "id": 2, "clock": "07:05" },
            { "id": 3, "clock": 5 }
        ] }"#;
        let page: GamePage = serde_json::from_str::<GamePageResponse>(raw).unwrap().into();
        let clocks: Vec<Option<&str>> = page.games.iter().map(|g| g.clock.as_deref()).collect();
        assert_eq!(clocks, vec![Some("02:00"), Some("07:05"), Some("00:05")]);
        assert_eq!(page.games[0].seconds_remaining(), 120);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("FINAL"), GameStatus::Final);
        assert_eq!(parse_status("end_of_regulation"), GameStatus::EndOfRegulation);
        assert_eq!(parse_status("OVERTIME"), GameStatus::Overtime);
        assert_eq!(parse_status("PREGAME"), GameStatus::Pregame);
    }

    #[tokio::test]
    async fn fetch_games_sends_filters_and_reads_camel_case_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games/filtered")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("category".into(), "ONGOING".into()),
                Matcher::UrlEncoded("filters".into(), "RANKED_MATCHUP".into()),
                Matcher::UrlEncoded("sort".into(), "CLOSEST_TO_END".into()),
                Matcher::UrlEncoded("conference".into(), "SEC".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("size".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "content": [{ "id": 3, "homeTeam": "Georgia", "awayTeam": "Alabama" }],
                     "totalElements": 11, "totalPages": 2 }"#,
            )
            .create_async()
            .await;

        let query = GameQuery {
            category: GameCategory::Ongoing,
            tokens: vec!["RANKED_MATCHUP".into()],
            sort: Some(crate::SortOrder::ClosestToEnd),
            conference: Some("SEC".into()),
            page: 1,
            size: 10,
            ..Default::default()
        };
        let page = api_for(&server).fetch_games(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.total_elements, 11);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.games.len(), 1);
        assert_eq!(page.games[0].home_team, "Georgia");
    }

    #[tokio::test]
    async fn fetch_team_maps_404_to_none() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams/name/Unknown%20U")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let team = api_for(&server).fetch_team("Unknown U").await.unwrap();

        mock.assert_async().await;
        assert!(team.is_none());
    }

    #[tokio::test]
    async fn fetch_team_reads_rankings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/teams/name/Ohio%20State")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{ "name": "Ohio State", "abbreviation": "OSU", "conference": "Big Ten",
                     "coachesPollRanking": 3, "playoff_committee_ranking": 4 }"#,
            )
            .create_async()
            .await;

        let team = api_for(&server).fetch_team("Ohio State").await.unwrap().unwrap();
        assert_eq!(team.abbreviation, "OSU");
        assert_eq!(team.conference, "Big Ten");
        assert_eq!(team.best_rank(), Some(3));
        assert!(team.is_top_25());
    }

    #[tokio::test]
    async fn server_errors_are_retried_then_surface() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/info")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let result = api_for(&server).fetch_season().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Api(..))));
    }

    #[tokio::test]
    async fn session_token_is_sent_as_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/info")
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "currentSeason": 2026, "current_week": 5 }"#)
            .create_async()
            .await;

        let api = LeagueApi::new(Session::new(server.url()).with_token("s3cret")).unwrap();
        let season = api.fetch_season().await.unwrap();

        mock.assert_async().await;
        assert_eq!(season, SeasonInfo { season: 2026, week: 5 });
    }
}
