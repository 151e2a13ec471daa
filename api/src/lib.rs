pub mod client;
pub mod wire;

use std::fmt;

/// Shown in place of quarter/clock whenever those values are not meaningful.
pub const PLACEHOLDER: &str = "--";

// ---------------------------------------------------------------------------
// Domain types: canonical model, independent of the backend's field naming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub status: GameStatus,
    /// 1–4 regulation, 5 = first overtime, 6+ = later overtimes.
    pub quarter: Option<u8>,
    /// "mm:ss" as sent by the server.
    pub clock: Option<String>,
    pub down: Option<u8>,
    pub yards_to_go: Option<u8>,
    /// Yard marker 0–100. Lower numbers are nearer the home end zone.
    pub ball_location: Option<u8>,
    pub possession: Option<Side>,
    pub waiting_on: Option<Side>,
    pub game_type: GameType,
    pub season: u32,
    pub week: Option<Week>,
    /// 0 = unranked.
    pub home_rank: u8,
    pub away_rank: u8,
}

impl AsRef<Game> for Game {
    fn as_ref(&self) -> &Game {
        self
    }
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn rank(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home_rank,
            Side::Away => self.away_rank,
        }
    }

    /// Either side carries a top-25 ranking on the game record itself.
    pub fn is_ranked_matchup(&self) -> bool {
        is_top_25(self.home_rank) || is_top_25(self.away_rank)
    }

    /// Time left in the current quarter, in seconds. Missing or malformed
    /// clocks count as zero.
    pub fn seconds_remaining(&self) -> u32 {
        self.clock.as_deref().map(parse_clock).unwrap_or(0)
    }

    pub fn quarter_label(&self) -> String {
        if !self.is_live() {
            return PLACEHOLDER.to_string();
        }
        if self.status == GameStatus::Halftime {
            return "HALF".to_string();
        }
        match self.quarter.unwrap_or(0) {
            0 => PLACEHOLDER.to_string(),
            q @ 1..=4 => format!("Q{q}"),
            5 => "OT".to_string(),
            q => format!("{}OT", q - 4),
        }
    }

    pub fn clock_label(&self) -> String {
        if !self.is_live() || self.status == GameStatus::Halftime {
            return PLACEHOLDER.to_string();
        }
        self.clock
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// "3rd & 7", or "& Goal" when the line to gain is at or past the goal line.
    pub fn down_and_distance(&self) -> Option<String> {
        if !self.is_live() {
            return None;
        }
        let down = self.down.filter(|d| (1..=4).contains(d))?;
        let to_go = self.yards_to_go?;
        let ordinal = match down {
            1 => "1st",
            2 => "2nd",
            3 => "3rd",
            _ => "4th",
        };
        let goal_to_go = self
            .possession
            .zip(self.ball_location)
            .map(|(side, loc)| to_go >= yards_to_goal(side, loc))
            .unwrap_or(false);
        if goal_to_go {
            Some(format!("{ordinal} & Goal"))
        } else {
            Some(format!("{ordinal} & {to_go}"))
        }
    }

    /// Field position using one rule everywhere: markers below 50 are on the
    /// home side, above 50 on the away side, labelled with the owning team.
    pub fn field_position(&self, home_label: &str, away_label: &str) -> Option<String> {
        if !self.is_live() {
            return None;
        }
        let loc = self.ball_location?.min(100);
        Some(match loc.cmp(&50) {
            std::cmp::Ordering::Equal => "50".to_string(),
            std::cmp::Ordering::Less => format!("{home_label} {loc}"),
            std::cmp::Ordering::Greater => format!("{away_label} {}", 100 - loc),
        })
    }
}

/// Home defends the 0 end zone and attacks toward 100; away the reverse.
pub fn yards_to_goal(offense: Side, ball_location: u8) -> u8 {
    let loc = ball_location.min(100);
    match offense {
        Side::Home => 100 - loc,
        Side::Away => loc,
    }
}

pub fn is_top_25(rank: u8) -> bool {
    (1..=25).contains(&rank)
}

/// Parse "mm:ss" (or bare seconds) into seconds. Anything else is zero.
pub fn parse_clock(clock: &str) -> u32 {
    let clock = clock.trim();
    match clock.split_once(':') {
        Some((m, s)) => {
            let minutes = m.trim().parse::<u32>().unwrap_or(0);
            let seconds = s.trim().parse::<u32>().unwrap_or(0);
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .unwrap_or(0)
        }
        None => clock.parse::<u32>().unwrap_or(0),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Pregame,
    OpeningKickoff,
    InProgress,
    Halftime,
    Overtime,
    Final,
    EndOfRegulation,
}

impl GameStatus {
    pub const ALL: [GameStatus; 7] = [
        GameStatus::Pregame,
        GameStatus::OpeningKickoff,
        GameStatus::InProgress,
        GameStatus::Halftime,
        GameStatus::Overtime,
        GameStatus::Final,
        GameStatus::EndOfRegulation,
    ];

    /// States in which quarter and clock mean something.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            GameStatus::OpeningKickoff
                | GameStatus::InProgress
                | GameStatus::Halftime
                | GameStatus::Overtime
        )
    }

    pub fn is_final(&self) -> bool {
        matches!(self, GameStatus::Final | GameStatus::EndOfRegulation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pregame => "PREGAME",
            GameStatus::OpeningKickoff => "OPENING_KICKOFF",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Halftime => "HALFTIME",
            GameStatus::Overtime => "OVERTIME",
            GameStatus::Final => "FINAL",
            GameStatus::EndOfRegulation => "END_OF_REGULATION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::Pregame => "Pregame",
            GameStatus::OpeningKickoff => "Kickoff",
            GameStatus::InProgress => "Live",
            GameStatus::Halftime => "Halftime",
            GameStatus::Overtime => "OT",
            GameStatus::Final => "Final",
            GameStatus::EndOfRegulation => "End of Reg",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameType {
    #[default]
    OutOfConference,
    ConferenceGame,
    ConferenceChampionship,
    Playoffs,
    NationalChampionship,
    Bowl,
    Scrimmage,
}

impl GameType {
    pub const ALL: [GameType; 7] = [
        GameType::OutOfConference,
        GameType::ConferenceGame,
        GameType::ConferenceChampionship,
        GameType::Playoffs,
        GameType::NationalChampionship,
        GameType::Bowl,
        GameType::Scrimmage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::OutOfConference => "OUT_OF_CONFERENCE",
            GameType::ConferenceGame => "CONFERENCE_GAME",
            GameType::ConferenceChampionship => "CONFERENCE_CHAMPIONSHIP",
            GameType::Playoffs => "PLAYOFFS",
            GameType::NationalChampionship => "NATIONAL_CHAMPIONSHIP",
            GameType::Bowl => "BOWL",
            GameType::Scrimmage => "SCRIMMAGE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameType::OutOfConference => "Non-Conference",
            GameType::ConferenceGame => "Conference",
            GameType::ConferenceChampionship => "Conf. Championship",
            GameType::Playoffs => "Playoffs",
            GameType::NationalChampionship => "National Championship",
            GameType::Bowl => "Bowl",
            GameType::Scrimmage => "Scrimmage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "HOME",
            Side::Away => "AWAY",
        }
    }
}

/// Regular-season weeks are numbered; postseason weeks carry a marker such as "CCG".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Week {
    Regular(u8),
    Marker(String),
}

impl Week {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<u8>() {
            Ok(n) => Week::Regular(n),
            Err(_) => Week::Marker(raw.to_uppercase()),
        })
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Week::Regular(n) => write!(f, "{n}"),
            Week::Marker(m) => f.write_str(m),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSummary {
    pub name: String,
    pub abbreviation: String,
    pub logo: Option<String>,
    pub conference: String,
    /// 0 = unranked.
    pub coaches_poll_ranking: u8,
    pub playoff_committee_ranking: u8,
}

impl TeamSummary {
    pub fn is_top_25(&self) -> bool {
        is_top_25(self.coaches_poll_ranking) || is_top_25(self.playoff_committee_ranking)
    }

    /// Best of the two rankings, if the team holds one.
    pub fn best_rank(&self) -> Option<u8> {
        [self.coaches_poll_ranking, self.playoff_committee_ranking]
            .into_iter()
            .filter(|r| *r > 0)
            .min()
    }
}

/// One page of games plus the server's counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePage {
    pub games: Vec<Game>,
    pub total_elements: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonInfo {
    pub season: u32,
    pub week: u8,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Which listing a view shows. Also sent to the server as `category`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameCategory {
    #[default]
    Ongoing,
    Past,
    Scrimmage,
    PastScrimmage,
}

impl GameCategory {
    pub const ALL: [GameCategory; 4] = [
        GameCategory::Ongoing,
        GameCategory::Past,
        GameCategory::Scrimmage,
        GameCategory::PastScrimmage,
    ];

    pub fn is_live(&self) -> bool {
        matches!(self, GameCategory::Ongoing | GameCategory::Scrimmage)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCategory::Ongoing => "ONGOING",
            GameCategory::Past => "PAST",
            GameCategory::Scrimmage => "SCRIMMAGE",
            GameCategory::PastScrimmage => "PAST_SCRIMMAGE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameCategory::Ongoing => "Ongoing Games",
            GameCategory::Past => "Past Games",
            GameCategory::Scrimmage => "Scrimmages",
            GameCategory::PastScrimmage => "Past Scrimmages",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    ClosestToEnd,
    MostTimeRemaining,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::ClosestToEnd => "CLOSEST_TO_END",
            SortOrder::MostTimeRemaining => "MOST_TIME_REMAINING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::ClosestToEnd => "Closest to end",
            SortOrder::MostTimeRemaining => "Most time remaining",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortOrder::ClosestToEnd => SortOrder::MostTimeRemaining,
            SortOrder::MostTimeRemaining => SortOrder::ClosestToEnd,
        }
    }
}

/// Everything the game listing endpoint filters on server-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameQuery {
    pub category: GameCategory,
    pub tokens: Vec<String>,
    pub sort: Option<SortOrder>,
    pub conference: Option<String>,
    pub season: Option<u32>,
    pub week: Option<Week>,
    pub page: usize,
    pub size: usize,
}

impl GameQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("category", self.category.as_str().to_string())];
        if !self.tokens.is_empty() {
            pairs.push(("filters", self.tokens.join(",")));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(conference) = &self.conference {
            pairs.push(("conference", conference.clone()));
        }
        if let Some(season) = self.season {
            pairs.push(("season", season.to_string()));
        }
        if let Some(week) = &self.week {
            pairs.push(("week", week.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(quarter: u8, clock: &str) -> Game {
        Game {
            status: GameStatus::InProgress,
            quarter: Some(quarter),
            clock: Some(clock.into()),
            ..Default::default()
        }
    }

    #[test]
    fn final_games_hide_quarter_and_clock() {
        let game = Game {
            status: GameStatus::Final,
            quarter: Some(4),
            clock: Some("00:00".into()),
            ..Default::default()
        };
        assert_eq!(game.quarter_label(), PLACEHOLDER);
        assert_eq!(game.clock_label(), PLACEHOLDER);

        let end_of_reg = Game { status: GameStatus::EndOfRegulation, ..game };
        assert_eq!(end_of_reg.quarter_label(), PLACEHOLDER);
        assert_eq!(end_of_reg.clock_label(), PLACEHOLDER);
    }

    #[test]
    fn overtime_quarters_are_labelled() {
        assert_eq!(live(2, "10:00").quarter_label(), "Q2");
        assert_eq!(live(5, "10:00").quarter_label(), "OT");
        assert_eq!(live(7, "10:00").quarter_label(), "3OT");
    }

    #[test]
    fn clock_parsing_tolerates_garbage() {
        assert_eq!(parse_clock("02:00"), 120);
        assert_eq!(parse_clock("14:59"), 899);
        assert_eq!(parse_clock("45"), 45);
        assert_eq!(parse_clock("soon"), 0);
        assert_eq!(parse_clock("99999999:00"), 0);
        assert_eq!(parse_clock("4294967295:59"), 0);
        assert_eq!(Game::default().seconds_remaining(), 0);
    }

    #[test]
    fn field_position_uses_one_rule_for_both_halves() {
        let mut game = live(1, "12:00");
        game.ball_location = Some(25);
        assert_eq!(game.field_position("OSU", "MICH").as_deref(), Some("OSU 25"));
        game.ball_location = Some(75);
        assert_eq!(game.field_position("OSU", "MICH").as_deref(), Some("MICH 25"));
        game.ball_location = Some(50);
        assert_eq!(game.field_position("OSU", "MICH").as_deref(), Some("50"));
    }

    #[test]
    fn goal_to_go_depends_on_direction_of_attack() {
        let mut game = live(3, "05:00");
        game.down = Some(1);
        game.yards_to_go = Some(10);
        game.ball_location = Some(95);
        game.possession = Some(Side::Home);
        assert_eq!(game.down_and_distance().as_deref(), Some("1st & Goal"));

        game.possession = Some(Side::Away);
        assert_eq!(game.down_and_distance().as_deref(), Some("1st & 10"));
    }

    #[test]
    fn weeks_parse_numbers_and_markers() {
        assert_eq!(Week::parse("7"), Some(Week::Regular(7)));
        assert_eq!(Week::parse("ccg"), Some(Week::Marker("CCG".into())));
        assert_eq!(Week::parse(" "), None);
        assert_eq!(Week::Regular(12).to_string(), "12");
    }

    #[test]
    fn query_pairs_skip_unset_fields() {
        let query = GameQuery {
            category: GameCategory::Past,
            season: Some(2026),
            page: 2,
            size: 25,
            ..Default::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("category", "PAST".to_string()),
                ("season", "2026".to_string()),
                ("page", "2".to_string()),
                ("size", "25".to_string()),
            ]
        );
    }
}
