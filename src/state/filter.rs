use crate::state::scoreboard::ScoreboardEntry;
use cfb_api::{GameStatus, GameType, TeamSummary};
use std::collections::BTreeSet;

/// Token asking for games with at least one top-25 team.
pub const RANKED_MATCHUP: &str = "RANKED_MATCHUP";

/// A conjunction of independent predicates. Every unset field matches
/// everything, so the default value is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePredicates {
    /// Either side's conference. `None`, empty and "All" match everything.
    pub conference: Option<String>,
    /// Either side holds a coaches-poll or committee ranking in 1..=25.
    pub top_25_only: bool,
    /// Allowed game types; empty allows every type.
    pub game_types: BTreeSet<GameType>,
    pub status: Option<GameStatus>,
    /// Compared as text so "CCG" and "7" are handled alike.
    pub week: Option<String>,
    pub season: Option<u32>,
    /// Only `RANKED_MATCHUP` is evaluated here. Other tokens are server-side.
    pub tokens: BTreeSet<String>,
}

impl GamePredicates {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, entry: &ScoreboardEntry) -> bool {
        self.matches_conference(entry)
            && self.matches_top_25(entry)
            && self.matches_game_type(entry)
            && self.matches_status(entry)
            && self.matches_week(entry)
            && self.matches_season(entry)
            && self.matches_tokens(entry)
    }

    fn matches_conference(&self, entry: &ScoreboardEntry) -> bool {
        let Some(target) = self.conference.as_deref().map(str::trim) else {
            return true;
        };
        if target.is_empty() || target.eq_ignore_ascii_case("all") {
            return true;
        }
        entry
            .teams()
            .any(|t| t.conference.eq_ignore_ascii_case(target))
    }

    fn matches_top_25(&self, entry: &ScoreboardEntry) -> bool {
        !self.top_25_only || entry.teams().any(TeamSummary::is_top_25)
    }

    fn matches_game_type(&self, entry: &ScoreboardEntry) -> bool {
        self.game_types.is_empty() || self.game_types.contains(&entry.game.game_type)
    }

    fn matches_status(&self, entry: &ScoreboardEntry) -> bool {
        self.status.is_none_or(|s| s == entry.game.status)
    }

    fn matches_week(&self, entry: &ScoreboardEntry) -> bool {
        let Some(target) = self.week.as_deref() else {
            return true;
        };
        entry
            .game
            .week
            .as_ref()
            .is_some_and(|w| w.to_string().eq_ignore_ascii_case(target.trim()))
    }

    fn matches_season(&self, entry: &ScoreboardEntry) -> bool {
        self.season.is_none_or(|s| s == entry.game.season)
    }

    fn matches_tokens(&self, entry: &ScoreboardEntry) -> bool {
        !self.tokens.contains(RANKED_MATCHUP) || entry.is_ranked_matchup()
    }
}

/// Keep the entries matching every active predicate, in input order.
///
/// Team-dependent predicates (conference, top 25) can only match against
/// resolved team data, so a game whose two lookups both failed is dropped
/// whenever one of them is active.
pub fn filter_games(entries: &[ScoreboardEntry], predicates: &GamePredicates) -> Vec<ScoreboardEntry> {
    if predicates.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|e| predicates.matches(e))
        .cloned()
        .collect()
}
