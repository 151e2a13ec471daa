use cfb_api::{GameCategory, GameStatus, GameType, SeasonInfo, SortOrder, Week};
use std::collections::BTreeSet;

/// One complete set of filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues {
    /// `None` means all conferences.
    pub conference: Option<String>,
    pub game_type: Option<GameType>,
    pub status: Option<GameStatus>,
    pub ranked_only: bool,
    pub season: Option<u32>,
    pub week: Option<Week>,
    pub sort: SortOrder,
    pub tokens: BTreeSet<String>,
}

impl FilterValues {
    /// Defaults for a freshly mounted view. Past listings open on the
    /// current season and week; live listings are not narrowed.
    pub fn seeded(category: GameCategory, season: Option<SeasonInfo>) -> Self {
        let mut values = Self::default();
        if !category.is_live()
            && let Some(info) = season
        {
            values.season = Some(info.season);
            values.week = Some(Week::Regular(info.week));
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Conference(Option<String>),
    GameType(Option<GameType>),
    Status(Option<GameStatus>),
    RankedOnly(bool),
    Season(Option<u32>),
    Week(Option<Week>),
    Sort(SortOrder),
    ToggleToken(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Applied,
    Editing,
}

/// Pending edits and the applied snapshot, kept apart so a half-edited
/// filter never reaches the data.
#[derive(Debug, Clone, Default)]
pub struct FilterSpecification {
    pending: FilterValues,
    active: FilterValues,
}

impl FilterSpecification {
    pub fn new(initial: FilterValues) -> Self {
        Self {
            pending: initial.clone(),
            active: initial,
        }
    }

    pub fn pending(&self) -> &FilterValues {
        &self.pending
    }

    pub fn active(&self) -> &FilterValues {
        &self.active
    }

    /// Editing exactly while pending diverges from active.
    pub fn state(&self) -> FilterState {
        if self.has_unapplied_changes() {
            FilterState::Editing
        } else {
            FilterState::Applied
        }
    }

    pub fn has_unapplied_changes(&self) -> bool {
        self.pending != self.active
    }

    /// Touches the pending snapshot only.
    pub fn edit(&mut self, edit: FilterEdit) {
        let pending = &mut self.pending;
        match edit {
            FilterEdit::Conference(conference) => {
                pending.conference = conference.filter(|c| {
                    let c = c.trim();
                    !c.is_empty() && !c.eq_ignore_ascii_case("all")
                })
            }
            FilterEdit::GameType(game_type) => pending.game_type = game_type,
            FilterEdit::Status(status) => pending.status = status,
            FilterEdit::RankedOnly(ranked_only) => pending.ranked_only = ranked_only,
            FilterEdit::Season(season) => pending.season = season,
            FilterEdit::Week(week) => pending.week = week,
            FilterEdit::Sort(sort) => pending.sort = sort,
            FilterEdit::ToggleToken(token) => {
                if !pending.tokens.remove(&token) {
                    pending.tokens.insert(token);
                }
            }
        }
    }

    /// Replace the active snapshot wholesale with the pending one.
    pub fn apply(&mut self) -> &FilterValues {
        self.active = self.pending.clone();
        &self.active
    }

    /// Throw away pending edits.
    pub fn cancel(&mut self) {
        self.pending = self.active.clone();
    }
}
