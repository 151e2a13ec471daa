use crate::state::filter::RANKED_MATCHUP;
use crate::state::filter_spec::{FilterEdit, FilterValues};
use cfb_api::{GameStatus, GameType, SeasonInfo, Week};

pub const CONFERENCES: [&str; 11] = [
    "ACC",
    "American",
    "Big 12",
    "Big Ten",
    "C-USA",
    "FBS Independents",
    "MAC",
    "Mountain West",
    "Pac-12",
    "SEC",
    "Sun Belt",
];

pub const REGULAR_SEASON_WEEKS: u8 = 12;
const WEEK_MARKERS: [&str; 2] = ["CCG", "POSTSEASON"];
const EARLIEST_SEASON: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Conference,
    GameType,
    Status,
    RankedOnly,
    RankedMatchup,
    Season,
    Week,
    Sort,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Conference,
        FilterField::GameType,
        FilterField::Status,
        FilterField::RankedOnly,
        FilterField::RankedMatchup,
        FilterField::Season,
        FilterField::Week,
        FilterField::Sort,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Conference => "Conference",
            FilterField::GameType => "Game type",
            FilterField::Status => "Status",
            FilterField::RankedOnly => "Top 25 only",
            FilterField::RankedMatchup => "Ranked matchup",
            FilterField::Season => "Season",
            FilterField::Week => "Week",
            FilterField::Sort => "Sort",
        }
    }

    pub fn display(&self, values: &FilterValues) -> String {
        let all = || "All".to_string();
        match self {
            FilterField::Conference => values.conference.clone().unwrap_or_else(all),
            FilterField::GameType => values.game_type.map(|t| t.label().to_string()).unwrap_or_else(all),
            FilterField::Status => values.status.map(|s| s.label().to_string()).unwrap_or_else(all),
            FilterField::RankedOnly => yes_no(values.ranked_only),
            FilterField::RankedMatchup => yes_no(values.tokens.contains(RANKED_MATCHUP)),
            FilterField::Season => values.season.map(|s| s.to_string()).unwrap_or_else(all),
            FilterField::Week => values.week.as_ref().map(Week::to_string).unwrap_or_else(all),
            FilterField::Sort => values.sort.label().to_string(),
        }
    }

    /// The edit that steps this field to its next (or previous) value.
    pub fn step(&self, values: &FilterValues, forward: bool, season: Option<SeasonInfo>) -> FilterEdit {
        match self {
            FilterField::Conference => {
                let current = values
                    .conference
                    .as_deref()
                    .and_then(|c| CONFERENCES.iter().position(|x| x.eq_ignore_ascii_case(c)));
                FilterEdit::Conference(cycle(&CONFERENCES, current, forward).map(str::to_string))
            }
            FilterField::GameType => {
                let current = values.game_type.and_then(|t| GameType::ALL.iter().position(|x| *x == t));
                FilterEdit::GameType(cycle(&GameType::ALL, current, forward))
            }
            FilterField::Status => {
                let current = values.status.and_then(|s| GameStatus::ALL.iter().position(|x| *x == s));
                FilterEdit::Status(cycle(&GameStatus::ALL, current, forward))
            }
            FilterField::RankedOnly => FilterEdit::RankedOnly(!values.ranked_only),
            FilterField::RankedMatchup => FilterEdit::ToggleToken(RANKED_MATCHUP.to_string()),
            FilterField::Season => FilterEdit::Season(step_season(values.season, forward, season)),
            FilterField::Week => {
                let options = week_options();
                let current = values.week.as_ref().and_then(|w| options.iter().position(|x| x == w));
                FilterEdit::Week(cycle(&options, current, forward))
            }
            FilterField::Sort => FilterEdit::Sort(values.sort.toggle()),
        }
    }
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

/// Walk `options` with an extra "All" slot (`None`) before the first entry.
fn cycle<T: Clone>(options: &[T], current: Option<usize>, forward: bool) -> Option<T> {
    let len = options.len();
    if len == 0 {
        return None;
    }
    let next = match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(i), true) if i + 1 < len => Some(i + 1),
        (Some(_), true) => None,
        (Some(0), false) => None,
        (Some(i), false) => Some(i - 1),
    };
    next.and_then(|i| options.get(i).cloned())
}

fn week_options() -> Vec<Week> {
    (1..=REGULAR_SEASON_WEEKS)
        .map(Week::Regular)
        .chain(WEEK_MARKERS.iter().map(|m| Week::Marker(m.to_string())))
        .collect()
}

/// Seasons run from the current one backwards; unset sits above the newest.
fn step_season(current: Option<u32>, forward: bool, season: Option<SeasonInfo>) -> Option<u32> {
    let newest = season.map(|s| s.season);
    match (current, forward) {
        (None, true) => newest,
        (None, false) => None,
        (Some(s), true) if s <= EARLIEST_SEASON => Some(s),
        (Some(s), true) => Some(s - 1),
        (Some(s), false) if newest.is_none_or(|n| s >= n) => None,
        (Some(s), false) => Some(s + 1),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterMenuState {
    pub open: bool,
    pub cursor: usize,
}

impl FilterMenuState {
    pub fn field(&self) -> FilterField {
        FilterField::ALL[self.cursor % FilterField::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % FilterField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.cursor = (self.cursor + FilterField::ALL.len() - 1) % FilterField::ALL.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conference_cycle_passes_through_all() {
        let mut values = FilterValues::default();
        let edit = FilterField::Conference.step(&values, true, None);
        assert_eq!(edit, FilterEdit::Conference(Some("ACC".into())));

        values.conference = Some("Sun Belt".into());
        assert_eq!(FilterField::Conference.step(&values, true, None), FilterEdit::Conference(None));
        assert_eq!(
            FilterField::Conference.step(&values, false, None),
            FilterEdit::Conference(Some("SEC".into()))
        );
    }

    #[test]
    fn week_cycle_reaches_postseason_markers() {
        let values = FilterValues { week: Some(Week::Regular(12)), ..Default::default() };
        assert_eq!(
            FilterField::Week.step(&values, true, None),
            FilterEdit::Week(Some(Week::Marker("CCG".into())))
        );
    }

    #[test]
    fn season_steps_back_from_current() {
        let info = Some(SeasonInfo { season: 2026, week: 3 });
        let values = FilterValues::default();
        assert_eq!(FilterField::Season.step(&values, true, info), FilterEdit::Season(Some(2026)));

        let values = FilterValues { season: Some(2026), ..Default::default() };
        assert_eq!(FilterField::Season.step(&values, true, info), FilterEdit::Season(Some(2025)));
        assert_eq!(FilterField::Season.step(&values, false, info), FilterEdit::Season(None));
    }

    #[test]
    fn cursor_wraps() {
        let mut menu = FilterMenuState::default();
        menu.prev_field();
        assert_eq!(menu.field(), FilterField::Sort);
        menu.next_field();
        assert_eq!(menu.field(), FilterField::Conference);
    }
}
