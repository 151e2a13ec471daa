use crate::state::scoreboard::ScoreboardEntry;
use cfb_api::{GameStatus, PLACEHOLDER, Side};
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Cell, Row, StatefulWidget, Table, TableState, Widget};

const HEADER: [&str; 12] = [
    "", "Away", "Home", "Score", "Status", "Qtr", "Clock", "Down", "Ball on", "Poss", "Waiting", "Conf",
];

const WIDTHS: [Constraint; 12] = [
    Constraint::Length(1),
    Constraint::Min(10),
    Constraint::Min(10),
    Constraint::Length(7),
    Constraint::Length(10),
    Constraint::Length(4),
    Constraint::Length(5),
    Constraint::Length(9),
    Constraint::Length(9),
    Constraint::Length(6),
    Constraint::Length(7),
    Constraint::Min(6),
];

/// Table of one page of games. Rows arrive already filtered and ordered.
pub struct ScoreboardTable<'a> {
    pub entries: &'a [ScoreboardEntry],
    pub selected: usize,
}

impl<'a> Widget for ScoreboardTable<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(HEADER.iter().map(|h| Cell::from(*h)))
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows = self.entries.iter().enumerate().map(|(idx, entry)| {
            let marker = if idx == self.selected { ">" } else { " " };
            let cells = std::iter::once(marker.to_string()).chain(row_cells(entry));
            Row::new(cells.map(Cell::from)).style(row_style(entry))
        });

        let table = Table::new(rows, WIDTHS)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(Some(self.selected));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

fn row_style(entry: &ScoreboardEntry) -> Style {
    match entry.game.status {
        GameStatus::Final => Style::default().fg(Color::DarkGray),
        status if status.is_live() => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::Gray),
    }
}

/// Display text for every column after the selection marker.
pub fn row_cells(entry: &ScoreboardEntry) -> [String; 11] {
    let game = &entry.game;
    let home = entry.label(Side::Home);
    let away = entry.label(Side::Away);
    let dash = || PLACEHOLDER.to_string();

    [
        team_cell(entry, Side::Away),
        team_cell(entry, Side::Home),
        format!("{}-{}", game.away_score, game.home_score),
        game.status.label().to_string(),
        game.quarter_label(),
        game.clock_label(),
        game.down_and_distance().unwrap_or_else(dash),
        game.field_position(home, away).unwrap_or_else(dash),
        side_cell(entry, game.possession),
        side_cell(entry, game.waiting_on),
        conference_cell(entry),
    ]
}

fn team_cell(entry: &ScoreboardEntry, side: Side) -> String {
    let label = entry.label(side);
    match entry.rank(side) {
        Some(rank) => format!("#{rank} {label}"),
        None => label.to_string(),
    }
}

fn side_cell(entry: &ScoreboardEntry, side: Option<Side>) -> String {
    match side {
        Some(side) if entry.game.is_live() => entry.label(side).to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn conference_cell(entry: &ScoreboardEntry) -> String {
    let home = entry.home.as_ref().map(|t| t.conference.as_str()).filter(|c| !c.is_empty());
    let away = entry.away.as_ref().map(|t| t.conference.as_str()).filter(|c| !c.is_empty());
    match (away, home) {
        (Some(a), Some(h)) if a.eq_ignore_ascii_case(h) => h.to_string(),
        (Some(a), Some(h)) => format!("{a}/{h}"),
        (Some(c), None) | (None, Some(c)) => c.to_string(),
        (None, None) => PLACEHOLDER.to_string(),
    }
}
