use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::filter_menu::FilterMenuPopup;
use crate::components::scoreboard::ScoreboardTable;
use crate::state::filter_menu::FilterField;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::scoreboard::{LoadPhase, ScoreboardViewModel};
use crate::ui::layout::LayoutAreas;

const HELP_TEXT: &str = "\
Tabs      1 Ongoing   2 Past   3 Scrimmages   4 Past Scrimmages   ? Help
Paging    h/l or ←/→ previous/next page    g/G first/last page
          +/- rows per page (10/25/50)
Rows      j/k or ↓/↑ move selection
Filters   f open menu    j/k field    h/l or space change value
          Enter apply    Esc cancel (pending edits are discarded)
Other     r refresh    \" toggle logs    F full screen    q quit

Live listings refresh themselves every 30 seconds.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.active_scoreboard() {
            Some(view) => {
                draw_scoreboard(f, layout.main, app, view);
                draw_footer(f, layout.footer, view);
                if app.is_filter_menu_open() {
                    f.render_widget(
                        FilterMenuPopup {
                            filters: view.filters(),
                            cursor: app.state.filter_menu.cursor,
                            title: view.category().label(),
                        },
                        layout.main,
                    );
                }
            }
            None => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let listings: Vec<MenuItem> =
        MenuItem::TABS.into_iter().filter(|t| t.category().is_some()).collect();
    let shown = match app.state.active_tab {
        MenuItem::Help => app.state.previous_tab,
        tab => tab,
    };
    let tab_index = listings.iter().position(|t| *t == shown).unwrap_or(0);

    let titles: Vec<Line> = listings.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App, view: &ScoreboardViewModel) {
    let block = default_border(Color::White).title(format!(" {} ", view.category().label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !view.is_mounted() {
        let msg = if app.state.season_loaded { "Loading games..." } else { "Loading season..." };
        draw_centered_message(f, inner, msg, Color::DarkGray);
        return;
    }

    let [summary_area, banner_area, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if matches!(view.phase(), LoadPhase::Error(_)) { 2 } else { 0 }),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(filter_summary(view)).style(Style::default().fg(Color::DarkGray)),
        summary_area,
    );

    if let LoadPhase::Error(message) = view.phase() {
        f.render_widget(
            Paragraph::new(format!("Failed to load games: {message}  (r to retry)"))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true }),
            banner_area,
        );
        return;
    }

    if view.entries().is_empty() {
        let msg = if view.is_loading() { "Loading games..." } else { "No games found" };
        draw_centered_message(f, table_area, msg, Color::DarkGray);
        return;
    }

    f.render_widget(
        ScoreboardTable {
            entries: view.entries(),
            selected: view.selected,
        },
        table_area,
    );
}

/// One line naming every active filter that narrows the listing.
fn filter_summary(view: &ScoreboardViewModel) -> Line<'static> {
    let active = view.filters().active();
    let mut spans: Vec<Span> = FilterField::ALL
        .iter()
        .filter_map(|field| {
            let value = field.display(active);
            let shown = match field {
                FilterField::Sort => view.category().is_live(),
                _ => !matches!(value.as_str(), "All" | "No"),
            };
            shown.then(|| Span::raw(format!("{}: {value}   ", field.label())))
        })
        .collect();
    if view.filters().has_unapplied_changes() {
        spans.push(Span::styled("(unapplied changes)", Style::default().fg(Color::Yellow)));
    }
    if spans.is_empty() {
        spans.push(Span::raw("No filters   f to filter"));
    }
    Line::from(spans)
}

fn draw_footer(f: &mut Frame, area: Rect, view: &ScoreboardViewModel) {
    let pagination = view.pagination();
    let total_pages = pagination.total_pages();
    let page = if total_pages == 0 { 0 } else { pagination.page() + 1 };
    let mut text = format!(
        " Page {page}/{total_pages} | {} games | {} per page",
        pagination.total_elements(),
        pagination.rows_per_page()
    );
    if let Some(updated) = view.last_updated.as_deref() {
        text.push_str(&format!(" | updated {updated}"));
    }
    if let Some(entry) = view.selected_entry() {
        let game = &entry.game;
        text.push_str(&format!(" | {} {}", game.game_type.label(), game.season));
        if let Some(week) = &game.week {
            text.push_str(&format!(" wk {week}"));
        }
    }
    f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::Gray)), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Green))
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_centered_message(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Gray)), inner);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
