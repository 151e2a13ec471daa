use crate::state::filter_menu::FilterField;
use crate::state::filter_spec::FilterSpecification;
use tui::buffer::Buffer;
use tui::layout::{Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

pub const POPUP_WIDTH: u16 = 44;
pub const POPUP_HEIGHT: u16 = FilterField::ALL.len() as u16 + 5;

/// Overlay listing every filter field with its pending value. Fields that
/// differ from what is applied are starred.
pub struct FilterMenuPopup<'a> {
    pub filters: &'a FilterSpecification,
    pub cursor: usize,
    pub title: &'a str,
}

impl<'a> Widget for FilterMenuPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Filters: {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let [fields_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);

        let pending = self.filters.pending();
        let active = self.filters.active();
        let lines: Vec<Line> = FilterField::ALL
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let value = field.display(pending);
                let changed = value != field.display(active);
                let selected = idx == self.cursor;
                let label_style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(vec![
                    Span::styled(if selected { "> " } else { "  " }, label_style),
                    Span::styled(format!("{:<16}", field.label()), label_style),
                    Span::styled(
                        if selected { format!("< {value} >") } else { value },
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(if changed { " *" } else { "" }, Style::default().fg(Color::Yellow)),
                ])
            })
            .collect();
        Paragraph::new(lines).render(fields_area, buf);

        Paragraph::new(vec![
            Line::from(""),
            Line::from("j/k field  h/l change  Enter apply  Esc cancel"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .render(hint_area, buf);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
