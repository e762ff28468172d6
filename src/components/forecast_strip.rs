use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::dates::forecast_date_label;
use crate::state::{ForecastEntry, format_temperature};

/// Width of one day card, borders included
pub const CARD_WIDTH: u16 = 10;
/// Height of one day card: date, icon, temperature plus borders
pub const CARD_HEIGHT: u16 = 5;

pub struct ForecastStrip;

pub struct ForecastStripProps<'a> {
    pub entries: &'a [ForecastEntry],
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.entries.is_empty() || area.height == 0 {
            return;
        }

        // Only as many cards as fit; the strip keeps chronological order
        let fit = usize::from((area.width / CARD_WIDTH).max(1));
        let shown = &props.entries[..props.entries.len().min(fit)];

        let cards = Layout::horizontal(shown.iter().map(|_| Constraint::Length(CARD_WIDTH)))
            .flex(Flex::Center)
            .split(area);

        for (entry, card_area) in shown.iter().zip(cards.iter()) {
            render_card(frame, *card_area, entry);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, entry: &ForecastEntry) {
    let date = forecast_date_label(&entry.timestamp).unwrap_or_else(|| entry.timestamp.clone());
    let lines = vec![
        Line::from(Span::styled(date, Style::default().fg(Color::Gray))).centered(),
        Line::from(entry.icon().emoji()).centered(),
        Line::from(Span::styled(
            format_temperature(entry.temperature),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(70, 70, 85)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
