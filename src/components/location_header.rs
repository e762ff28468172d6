use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub name: &'a str,
    pub date_label: &'a str,
    pub temperature: Option<f64>,
}

/// Rows inside the header besides the FIGlet name: 1 spacer + 1 date line.
pub const HEADER_OVERHEAD: u16 = 2;

/// Upper bound (exclusive, °C) and gradient endpoints of each band
const TEMPERATURE_BANDS: [(f64, (u8, u8, u8), (u8, u8, u8)); 4] = [
    (0.0, (140, 190, 255), (210, 235, 255)),
    (12.0, (90, 170, 250), (140, 215, 205)),
    (24.0, (110, 205, 140), (250, 215, 110)),
    (32.0, (250, 175, 90), (250, 125, 85)),
];
const HOT_BAND: ((u8, u8, u8), (u8, u8, u8)) = ((250, 95, 80), (235, 55, 60));
const NO_DATA_BAND: ((u8, u8, u8), (u8, u8, u8)) = ((175, 175, 180), (220, 220, 225));

/// Gradient endpoints picked by temperature band
fn gradient_colors(temp: Option<f64>) -> (ArtColor, ArtColor) {
    let (start, end) = match temp {
        None => NO_DATA_BAND,
        Some(t) => TEMPERATURE_BANDS
            .iter()
            .find(|(limit, _, _)| t < *limit)
            .map(|(_, start, end)| (*start, *end))
            .unwrap_or(HOT_BAND),
    };
    (
        ArtColor::rgb(start.0, start.1, start.2),
        ArtColor::rgb(end.0, end.1, end.2),
    )
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet location name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Date
        ])
        .split(area);

        let (start, end) = gradient_colors(props.temperature);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::horizontal(start, end)));

        frame.render_widget(ArtBox::new(&renderer, props.name), chunks[0]);

        let date_line = Line::from(vec![Span::styled(
            props.date_label.to_string(),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(date_line), chunks[2]);
    }
}
