use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::forecast_strip::CARD_HEIGHT;
use super::location_header::HEADER_OVERHEAD;
use super::{Component, ForecastStrip, ForecastStripProps, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::sprites::{self, SPRITE_HEIGHT};
use crate::state::{CurrentConditions, ForecastEntry, format_temperature, format_wind_speed};

pub struct ResultsPanel;

pub struct ResultsPanelProps<'a> {
    pub current: &'a CurrentConditions,
    pub forecast: &'a [ForecastEntry],
    pub date_label: &'a str,
}

/// Fixed rows: blank, blank, temperature, condition, details, blank.
const LAYOUT_FIXED: u16 = 6;

/// Header caps: terminus(6), miniwi(4), plain(1), each plus HEADER_OVERHEAD.
const HEADER_TIERS: [u16; 3] = [6 + HEADER_OVERHEAD, 4 + HEADER_OVERHEAD, 1 + HEADER_OVERHEAD];

struct LayoutSizing {
    header_cap: u16,
    icon_h: u16,
    use_sprite: bool,
}

/// Prefer the sprite, shrinking the header font first; fall back to emoji.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &header_cap in &HEADER_TIERS {
        let budget = area_height.saturating_sub(header_cap + LAYOUT_FIXED + CARD_HEIGHT);
        if budget >= SPRITE_HEIGHT {
            return LayoutSizing {
                header_cap,
                icon_h: SPRITE_HEIGHT,
                use_sprite: true,
            };
        }
    }
    let header_cap = HEADER_TIERS
        .iter()
        .copied()
        .find(|&cap| cap + LAYOUT_FIXED + CARD_HEIGHT + 1 <= area_height)
        .unwrap_or(HEADER_TIERS[2]);
    LayoutSizing {
        header_cap,
        icon_h: 1,
        use_sprite: false,
    }
}

impl Component<Action> for ResultsPanel {
    type Props<'a> = ResultsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let sizing = compute_layout(area.height);
        let current = props.current;

        let chunks = Layout::vertical([
            Constraint::Max(sizing.header_cap),
            Constraint::Length(1),
            Constraint::Length(sizing.icon_h),
            Constraint::Length(1),
            Constraint::Length(1), // temperature
            Constraint::Length(1), // condition
            Constraint::Length(1), // humidity + wind
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
        ])
        .flex(Flex::Center)
        .split(area);

        let mut header = LocationHeader;
        header.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                name: &current.location_name,
                date_label: props.date_label,
                temperature: Some(current.temperature),
            },
        );

        let icon = current.icon();
        match sprites::icon_sprite(icon, chunks[2].height).filter(|_| sizing.use_sprite) {
            Some(art) => {
                frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), chunks[2]);
            }
            None => {
                frame.render_widget(Paragraph::new(Line::from(icon.emoji()).centered()), chunks[2]);
            }
        }

        let temperature = Line::from(Span::styled(
            format_temperature(current.temperature),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(temperature), chunks[4]);

        let condition = Line::from(Span::styled(
            current.condition_label.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(condition), chunks[5]);

        let label = Style::default().fg(Color::DarkGray);
        let details = Line::from(vec![
            Span::styled("Humidity ", label),
            Span::raw(format!("{}%", current.humidity)),
            Span::styled("   Wind ", label),
            Span::raw(format_wind_speed(current.wind_speed)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(details), chunks[6]);

        let mut strip = ForecastStrip;
        strip.render(
            frame,
            chunks[8],
            ForecastStripProps {
                entries: props.forecast,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_layout_prefers_sprite() {
        let tall = compute_layout(40);
        assert!(tall.use_sprite);
        assert_eq!(tall.header_cap, HEADER_TIERS[0]);

        // Room for the sprite only once the header shrinks
        let medium = compute_layout(HEADER_TIERS[2] + LAYOUT_FIXED + CARD_HEIGHT + SPRITE_HEIGHT);
        assert!(medium.use_sprite);
        assert_eq!(medium.header_cap, HEADER_TIERS[2]);

        let short = compute_layout(18);
        assert!(!short.use_sprite);
        assert_eq!(short.icon_h, 1);
        assert_eq!(short.header_cap, HEADER_TIERS[1]);
    }
}
