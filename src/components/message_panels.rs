//! The two non-results panels: search prompt and not found

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::state::FetchError;

pub struct SearchPromptPanel;

pub struct SearchPromptPanelProps<'a> {
    /// Failure of the last lookup, if that is why we are back here
    pub error: Option<&'a FetchError>,
    pub voice_available: bool,
}

impl Component<Action> for SearchPromptPanel {
    type Props<'a> = SearchPromptPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = centered_rows(area, 5);

        let (icon, title, detail) = match props.error {
            Some(error) => (
                Line::from(ERROR_ICON).centered(),
                Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold())).centered(),
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Rgb(200, 100, 100)),
                ))
                .centered(),
            ),
            None => (
                Line::from("\u{1f50d}").centered(),
                Line::from(Span::styled("Search City", Style::default().bold())).centered(),
                Line::from(Span::styled(
                    "Find out the weather conditions of any city",
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
            ),
        };

        let mut hint = vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("/", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" to search", Style::default().fg(Color::DarkGray)),
        ];
        if props.voice_available {
            hint.push(Span::styled(", ", Style::default().fg(Color::DarkGray)));
            hint.push(Span::styled("v", Style::default().fg(Color::Cyan).bold()));
            hint.push(Span::styled(" to speak", Style::default().fg(Color::DarkGray)));
        }

        frame.render_widget(Paragraph::new(icon), chunks[0]);
        frame.render_widget(Paragraph::new(title), chunks[1]);
        frame.render_widget(Paragraph::new(detail), chunks[2]);
        frame.render_widget(Paragraph::new(Line::from(hint).centered()), chunks[4]);
    }
}

pub struct NotFoundPanel;

pub struct NotFoundPanelProps<'a> {
    pub query: Option<&'a str>,
}

impl Component<Action> for NotFoundPanel {
    type Props<'a> = NotFoundPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = centered_rows(area, 5);

        let detail = match props.query {
            Some(query) => format!("Nothing matches \"{query}\""),
            None => "Nothing matches that search".to_string(),
        };

        frame.render_widget(Paragraph::new(Line::from("\u{1f5fa}\u{fe0f}").centered()), chunks[0]);
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    "Search City Not Found",
                    Style::default().fg(Color::Yellow).bold(),
                ))
                .centered(),
            ),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(detail, Style::default().fg(Color::Gray))).centered(),
            ),
            chunks[2],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(" to try another city", Style::default().fg(Color::DarkGray)),
                ])
                .centered(),
            ),
            chunks[4],
        );
    }
}

fn centered_rows(area: Rect, rows: usize) -> std::rc::Rc<[Rect]> {
    Layout::vertical(vec![Constraint::Length(1); rows])
        .flex(Flex::Center)
        .split(area)
}
