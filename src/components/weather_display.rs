use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, NotFoundPanel, NotFoundPanelProps, ResultsPanel, ResultsPanelProps,
    SearchPromptPanel, SearchPromptPanelProps,
};
use crate::action::Action;
use crate::state::{AppState, DisplayState};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main weather display: exactly one of the three panels, a status line and key hints
#[derive(Default)]
pub struct WeatherDisplay;

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::WeatherRefresh),
                KeyCode::Char('/') => Some(Action::SearchFocus),
                KeyCode::Char('v') => Some(Action::VoiceStart),
                KeyCode::Esc if props.state.notice.is_some() => Some(Action::UiDismissNotice),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Active panel
            Constraint::Length(1), // Notice / loading line
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        match (&state.display, &state.current) {
            (DisplayState::Results, Some(current)) => {
                let mut panel = ResultsPanel;
                panel.render(
                    frame,
                    chunks[0],
                    ResultsPanelProps {
                        current,
                        forecast: &state.forecast,
                        date_label: &state.date_label,
                    },
                );
            }
            (DisplayState::NotFound, _) => {
                let mut panel = NotFoundPanel;
                panel.render(
                    frame,
                    chunks[0],
                    NotFoundPanelProps {
                        query: state.not_found_query.as_deref(),
                    },
                );
            }
            _ => {
                let mut panel = SearchPromptPanel;
                panel.render(
                    frame,
                    chunks[0],
                    SearchPromptPanelProps {
                        error: state.last_error.as_ref(),
                        voice_available: state.voice.is_available(),
                    },
                );
            }
        }

        if let Some(line) = status_line(state) {
            frame.render_widget(Paragraph::new(line.centered()), chunks[1]);
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("v", "voice"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// Notice wins over the loading hint
fn status_line(state: &AppState) -> Option<Line<'static>> {
    if let Some(notice) = &state.notice {
        return Some(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    state.is_loading().then(|| {
        Line::from(Span::styled(
            "Fetching weather...",
            Style::default().fg(Color::DarkGray),
        ))
    })
}
