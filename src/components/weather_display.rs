use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::current_conditions::{FIXED_ROWS, TEMP_CAP};
use super::forecast_list::required_height;
use super::{
    Component, CurrentConditionsProps, CurrentConditionsView, ForecastListProps, ForecastListView,
    SearchInput, SearchInputProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root view: query input, loading line, current conditions, upcoming days
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchInput,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let search_props = SearchInputProps {
            query: &props.state.query,
            is_focused: props.is_focused,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchQuerySubmit,
        };
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let current = state.renderable_current();
        let current_h = if current.is_some() {
            FIXED_ROWS + TEMP_CAP
        } else {
            0
        };
        let daily_h = state.daily.as_ref().map(required_height).unwrap_or(0);

        let chunks = Layout::vertical([
            Constraint::Length(3),         // Input
            Constraint::Length(1),         // Loading / hint
            Constraint::Length(current_h), // Current conditions
            Constraint::Length(1),         // Spacer
            Constraint::Length(daily_h),   // Upcoming days
            Constraint::Fill(1),           // Filler
            Constraint::Length(1),         // Help bar
        ])
        .split(area);

        self.search.render(
            frame,
            chunks[0],
            SearchInputProps {
                query: &state.query,
                is_focused: props.is_focused,
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchQuerySubmit,
            },
        );

        if let Some(status) = status_line(state) {
            frame.render_widget(Paragraph::new(status.centered()), chunks[1]);
        }

        if let Some(conditions) = current {
            let mut view = CurrentConditionsView;
            view.render(
                frame,
                chunks[2],
                CurrentConditionsProps {
                    city: state.city.as_deref(),
                    conditions,
                },
            );
        }

        if let Some(daily) = &state.daily {
            let mut view = ForecastListView;
            view.render(frame, chunks[4], ForecastListProps { daily });
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[6],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn status_line(state: &AppState) -> Option<Line<'static>> {
    if state.is_loading {
        return Some(Line::from(vec![
            Span::styled(state.spinner_frame(), Style::default().fg(Color::Cyan)),
            Span::styled(" ...Loading", Style::default().fg(Color::DarkGray)),
        ]));
    }
    if state.renderable_current().is_none() && state.daily.is_none() {
        return Some(Line::from(Span::styled(
            "Type a city name to see the weather",
            Style::default().fg(Color::DarkGray),
        )));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CurrentConditions, DailyForecast};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn loaded_state() -> AppState {
        AppState {
            query: "Kyiv".into(),
            city: Some("Kyiv".into()),
            current: Some(CurrentConditions {
                time: "2024-03-05T10:00".into(),
                temperature: 7.5,
                wind_speed: 14.3,
                weather_code: 3,
                ..Default::default()
            }),
            daily: Some(DailyForecast {
                time: vec!["2024-03-05".into(), "2024-03-06".into(), "2024-03-07".into()],
                temperature_min: vec![1.0, 2.0, 3.0],
                temperature_max: vec![9.0, 10.0, 11.0],
                weather_code: vec![3, 61, 0],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_handle_event_typing() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("k")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchQueryChange("k".into()));
    }

    #[test]
    fn test_handle_event_quit() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("k")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = WeatherDisplay::new();

        let state = AppState {
            query: "Kyiv".into(),
            is_loading: true,
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading"), "no loading line:\n{output}");
        assert!(output.contains("Kyiv"), "query not echoed:\n{output}");
    }

    #[test]
    fn test_render_weather() {
        let mut render = RenderHarness::new(90, 30);
        let mut component = WeatherDisplay::new();
        let state = loaded_state();

        let output = render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Mar 5, 2024"), "current date missing:\n{output}");
        assert!(output.contains("Mar 6, 2024"), "forecast missing:\n{output}");
        assert!(output.contains("3°C - 11°C"), "forecast range missing:\n{output}");
        assert!(!output.contains("Loading"));
    }
}
