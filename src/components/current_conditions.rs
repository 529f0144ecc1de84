use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::dates::format_day;
use crate::icons::weather_icon;
use crate::state::CurrentConditions;

pub struct CurrentConditionsView;

pub struct CurrentConditionsProps<'a> {
    pub city: Option<&'a str>,
    pub conditions: &'a CurrentConditions,
}

/// Rows taken by everything except the big temperature
pub const FIXED_ROWS: u16 = 7;
/// Rows for the FIGlet temperature (terminus height)
pub const TEMP_CAP: u16 = 6;

/// One secondary reading: value with its unit, and what it measures
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub value: String,
    pub label: &'static str,
}

/// Secondary readings in display order
pub fn metrics(c: &CurrentConditions) -> [Metric; 6] {
    [
        Metric {
            value: format!("{}°C", c.apparent_temperature),
            label: "Apparent Temperature",
        },
        Metric {
            value: format!("{} km/h", c.wind_speed),
            label: "Wind Speed",
        },
        Metric {
            value: format!("{}%", c.relative_humidity),
            label: "Humidity",
        },
        Metric {
            value: format!("{} mm", c.precipitation),
            label: "Precipitation",
        },
        Metric {
            value: format!("{} mm", c.rain),
            label: "Rain",
        },
        Metric {
            value: format!("{} cm", c.snowfall),
            label: "Snowfall",
        },
    ]
}

pub fn temperature_label(c: &CurrentConditions) -> String {
    format!("{}°C", c.temperature)
}

impl Component<Action> for CurrentConditionsView {
    type Props<'a> = CurrentConditionsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let c = props.conditions;
        let chunks = Layout::vertical([
            Constraint::Length(1),        // City
            Constraint::Length(1),        // Date
            Constraint::Length(1),        // Glyph
            Constraint::Length(TEMP_CAP), // Temperature
            Constraint::Length(1),        // Spacer
            Constraint::Length(2),        // Metrics, first row
            Constraint::Length(2),        // Metrics, second row
        ])
        .flex(Flex::Start)
        .split(area);

        let city = Line::from(Span::styled(
            props.city.unwrap_or_default().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(city), chunks[0]);

        let date = Line::from(Span::styled(
            format_day(&c.time),
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(date), chunks[1]);

        let glyph = Line::from(weather_icon(c.weather_code)).centered();
        frame.render_widget(Paragraph::new(glyph), chunks[2]);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(c.temperature as f32));
        frame.render_widget(ArtBox::new(&renderer, &temperature_label(c)), chunks[3]);

        let [first, second] = split_metrics(metrics(c));
        render_metric_row(frame, chunks[5], &first);
        render_metric_row(frame, chunks[6], &second);
    }
}

fn split_metrics(metrics: [Metric; 6]) -> [Vec<Metric>; 2] {
    let mut first = Vec::from(metrics);
    let second = first.split_off(3);
    [first, second]
}

fn render_metric_row(frame: &mut Frame, area: Rect, row: &[Metric]) {
    let cells = Layout::horizontal(vec![Constraint::Ratio(1, row.len().max(1) as u32); row.len()])
        .split(area);
    for (metric, cell) in row.iter().zip(cells.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                metric.value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(metric.label, Style::default().fg(Color::Gray))).centered(),
        ];
        frame.render_widget(Paragraph::new(lines), *cell);
    }
}

fn temperature_gradient(celsius: f32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(200, 230, 255),
        ),
        t if t < 15.0 => (
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(150, 220, 200),
        ),
        t if t < 25.0 => (
            ArtColor::rgb(100, 200, 150),
            ArtColor::rgb(255, 220, 100),
        ),
        t if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),
            ArtColor::rgb(255, 120, 80),
        ),
        _ => (
            ArtColor::rgb(255, 100, 80),
            ArtColor::rgb(255, 60, 60),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
