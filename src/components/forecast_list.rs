use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::dates::format_day;
use crate::icons::weather_icon;
use crate::state::DailyForecast;

pub struct ForecastListView;

pub struct ForecastListProps<'a> {
    pub daily: &'a DailyForecast,
}

/// Display-ready row for one upcoming day
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub icon: &'static str,
    pub date: String,
    pub range: String,
}

/// Rows for every day after today
pub fn forecast_rows(daily: &DailyForecast) -> Vec<ForecastRow> {
    daily
        .upcoming()
        .map(|day| ForecastRow {
            icon: weather_icon(day.weather_code),
            date: format_day(day.date),
            range: format!("{}°C - {}°C", day.temperature_min, day.temperature_max),
        })
        .collect()
}

/// Height needed to show every row inside the border
pub fn required_height(daily: &DailyForecast) -> u16 {
    daily.upcoming().count() as u16 + 2
}

impl Component<Action> for ForecastListView {
    type Props<'a> = ForecastListProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines: Vec<Line> = forecast_rows(props.daily)
            .into_iter()
            .map(|row| {
                Line::from(vec![
                    Span::raw(format!(" {}  ", row.icon)),
                    Span::styled(format!("{:<14}", row.date), Style::default().fg(Color::Gray)),
                    Span::styled(row.range, Style::default().fg(Color::Cyan)),
                ])
            })
            .collect();

        let block = Block::bordered()
            .title(" Next days ")
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
