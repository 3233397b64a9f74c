use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::{Component, palette};
use crate::action::Action;
use crate::state::WeatherReport;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Renders the aggregate result area: hint, loading, error, or one column
/// per city report
pub struct ResultsBody;

pub struct ResultsBodyProps<'a> {
    pub comparison: &'a DataResource<Vec<WeatherReport>>,
}

impl Component<Action> for ResultsBody {
    type Props<'a> = ResultsBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.comparison {
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Loaded(reports) => render_reports(frame, area, reports),
            DataResource::Loading => render_message(frame, area, "Loading..."),
            DataResource::Empty => render_hint(frame, area),
        }
    }
}

fn report_lines(report: &WeatherReport) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            report.city.clone(),
            Style::default().fg(Color::Cyan).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("{:.1}°C", report.temperature),
            Style::default().fg(temperature_color(report.temperature)).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            report.description.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("humidity {}%", report.humidity),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("wind {:.1} m/s", report.wind_speed),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ]
}

fn temperature_color(celsius: f32) -> Color {
    let ((r, g, b), _) = palette::temperature_band(celsius);
    Color::Rgb(r, g, b)
}

fn render_reports(frame: &mut Frame, area: Rect, reports: &[WeatherReport]) {
    if reports.is_empty() {
        render_hint(frame, area);
        return;
    }

    let rows = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .split(area);

    let columns = Layout::horizontal(
        reports
            .iter()
            .map(|_| Constraint::Ratio(1, reports.len() as u32))
            .collect::<Vec<_>>(),
    )
    .split(rows[0]);

    for (report, column) in reports.iter().zip(columns.iter()) {
        frame.render_widget(Paragraph::new(report_lines(report)), *column);
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let msg = Line::from(vec![Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    let rows = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(Paragraph::new(msg), rows[0]);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Type city names, press ", Style::default().fg(Color::DarkGray)),
        Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to compare weather", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    let rows = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(Paragraph::new(hint), rows[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}
