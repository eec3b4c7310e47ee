use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::model::LineSeries;
use crate::util::axis_date;

use super::super::state::TuiState;

const WEEK_SECS: f64 = 604_800.0;

/// Render the weekly totals as a line chart with the selected week marked.
pub fn draw_line_view(f: &mut Frame, area: Rect, series: &LineSeries, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|p| (p.timestamp.timestamp() as f64, p.commit_count as f64))
        .collect();
    let marker: Vec<(f64, f64)> = data.get(state.selected).copied().into_iter().collect();

    let (x_min, x_max) = match (data.first(), data.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => (first.0, last.0),
        (Some(first), _) => (first.0, first.0 + WEEK_SECS),
        _ => (0.0, WEEK_SECS),
    };
    let peak = series.peak().map(|p| p.commit_count).unwrap_or(0).max(1) as f64;

    let x_labels: Vec<Span> = match (series.points.first(), series.points.last()) {
        (Some(first), Some(last)) => {
            let middle = &series.points[series.points.len() / 2];
            vec![
                Span::raw(axis_date(&first.timestamp)),
                Span::raw(axis_date(&middle.timestamp)),
                Span::raw(axis_date(&last.timestamp)),
            ]
        }
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", (peak / 2.0).round())),
        Span::raw(format!("{}", peak)),
    ];

    let datasets = vec![
        Dataset::default()
            .name("Commits")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .data(&marker),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(series.title.clone())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .x_axis(
            Axis::default()
                .title("Week")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Commits")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, peak])
                .labels(y_labels),
        );
    f.render_widget(chart, chunks[0]);

    let footer = match series.points.get(state.selected) {
        Some(point) => Line::from(vec![
            Span::styled("Week of ", Style::default().fg(Color::White)),
            Span::styled(
                axis_date(&point.timestamp),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": "),
            Span::styled(point.label.clone(), Style::default().fg(Color::Green)),
        ]),
        None => Line::from("No data"),
    };
    let footer = Paragraph::new(footer).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[1]);
}
