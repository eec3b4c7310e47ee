use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{HeatmapMatrix, WEEKDAY_LABELS};
use crate::util::{axis_date, heatmap_title};

use super::super::{
    draw::{get_intensity_color, heat_cell_color, intensity_bar},
    layout::visible_weeks,
    state::TuiState,
};

const LABEL_WIDTH: u16 = 5;
const CELL_WIDTH: u16 = 2;

/// Render the weekday x week grid and a side panel for the selected week.
pub fn draw_heatmap_view(f: &mut Frame, area: Rect, matrix: &HeatmapMatrix, repository: &str, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let capacity = (chunks[0].width.saturating_sub(2 + LABEL_WIDTH) / CELL_WIDTH).max(1) as usize;
    let window = visible_weeks(state.selected, matrix.week_count(), capacity);
    let max = matrix.max_cell();

    let mut lines = Vec::with_capacity(WEEKDAY_LABELS.len() + 2);
    if let (Some(first), Some(last)) = (matrix.weeks.get(window.start), window.end.checked_sub(1).and_then(|i| matrix.weeks.get(i))) {
        lines.push(Line::from(Span::styled(
            format!("{} .. {}", axis_date(first), axis_date(last)),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    for (label, row) in WEEKDAY_LABELS.iter().zip(matrix.rows.iter()) {
        let mut spans = Vec::with_capacity(window.len() + 1);
        spans.push(Span::styled(
            format!("{label:<width$}", width = LABEL_WIDTH as usize),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        for week in window.clone() {
            let count = row[week];
            let mut style = Style::default().fg(heat_cell_color(count, max));
            if week == state.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled("■ ", style));
        }
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(format!("{} | Press 'h' for help", heatmap_title(repository)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(grid, chunks[0]);

    draw_week_panel(f, chunks[1], matrix, state);
}

/// Render the right-hand panel: per-day counts of the selected week and weekday totals.
pub fn draw_week_panel(f: &mut Frame, area: Rect, matrix: &HeatmapMatrix, state: &TuiState) {
    let Some(column) = matrix.column(state.selected) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    let week_total: u32 = column.iter().sum();
    let week_max = column.iter().copied().max().unwrap_or(0);

    let mut week_lines = vec![
        Line::from(vec![
            Span::styled("Week of ", Style::default().fg(Color::White)),
            Span::styled(
                axis_date(&matrix.weeks[state.selected]),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Commits: ", Style::default().fg(Color::White)),
            Span::styled(format!("{week_total}"), Style::default().fg(Color::Green)),
        ]),
    ];
    for (label, count) in WEEKDAY_LABELS.iter().zip(column) {
        week_lines.push(Line::from(vec![
            Span::styled(format!("{label} "), Style::default().fg(Color::White)),
            Span::styled(format!("{count:>4} "), get_intensity_color(count, week_max)),
            Span::styled(intensity_bar(count, week_max, 6), Style::default().fg(Color::Magenta)),
        ]));
    }

    let week_panel = Paragraph::new(week_lines).block(
        Block::default()
            .title("Selected Week")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(week_panel, chunks[0]);

    let totals = matrix.weekday_totals();
    let busiest = totals.iter().copied().max().unwrap_or(0);
    let mut total_lines = vec![Line::from(Span::styled(
        "All Weeks",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    for (label, total) in WEEKDAY_LABELS.iter().zip(totals) {
        let style = if total == busiest && busiest > 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        total_lines.push(Line::from(vec![
            Span::styled(format!("{label} "), Style::default().fg(Color::White)),
            Span::styled(format!("{total:>6}"), style),
        ]));
    }

    let totals_panel = Paragraph::new(total_lines).block(
        Block::default()
            .title("Weekday Totals")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(totals_panel, chunks[1]);
}
