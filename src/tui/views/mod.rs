use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

mod heatmap;
mod help;
mod line;

pub use heatmap::{draw_heatmap_view, draw_week_panel};
pub use help::draw_help_overlay;
pub use line::draw_line_view;

use super::state::{ActivityViews, TuiState, ViewMode};

/// Draw one full frame: tab bar plus the active view, or the help overlay.
pub fn draw_frame(f: &mut Frame, views: &ActivityViews, state: &TuiState) {
    let size = f.size();

    if state.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);

    let tabs = Tabs::new(ViewMode::ALL.iter().map(|m| m.title()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(views.repository.clone()))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .select(state.view_mode.index());
    f.render_widget(tabs, chunks[0]);

    match state.view_mode {
        ViewMode::Line => draw_line_view(f, chunks[1], &views.series, state),
        ViewMode::Heatmap => draw_heatmap_view(f, chunks[1], &views.matrix, &views.repository, state),
    }
}
