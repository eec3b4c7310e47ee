use crate::model::{HeatmapMatrix, LineSeries};

/// Both chart views built from one fetch.
pub struct ActivityViews {
    pub repository: String,
    pub series: LineSeries,
    pub matrix: HeatmapMatrix,
}

impl ActivityViews {
    pub fn week_count(&self) -> usize {
        self.series.points.len()
    }
}

pub struct TuiState {
    pub selected: usize,
    pub view_mode: ViewMode,
    pub show_help: bool,
    pub week_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Line,
    Heatmap,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Line, ViewMode::Heatmap];

    pub fn index(self) -> usize {
        match self {
            ViewMode::Line => 0,
            ViewMode::Heatmap => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Line => "Line",
            ViewMode::Heatmap => "Heatmap",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl TuiState {
    /// Starts on the most recent week.
    pub fn new(week_count: usize, view_mode: ViewMode) -> Self {
        Self {
            selected: week_count.saturating_sub(1),
            view_mode,
            show_help: false,
            week_count,
        }
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.week_count.saturating_sub(1));
    }
}
