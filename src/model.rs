use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub const DAYS_PER_WEEK: usize = 7;

/// Row labels of the heatmap. Index matches `WeeklyActivityRecord::days`.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One week of commit activity as returned by the GitHub stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivityRecord {
    /// Week start, Unix seconds.
    pub week: i64,
    pub total: u32,
    /// Sunday first.
    pub days: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub commit_count: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeries {
    pub title: String,
    pub points: Vec<LineSeriesPoint>,
}

impl LineSeries {
    /// Busiest week; the earliest one wins a tie.
    pub fn peak(&self) -> Option<&LineSeriesPoint> {
        self.points
            .iter()
            .fold(None, |best: Option<&LineSeriesPoint>, p| match best {
                Some(b) if b.commit_count >= p.commit_count => Some(b),
                _ => Some(p),
            })
    }

    pub fn total_commits(&self) -> u64 {
        self.points.iter().map(|p| p.commit_count as u64).sum()
    }
}

/// Weekday x week grid of commit counts.
///
/// `rows[d][w]` is the count for weekday `d` (see [`WEEKDAY_LABELS`]) in the
/// week starting at `weeks[w]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapMatrix {
    pub rows: [Vec<u32>; DAYS_PER_WEEK],
    pub weeks: Vec<DateTime<Utc>>,
}

impl HeatmapMatrix {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn column(&self, week: usize) -> Option<[u32; DAYS_PER_WEEK]> {
        if week >= self.weeks.len() {
            return None;
        }
        Some(std::array::from_fn(|day| self.rows[day][week]))
    }

    pub fn weekday_totals(&self) -> [u64; DAYS_PER_WEEK] {
        std::array::from_fn(|day| self.rows[day].iter().map(|&c| c as u64).sum())
    }

    pub fn max_cell(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapOutput {
    pub title: String,
    pub labels: Vec<String>,
    #[serde(flatten)]
    pub matrix: HeatmapMatrix,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub day: String,
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityExport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub line: LineSeries,
    pub heatmap: HeatmapOutput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(secs: i64, count: u32) -> LineSeriesPoint {
        LineSeriesPoint {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            commit_count: count,
            label: format!("{count} commits"),
        }
    }

    #[test]
    fn peak_prefers_earliest_on_tie() {
        let series = LineSeries {
            title: String::new(),
            points: vec![point(0, 3), point(604_800, 9), point(1_209_600, 9)],
        };
        let peak = series.peak().unwrap();
        assert_eq!(peak.timestamp.timestamp(), 604_800);
        assert_eq!(series.total_commits(), 21);
    }

    #[test]
    fn peak_of_empty_series_is_none() {
        let series = LineSeries { title: String::new(), points: Vec::new() };
        assert!(series.peak().is_none());
    }

    #[test]
    fn matrix_helpers() {
        let matrix = HeatmapMatrix {
            rows: [
                vec![1, 0],
                vec![0, 1],
                vec![0, 0],
                vec![1, 0],
                vec![1, 1],
                vec![1, 1],
                vec![1, 0],
            ],
            weeks: vec![
                Utc.timestamp_opt(0, 0).unwrap(),
                Utc.timestamp_opt(604_800, 0).unwrap(),
            ],
        };
        assert_eq!(matrix.column(1), Some([0, 1, 0, 0, 1, 1, 0]));
        assert_eq!(matrix.column(2), None);
        assert_eq!(matrix.weekday_totals(), [1, 1, 0, 1, 2, 2, 1]);
        assert_eq!(matrix.max_cell(), 1);
    }
}
