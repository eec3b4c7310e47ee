use crate::error::{ActivityError, Result};
use crate::model::{HeatmapMatrix, LineSeries, LineSeriesPoint, WeeklyActivityRecord, DAYS_PER_WEEK};
use crate::util::{epoch_to_datetime, locale_date};

/// Chronological (week, total) series with a title spanning the first and last week.
pub fn to_line_series(records: &[WeeklyActivityRecord], repository: &str) -> Result<LineSeries> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ActivityError::EmptyInput),
    };

    let points = records
        .iter()
        .map(|record| {
            Ok(LineSeriesPoint {
                timestamp: epoch_to_datetime(record.week)?,
                commit_count: record.total,
                label: format!("{} commits", record.total),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let title = format!(
        "Commits to the {} repo ({} - {})",
        repository,
        locale_date(&epoch_to_datetime(first.week)?),
        locale_date(&epoch_to_datetime(last.week)?),
    );

    Ok(LineSeries { title, points })
}

/// Pivots per-day counts into one row per weekday, Sunday first.
pub fn to_heatmap_matrix(records: &[WeeklyActivityRecord]) -> Result<HeatmapMatrix> {
    if records.is_empty() {
        return Err(ActivityError::EmptyInput);
    }

    if let Some((index, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.days.len() != DAYS_PER_WEEK)
    {
        return Err(ActivityError::MalformedRecord { index, len: record.days.len() });
    }

    let mut rows: [Vec<u32>; DAYS_PER_WEEK] =
        std::array::from_fn(|_| Vec::with_capacity(records.len()));
    let mut weeks = Vec::with_capacity(records.len());

    for record in records {
        for (row, &count) in rows.iter_mut().zip(&record.days) {
            row.push(count);
        }
        weeks.push(epoch_to_datetime(record.week)?);
    }

    Ok(HeatmapMatrix { rows, weeks })
}

/// Rejects the first record whose day counts do not add up to its total.
pub fn validate_totals(records: &[WeeklyActivityRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let sum: u64 = record.days.iter().map(|&d| d as u64).sum();
        if sum != record.total as u64 {
            return Err(ActivityError::TotalMismatch { index, total: record.total, sum });
        }
    }
    Ok(())
}
