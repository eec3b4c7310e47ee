use crate::model::{
    ActivityExport, HeatmapMatrix, HeatmapOutput, HeatmapRow, LineSeries, SCHEMA_VERSION, WEEKDAY_LABELS,
};
use crate::util::{axis_date, heatmap_title};
use anyhow::Result;
use chrono::Utc;
use console::style;

const BAR_WIDTH: usize = 40;
const HEAT_GLYPHS: [&str; 5] = ["·", "░", "▒", "▓", "█"];

pub fn heatmap_output(matrix: &HeatmapMatrix, repository: &str) -> HeatmapOutput {
    HeatmapOutput {
        title: heatmap_title(repository),
        labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
        matrix: matrix.clone(),
    }
}

pub fn heatmap_rows(matrix: &HeatmapMatrix) -> Vec<HeatmapRow> {
    WEEKDAY_LABELS
        .iter()
        .zip(matrix.rows.iter())
        .map(|(day, counts)| HeatmapRow { day: day.to_string(), counts: counts.clone() })
        .collect()
}

pub fn export_document(series: &LineSeries, matrix: &HeatmapMatrix, repository: &str) -> ActivityExport {
    ActivityExport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repository.to_string(),
        line: series.clone(),
        heatmap: heatmap_output(matrix, repository),
    }
}

pub fn output_line_json(series: &LineSeries) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(series)?);
    Ok(())
}

pub fn output_line_ndjson(series: &LineSeries) -> Result<()> {
    for point in &series.points {
        println!("{}", serde_json::to_string(point)?);
    }
    Ok(())
}

pub fn output_heat_json(matrix: &HeatmapMatrix, repository: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&heatmap_output(matrix, repository))?);
    Ok(())
}

pub fn output_heat_ndjson(matrix: &HeatmapMatrix) -> Result<()> {
    for row in heatmap_rows(matrix) {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

pub fn output_export_json(doc: &ActivityExport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}

pub fn output_export_ndjson(series: &LineSeries, matrix: &HeatmapMatrix) -> Result<()> {
    output_line_ndjson(series)?;
    output_heat_ndjson(matrix)
}

/// Bar proportional to `value / max`, padded to `width`.
pub fn scaled_bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return " ".repeat(width);
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    "█".repeat(filled) + &" ".repeat(width - filled)
}

/// Glyph for a heatmap cell, five levels from empty to peak.
pub fn heat_glyph(value: u32, max: u32) -> &'static str {
    if max == 0 || value == 0 {
        return HEAT_GLYPHS[0];
    }
    let level = ((value as f64 / max as f64) * (HEAT_GLYPHS.len() - 1) as f64).ceil() as usize;
    HEAT_GLYPHS[level.clamp(1, HEAT_GLYPHS.len() - 1)]
}

pub fn output_line_chart(series: &LineSeries) -> Result<()> {
    let max = series.points.iter().map(|p| p.commit_count).max().unwrap_or(0);

    println!("{}", style(&series.title).bold());
    println!("{}", "─".repeat(BAR_WIDTH + 28));

    for point in &series.points {
        println!(
            "{} {} {:>12}",
            axis_date(&point.timestamp),
            style(scaled_bar(point.commit_count, max, BAR_WIDTH)).green(),
            point.label
        );
    }

    if let Some(peak) = series.peak() {
        println!(
            "\n{} {} on week of {}, {} commits over {} weeks",
            style("Peak:").bold(),
            peak.label,
            axis_date(&peak.timestamp),
            series.total_commits(),
            series.points.len()
        );
    }
    Ok(())
}

pub fn output_heatmap(matrix: &HeatmapMatrix, repository: &str) -> Result<()> {
    let max = matrix.max_cell();

    println!("{}", style(heatmap_title(repository)).bold());
    if let (Some(first), Some(last)) = (matrix.weeks.first(), matrix.weeks.last()) {
        println!("{} .. {}", axis_date(first), axis_date(last));
    }
    println!("{}", "─".repeat(matrix.week_count() + 5));

    let totals = matrix.weekday_totals();
    for ((label, row), total) in WEEKDAY_LABELS.iter().zip(matrix.rows.iter()).zip(totals) {
        let cells: String = row.iter().map(|&c| heat_glyph(c, max)).collect();
        println!("{label}  {}  {}", style(cells).green(), style(total).dim());
    }

    println!("\n{}", style("Legend").bold());
    println!("  {} none .. {} commits/day", style(HEAT_GLYPHS.concat()).green(), max);
    Ok(())
}
