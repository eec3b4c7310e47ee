//! SVG rendering of the line series and the weekday heatmap.
//!
//! Each chart is drawn onto an SVG backend that borrows an owned `String`;
//! the drawing area is presented and dropped before the string is returned.

use crate::error::{ActivityError, Result};
use crate::model::{HeatmapMatrix, LineSeries, DAYS_PER_WEEK, WEEKDAY_LABELS};
use crate::util::axis_date;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{
    ChartBuilder, DrawingArea, DrawingBackend, IntoDrawingArea, RGBColor, Rectangle, SVGBackend, WHITE,
};
use plotters::series::LineSeries as Polyline;
use plotters::style::Color;

const LINE_SIZE: (u32, u32) = (1024, 480);
const HEATMAP_HEIGHT: u32 = 350;
const HEATMAP_CELL: u32 = 14;
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const EMPTY_CELL: RGBColor = RGBColor(235, 237, 240);

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn render_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ActivityError {
    ActivityError::Render(err.to_string())
}

pub fn line_chart_svg(series: &LineSeries) -> Result<String> {
    if series.points.is_empty() {
        return Err(ActivityError::EmptyInput);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, LINE_SIZE).into_drawing_area();
        draw_line_chart(&root, series).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

pub fn heatmap_svg(matrix: &HeatmapMatrix, title: &str) -> Result<String> {
    if matrix.week_count() == 0 {
        return Err(ActivityError::EmptyInput);
    }

    let width = (matrix.week_count() as u32 * HEATMAP_CELL + 140).max(480);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, HEATMAP_HEIGHT)).into_drawing_area();
        draw_heatmap(&root, matrix, title).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

fn draw_line_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, series: &LineSeries) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let x_max = series.points.len().saturating_sub(1).max(1) as f64;
    let peak = series.points.iter().map(|p| p.commit_count).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(&series.title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..peak as f64 * 1.1)?;

    let week_label = |x: &f64| {
        series
            .points
            .get(x.round().max(0.0) as usize)
            .map(|p| axis_date(&p.timestamp))
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_desc("Week")
        .y_desc("Commits")
        .x_labels(8)
        .x_label_formatter(&week_label)
        .draw()?;

    chart.draw_series(Polyline::new(
        series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.commit_count as f64)),
        LINE_COLOR.stroke_width(2),
    ))?;

    Ok(())
}

/// Green ramp from light to dark by `value / max`.
fn cell_color(value: u32, max: u32) -> RGBColor {
    if max == 0 || value == 0 {
        return EMPTY_CELL;
    }
    let t = value as f64 / max as f64;
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(lerp(198, 33), lerp(228, 110), lerp(139, 57))
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    matrix: &HeatmapMatrix,
    title: &str,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let weeks = matrix.week_count() as f64;
    let max = matrix.max_cell();
    let top = DAYS_PER_WEEK as f64 - 0.5;

    // Row d is centred on y = 6 - d so Sunday sits on top.
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..weeks, -0.5f64..top)?;

    let week_label = |x: &f64| {
        matrix
            .weeks
            .get(x.floor().max(0.0) as usize)
            .map(axis_date)
            .unwrap_or_default()
    };
    let day_label = |y: &f64| {
        let row = y.round();
        if (y - row).abs() > f64::EPSILON || !(0.0..DAYS_PER_WEEK as f64).contains(&row) {
            return String::new();
        }
        WEEKDAY_LABELS[DAYS_PER_WEEK - 1 - row as usize].to_string()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(8)
        .y_labels(DAYS_PER_WEEK)
        .x_label_formatter(&week_label)
        .y_label_formatter(&day_label)
        .draw()?;

    chart.draw_series(matrix.rows.iter().enumerate().flat_map(|(day, row)| {
        let y = (DAYS_PER_WEEK - 1 - day) as f64;
        row.iter().enumerate().map(move |(week, &count)| {
            let x = week as f64;
            Rectangle::new(
                [(x + 0.05, y - 0.45), (x + 0.95, y + 0.45)],
                cell_color(count, max).filled(),
            )
        })
    }))?;

    Ok(())
}
