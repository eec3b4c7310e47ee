use crate::cache::Cache;
use crate::chart::{heatmap_svg, line_chart_svg};
use crate::cli::CommonArgs;
use crate::util::heatmap_title;
use super::fetch::load_records;
use super::output::{
    export_document, output_export_json, output_export_ndjson, output_heat_json, output_heat_ndjson,
    output_heatmap, output_line_chart, output_line_json, output_line_ndjson,
};
use super::transform::{to_heatmap_matrix, to_line_series};
use anyhow::Context;
use std::path::Path;
use tracing::info;

pub fn exec_line(common: &CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    // No spinner for json/ndjson so piped runs keep stderr quiet.
    let records = load_records(common, !(json || ndjson))?;
    let series = to_line_series(&records, &common.repo).context("Failed to build line series")?;

    if json {
        output_line_json(&series)
    } else if ndjson {
        output_line_ndjson(&series)
    } else {
        output_line_chart(&series)
    }
}

pub fn exec_heat(common: &CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let records = load_records(common, !(json || ndjson))?;
    let matrix = to_heatmap_matrix(&records).context("Failed to build heatmap")?;

    if json {
        output_heat_json(&matrix, &common.repo)
    } else if ndjson {
        output_heat_ndjson(&matrix)
    } else {
        output_heatmap(&matrix, &common.repo)
    }
}

pub fn exec_export(common: &CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let records = load_records(common, false)?;
    let series = to_line_series(&records, &common.repo).context("Failed to build line series")?;
    let matrix = to_heatmap_matrix(&records).context("Failed to build heatmap")?;

    if ndjson && !json {
        output_export_ndjson(&series, &matrix)
    } else {
        output_export_json(&export_document(&series, &matrix, &common.repo))
    }
}

pub fn exec_render(common: &CommonArgs, out_dir: &Path) -> anyhow::Result<()> {
    let records = load_records(common, true)?;
    let series = to_line_series(&records, &common.repo).context("Failed to build line series")?;
    let matrix = to_heatmap_matrix(&records).context("Failed to build heatmap")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let line_path = out_dir.join("line.svg");
    let svg = line_chart_svg(&series).context("Failed to render line chart")?;
    std::fs::write(&line_path, svg).with_context(|| format!("Failed to write {}", line_path.display()))?;

    let heat_path = out_dir.join("heatmap.svg");
    let svg = heatmap_svg(&matrix, &heatmap_title(&common.repo)).context("Failed to render heatmap")?;
    std::fs::write(&heat_path, svg).with_context(|| format!("Failed to write {}", heat_path.display()))?;

    info!(dir = %out_dir.display(), "charts written");
    println!("{}", line_path.display());
    println!("{}", heat_path.display());
    Ok(())
}

pub fn exec_cache_clear(common: &CommonArgs) -> anyhow::Result<()> {
    let mut cache = Cache::new(common.cache.as_deref()).context("Failed to initialize cache")?;
    let removed = cache.clear().context("Failed to clear cache")?;
    println!("Removed {removed} cached response(s)");
    Ok(())
}
