use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::model::WeeklyActivityRecord;
use crate::util::validate_repo;
use super::source::{ActivitySource, CachedSource, FileSource, GitHubSource};
use super::transform::validate_totals;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Builds the source the flags ask for: a file, or the API behind the cache.
pub fn open_source(common: &CommonArgs) -> anyhow::Result<Box<dyn ActivitySource>> {
    if let Some(path) = &common.input {
        return Ok(Box::new(FileSource::new(path)));
    }

    let github = GitHubSource::new(&common.api_url, common.token.clone())
        .context("Failed to build HTTP client")?;
    if common.no_cache {
        return Ok(Box::new(github));
    }

    let cache = Cache::new(common.cache.as_deref()).context("Failed to initialize cache")?;
    Ok(Box::new(CachedSource::new(github, cache, common.max_age)))
}

pub fn decode_records(body: &str) -> crate::error::Result<Vec<WeeklyActivityRecord>> {
    Ok(serde_json::from_str(body)?)
}

pub fn fetch_records_with_progress(
    source: &mut dyn ActivitySource,
    common: &CommonArgs,
    show_progress: bool,
) -> anyhow::Result<Vec<WeeklyActivityRecord>> {
    let repo = validate_repo(&common.repo)?;

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Fetching commit activity for {repo}..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let fetched = source.fetch(repo);
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let body = fetched.with_context(|| format!("Failed to fetch commit activity for {repo}"))?;
    let records = decode_records(&body).context("Failed to decode commit activity")?;
    info!(repo, weeks = records.len(), "loaded commit activity");

    if common.strict {
        validate_totals(&records).context("Commit activity failed strict validation")?;
    }

    Ok(records)
}

/// Opens the configured source and fetches once.
pub fn load_records(common: &CommonArgs, show_progress: bool) -> anyhow::Result<Vec<WeeklyActivityRecord>> {
    let mut source = open_source(common)?;
    fetch_records_with_progress(source.as_mut(), common, show_progress)
}
