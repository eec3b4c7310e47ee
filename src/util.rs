use chrono::{DateTime, Utc};
use crate::error::{ActivityError, Result};

pub fn epoch_to_datetime(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or(ActivityError::InvalidTimestamp(secs))
}

/// Short date as a browser in the en-US locale would print it, e.g. `3/7/2024`.
pub fn locale_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}

pub fn axis_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Checks that `slug` looks like `owner/name`.
pub fn validate_repo(slug: &str) -> Result<&str> {
    let mut parts = slug.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(slug),
        _ => Err(ActivityError::InvalidRepo(slug.to_string())),
    }
}

pub fn heatmap_title(repository: &str) -> String {
    format!("Commits to the {repository} repo, by day")
}
