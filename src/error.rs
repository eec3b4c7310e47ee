use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActivityError>;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("No activity records to chart")]
    EmptyInput,
    #[error("Malformed record at index {index}: expected 7 day counts, found {len}")]
    MalformedRecord { index: usize, len: usize },
    #[error("Record at index {index} reports {total} commits but its days sum to {sum}")]
    TotalMismatch { index: usize, total: u32, sum: u64 },
    #[error("Invalid week timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Invalid repository '{0}': expected OWNER/NAME")]
    InvalidRepo(String),
    #[error("Statistics for {0} are still being computed by GitHub, try again shortly")]
    StatsPending(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render error: {0}")]
    Render(String),
}
