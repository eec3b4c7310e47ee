pub mod exec;
pub mod fetch;
pub mod output;
pub mod source;
pub mod transform;

pub use exec::{exec_cache_clear, exec_export, exec_heat, exec_line, exec_render};
pub use fetch::{decode_records, fetch_records_with_progress, load_records, open_source};
pub use source::{ActivitySource, CachedSource, FileSource, GitHubSource, DEFAULT_API_URL};
pub use transform::{to_heatmap_matrix, to_line_series, validate_totals};
