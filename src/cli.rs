use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::activity::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "gh-activity")]
#[command(about = "Weekly commit-activity charts for a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Repository as OWNER/NAME", default_value = "mdn/content", global = true)]
    pub repo: String,

    #[arg(long, help = "Read activity records from a JSON file instead of the API", global = true)]
    pub input: Option<PathBuf>,

    #[arg(long, help = "GitHub API base URL", env = "GH_ACTIVITY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    #[arg(long, help = "Bearer token for the GitHub API", env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[arg(long, help = "Path to cache directory", global = true)]
    pub cache: Option<PathBuf>,

    #[arg(long, help = "Bypass the response cache", default_value_t = false, global = true)]
    pub no_cache: bool,

    #[arg(long, help = "How long a cached response stays fresh (e.g. 30m, 2h)", default_value = "1h", value_parser = humantime::parse_duration, global = true)]
    pub max_age: Duration,

    #[arg(long, help = "Reject weeks whose day counts do not sum to the weekly total", default_value_t = false, global = true)]
    pub strict: bool,

    #[arg(short, long, help = "Increase log verbosity", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Total commits per week as a time series
    Line {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// Commits per weekday and week
    Heat {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// Both views in one document
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Write line.svg and heatmap.svg
    Render {
        #[arg(long, help = "Directory to write the charts into", default_value = ".")]
        out_dir: PathBuf,
    },
    /// Manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Drop all cached responses
    Clear,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Line { json, ndjson, interactive } => {
                if interactive {
                    crate::tui::run(&self.common, crate::tui::ViewMode::Line)
                } else {
                    crate::activity::exec_line(&self.common, json, ndjson)
                }
            }
            Commands::Heat { json, ndjson, interactive } => {
                if interactive {
                    crate::tui::run(&self.common, crate::tui::ViewMode::Heatmap)
                } else {
                    crate::activity::exec_heat(&self.common, json, ndjson)
                }
            }
            Commands::Export { json, ndjson } => crate::activity::exec_export(&self.common, json, ndjson),
            Commands::Render { out_dir } => crate::activity::exec_render(&self.common, &out_dir),
            Commands::Cache { action: CacheAction::Clear } => crate::activity::exec_cache_clear(&self.common),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_mdn_content() {
        let cli = Cli::try_parse_from(["gh-activity", "line"]).unwrap();
        assert_eq!(cli.common.repo, "mdn/content");
        assert_eq!(cli.common.max_age, Duration::from_secs(3600));
        assert!(!cli.common.strict);
        assert!(matches!(cli.command, Commands::Line { json: false, ndjson: false, interactive: false }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gh-activity",
            "heat",
            "--json",
            "--repo",
            "rust-lang/rust",
            "--max-age",
            "30m",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.common.repo, "rust-lang/rust");
        assert_eq!(cli.common.max_age, Duration::from_secs(1800));
        assert_eq!(cli.common.verbose, 2);
        assert!(matches!(cli.command, Commands::Heat { json: true, .. }));
    }

    #[test]
    fn tui_alias_maps_to_interactive() {
        let cli = Cli::try_parse_from(["gh-activity", "heat", "--tui"]).unwrap();
        assert!(matches!(cli.command, Commands::Heat { interactive: true, .. }));
    }
}
