use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lurk")]
#[command(about = "A social profile tracker that logs metric changes over time")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// One tracking pass: fetch every roster entry, log changes, save state
    Run(RunArgs),

    /// Show the last-seen snapshot for tracked accounts
    Report(ReportArgs),

    /// Fetch one profile and print it without touching state or history
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Username roster file (defaults to the data directory)
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// State file path
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// History log path
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Upstream source: 'page' or 'api'
    #[arg(long)]
    pub source: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable the randomized inter-request delay
    #[arg(long, default_value_t = false)]
    pub no_jitter: bool,

    /// Append a history row for every successful fetch, not only changes
    #[arg(long, default_value_t = false)]
    pub log_every_run: bool,

    /// Show per-field changes and fetch progress
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Output as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only show one username
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Username to fetch (leading @ accepted)
    pub username: String,

    /// Upstream source: 'page' or 'api'
    #[arg(long)]
    pub source: Option<String>,

    /// Output as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
