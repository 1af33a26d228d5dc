//! Runtime configuration.
//!
//! Everything the run driver touches — paths, upstream choice, timing —
//! is carried explicitly in [`Config`]; there are no process-wide path
//! constants. Values resolve in order: CLI flags, then the optional
//! `config.toml` in the platform config directory, then built-in defaults
//! rooted in the platform data directory.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::RunArgs;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

const DEFAULT_PAGE_BASE_URL: &str = "https://www.instagram.com";
const DEFAULT_TOKEN_ENV: &str = "LURK_API_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Scrape the public HTML profile page.
    Page,
    /// Call the bearer-token metrics API.
    Api,
}

impl SourceKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "page" => Some(SourceKind::Page),
            "api" => Some(SourceKind::Api),
            _ => None,
        }
    }
}

/// When to append a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPolicy {
    /// Only when the record differs from the last-seen state (default).
    OnChange,
    /// After every successful fetch, changed or not.
    EveryRun,
}

pub struct Config {
    pub roster_file: PathBuf,
    pub state_file: PathBuf,
    pub history_file: PathBuf,
    pub source: SourceKind,
    pub page_base_url: String,
    pub api_endpoint: Option<String>,
    pub api_token_env: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Random inter-request delay bounds; None disables the delay.
    pub jitter: Option<(Duration, Duration)>,
    pub log_policy: LogPolicy,
    /// History timestamp offset from UTC, in minutes. Zero renders `Z`.
    pub utc_offset_minutes: i32,
    pub verbose: bool,
}

impl Config {
    pub fn from_run_args(args: &RunArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let file = FileConfig::load()?;
        let mut config = resolve(file)?;

        if let Some(roster) = &args.roster {
            config.roster_file = roster.clone();
        }
        if let Some(state) = &args.state {
            config.state_file = state.clone();
        }
        if let Some(history) = &args.history {
            config.history_file = history.clone();
        }
        if let Some(source) = &args.source {
            config.source = SourceKind::parse(source)
                .ok_or_else(|| format!("invalid source '{source}', expected 'page' or 'api'"))?;
        }
        if let Some(secs) = args.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        if args.no_jitter {
            config.jitter = None;
        }
        if args.log_every_run {
            config.log_policy = LogPolicy::EveryRun;
        }
        config.verbose = args.verbose;

        Ok(config)
    }

    /// File config plus built-in defaults, no CLI overrides. Used by the
    /// report and check subcommands.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        resolve(FileConfig::load()?)
    }
}

/// Shape of `config.toml`. Every key is optional; durations are humantime
/// strings ("25s", "500ms").
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    roster: Option<PathBuf>,
    state: Option<PathBuf>,
    history: Option<PathBuf>,
    source: Option<String>,
    page_base_url: Option<String>,
    api_endpoint: Option<String>,
    api_token_env: Option<String>,
    user_agent: Option<String>,
    timeout: Option<String>,
    jitter_min: Option<String>,
    jitter_max: Option<String>,
    log_every_run: Option<bool>,
    utc_offset_minutes: Option<i32>,
}

impl FileConfig {
    fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let Some(dirs) = directories::ProjectDirs::from("", "", "lurk") else {
            return Ok(FileConfig::default());
        };

        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(FileConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let parsed = toml::from_str(&content)
            .map_err(|e| format!("{}: {e}", path.display()))?;

        Ok(parsed)
    }
}

fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lurk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_duration(value: &Option<String>, key: &str) -> Result<Option<Duration>, String> {
    match value {
        None => Ok(None),
        Some(s) => humantime::parse_duration(s)
            .map(Some)
            .map_err(|e| format!("invalid {key} '{s}': {e}")),
    }
}

fn resolve(file: FileConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let data = data_dir();

    let source = match &file.source {
        None => SourceKind::Page,
        Some(s) => SourceKind::parse(s)
            .ok_or_else(|| format!("invalid source '{s}' in config file"))?,
    };

    let timeout = parse_duration(&file.timeout, "timeout")?.unwrap_or(Duration::from_secs(25));

    // jitter bounds mirror the request pacing upstreams tolerate
    let jitter_min =
        parse_duration(&file.jitter_min, "jitter_min")?.unwrap_or(Duration::from_millis(500));
    let jitter_max =
        parse_duration(&file.jitter_max, "jitter_max")?.unwrap_or(Duration::from_millis(1500));
    if jitter_max < jitter_min {
        return Err(format!(
            "jitter_max ({jitter_max:?}) must not be below jitter_min ({jitter_min:?})"
        )
        .into());
    }

    Ok(Config {
        roster_file: file.roster.unwrap_or_else(|| data.join("usernames.txt")),
        state_file: file.state.unwrap_or_else(|| data.join("last_seen.json")),
        history_file: file.history.unwrap_or_else(|| data.join("history.csv")),
        source,
        page_base_url: file
            .page_base_url
            .unwrap_or_else(|| DEFAULT_PAGE_BASE_URL.to_string()),
        api_endpoint: file.api_endpoint,
        api_token_env: file
            .api_token_env
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string()),
        user_agent: file.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        timeout,
        jitter: Some((jitter_min, jitter_max)),
        log_policy: if file.log_every_run.unwrap_or(false) {
            LogPolicy::EveryRun
        } else {
            LogPolicy::OnChange
        },
        utc_offset_minutes: file.utc_offset_minutes.unwrap_or(0),
        verbose: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_parses_toml_keys() {
        let file: FileConfig = toml::from_str(
            r#"
            roster = "/tmp/usernames.txt"
            source = "api"
            api_endpoint = "https://metrics.example.com/v1"
            timeout = "10s"
            jitter_min = "100ms"
            jitter_max = "250ms"
            log_every_run = true
            utc_offset_minutes = 330
            "#,
        )
        .expect("parse");

        let config = resolve(file).expect("resolve");
        assert_eq!(config.roster_file, PathBuf::from("/tmp/usernames.txt"));
        assert_eq!(config.source, SourceKind::Api);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(
            config.jitter,
            Some((Duration::from_millis(100), Duration::from_millis(250)))
        );
        assert_eq!(config.log_policy, LogPolicy::EveryRun);
        assert_eq!(config.utc_offset_minutes, 330);
    }

    #[test]
    fn empty_file_config_resolves_to_defaults() {
        let config = resolve(FileConfig::default()).expect("resolve");
        assert_eq!(config.source, SourceKind::Page);
        assert_eq!(config.timeout, Duration::from_secs(25));
        assert_eq!(config.log_policy, LogPolicy::OnChange);
        assert_eq!(config.utc_offset_minutes, 0);
        assert!(config.jitter.is_some());
    }

    #[test]
    fn inverted_jitter_bounds_rejected() {
        let file: FileConfig =
            toml::from_str("jitter_min = \"2s\"\njitter_max = \"1s\"").expect("parse");
        assert!(resolve(file).is_err());
    }

    #[test]
    fn bad_source_rejected() {
        let file: FileConfig = toml::from_str("source = \"carrier-pigeon\"").expect("parse");
        assert!(resolve(file).is_err());
    }
}
