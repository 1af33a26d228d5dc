//! One tracking pass over the roster.
//!
//! Linear pipeline: ensure files exist, load roster and state, then for
//! each username fetch → compare → maybe append history → update state in
//! memory. State is saved once, after the whole pass. Any per-username
//! failure becomes a diagnostic and skips only that username.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rand::Rng;

use crate::config::{Config, LogPolicy};
use crate::fetch::ProfileSource;
use crate::history::HistoryLog;
use crate::roster;
use crate::store::{diff, StateStore};
use crate::util;

pub struct RunSummary {
    /// Usernames that produced a usable record.
    pub fetched: usize,
    /// Usernames whose record differed from last-seen state.
    pub changed: usize,
    /// History rows written (under EveryRun this exceeds `changed`).
    pub appended: usize,
    pub diagnostics: Vec<String>,
    pub duration_ms: Option<u128>,
}

impl RunSummary {
    fn empty() -> Self {
        RunSummary {
            fetched: 0,
            changed: 0,
            appended: 0,
            diagnostics: Vec::new(),
            duration_ms: None,
        }
    }
}

pub fn run(
    config: &Config,
    source: &dyn ProfileSource,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut summary = RunSummary::empty();

    ensure_roster(&config.roster_file)?;

    let usernames = roster::load(&config.roster_file)?;
    let store = StateStore::new(&config.state_file);
    let history = HistoryLog::new(&config.history_file);
    let mut state = store.load();

    for (index, username) in usernames.iter().enumerate() {
        if index > 0 {
            pause(config);
        }

        if config.verbose {
            eprintln!("fetching {username} via {}", source.name());
        }

        let record = match source.fetch(username) {
            Ok(record) => record,
            Err(e) => {
                summary.diagnostics.push(format!("{username}: {e}"));
                continue;
            }
        };

        // sources report all-unknown records as parse failures already;
        // an empty record slipping through must not clobber prior state
        if record.is_empty() {
            summary
                .diagnostics
                .push(format!("{username}: fetch produced no fields, keeping prior state"));
            continue;
        }

        summary.fetched += 1;

        let previous = state.get(username.as_str());
        let changed = diff::has_changed(previous, &record);

        if changed {
            summary.changed += 1;

            if config.verbose {
                match previous {
                    Some(prev) => {
                        eprintln!("{username} changed:");
                        for change in diff::field_changes(prev, &record) {
                            eprintln!("  {}: {} -> {}", change.field, change.old, change.new);
                        }
                    }
                    None => eprintln!("{username}: first snapshot"),
                }
            }
        }

        if changed || config.log_policy == LogPolicy::EveryRun {
            let ts = util::timestamp(config.utc_offset_minutes);
            if let Err(e) = history.append(&ts, &record) {
                summary
                    .diagnostics
                    .push(format!("{username}: history append failed: {e}"));
                // keep the prior state so the same diff is detected and
                // logged on the next run instead of vanishing unrecorded
                continue;
            }
            summary.appended += 1;
        }

        state.insert(username.clone(), record);
    }

    store.save(&state)?;

    summary.duration_ms = Some(start.elapsed().as_millis());
    Ok(summary)
}

/// Create the roster file (and its directory) on first run so the user has
/// something to edit. Idempotent.
fn ensure_roster(path: &Path) -> Result<(), std::io::Error> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, "# one username per line, lines starting with # are ignored\n")
}

fn pause(config: &Config) {
    let Some((min, max)) = config.jitter else {
        return;
    };

    let millis = rand::thread_rng().gen_range(min.as_millis()..=max.as_millis());
    std::thread::sleep(std::time::Duration::from_millis(millis as u64));
}
