//! JSON state storage.
//!
//! Persists the last-seen record per username as a single JSON object,
//! rewritten in full at the end of every run:
//! - load never fails: missing or corrupt file yields an empty map
//! - save writes a sibling temp file and renames it over the target
//! - BTreeMap keeps unrelated entries in stable order across rewrites

pub mod diff;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::record::ProfileRecord;

pub type State = BTreeMap<String, ProfileRecord>;

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: &Path) -> Self {
        StateStore {
            path: path.to_path_buf(),
        }
    }

    /// Load the last-seen map. A missing or unreadable file is the same as
    /// a first run: tracking starts over rather than aborting.
    pub fn load(&self) -> State {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return State::new();
        };

        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Rewrite the whole map. Writes to a temp file in the same directory
    /// and renames it into place so a crash mid-write leaves the previous
    /// state intact.
    pub fn save(&self, state: &State) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(state)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
