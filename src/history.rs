//! Append-only CSV history log.
//!
//! One row per recorded event, header written exactly once when the file is
//! created, prior rows never touched. Unknown fields serialize as empty
//! cells so a later reader can tell "not available" from a real zero.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::record::ProfileRecord;

const COLUMNS: [&str; 9] = [
    "timestamp",
    "username",
    "followers",
    "following",
    "posts",
    "bio",
    "profile_pic_url",
    "display_name",
    "likes",
];

pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: &Path) -> Self {
        HistoryLog {
            path: path.to_path_buf(),
        }
    }

    /// Append one event row, creating the file with its header first if
    /// needed.
    pub fn append(
        &self,
        timestamp: &str,
        record: &ProfileRecord,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.ensure_header()?;

        let fields = [
            timestamp.to_string(),
            record.username.clone(),
            render_count(record.followers),
            render_count(record.following),
            render_count(record.posts),
            record.bio.clone().unwrap_or_default(),
            record.profile_pic_url.clone().unwrap_or_default(),
            record.display_name.clone().unwrap_or_default(),
            render_count(record.likes),
        ];

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", render_row(&fields))?;

        Ok(())
    }

    fn ensure_header(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
        fs::write(&self.path, format!("{}\n", render_row(&header)))?;

        Ok(())
    }
}

fn render_count(value: Option<u64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn render_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field when it contains a separator, quote or line break; inner
/// quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(username: &str, followers: u64, bio: Option<&str>) -> ProfileRecord {
        let mut r = ProfileRecord::new(username);
        r.followers = Some(followers);
        r.bio = bio.map(str::to_string);
        r
    }

    fn read(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .expect("read history")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_written_once() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("history.csv");
        let log = HistoryLog::new(&path);

        log.append("2026-01-01T00:00:00Z", &record("alice", 100, None))
            .expect("append");
        log.append("2026-01-02T00:00:00Z", &record("alice", 150, None))
            .expect("append");

        let lines = read(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "timestamp,username,followers,following,posts,bio,profile_pic_url,display_name,likes"
        );
        assert!(lines[1].starts_with("2026-01-01T00:00:00Z,alice,100,"));
    }

    #[test]
    fn prior_rows_untouched_by_appends() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("history.csv");
        let log = HistoryLog::new(&path);

        log.append("t1", &record("alice", 100, None)).expect("append");
        let before = read(&path);

        log.append("t2", &record("bob", 5, None)).expect("append");
        let after = read(&path);

        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    fn unknown_fields_are_empty_cells_not_zero() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("history.csv");
        let log = HistoryLog::new(&path);

        let r = record("alice", 100, None); // everything else unknown
        log.append("t1", &r).expect("append");

        assert_eq!(read(&path)[1], "t1,alice,100,,,,,,");
    }

    #[test]
    fn bio_with_commas_quotes_and_newlines_is_escaped() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("history.csv");
        let log = HistoryLog::new(&path);

        let r = record("alice", 1, Some("hello, \"world\"\nsecond line"));
        log.append("t1", &r).expect("append");

        let content = fs::read_to_string(&path).expect("read");
        assert!(content.contains("\"hello, \"\"world\"\"\nsecond line\""));
    }
}
