//! JSON output for scripting and piping.

use crate::record::ProfileRecord;
use crate::store::State;

pub fn render(state: &State) -> String {
    serde_json::to_string_pretty(state).unwrap_or_else(|_| String::from("{}"))
}

pub fn render_record(record: &ProfileRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| String::from("{}"))
}
