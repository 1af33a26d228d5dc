//! Table rendering for the last-seen state.
//!
//! Fixed-width columns, humanized counts, sorted by followers descending
//! with never-fetched fields shown as "-".

use crate::store::State;
use crate::util::{format_count, truncate};

pub fn render(state: &State) -> String {
    if state.is_empty() {
        return String::from("No tracked accounts yet. Run 'lurk run' first.\n");
    }

    let mut output = String::new();

    output.push_str(&format!(
        "{:<20} {:>10} {:>10} {:>8} {:>8}  {}\n",
        "USERNAME", "FOLLOWERS", "FOLLOWING", "POSTS", "LIKES", "BIO"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    // largest accounts first; unknown follower counts sink to the bottom
    let mut records: Vec<_> = state.values().collect();
    records.sort_by_key(|r| std::cmp::Reverse(r.followers.map(|n| n as i128).unwrap_or(-1)));

    for record in records {
        output.push_str(&format!(
            "{:<20} {:>10} {:>10} {:>8} {:>8}  {}\n",
            truncate(&record.username, 20),
            format_count(record.followers),
            format_count(record.following),
            format_count(record.posts),
            format_count(record.likes),
            truncate(record.bio.as_deref().unwrap_or("-"), 30),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProfileRecord;

    fn record(username: &str, followers: Option<u64>) -> ProfileRecord {
        let mut r = ProfileRecord::new(username);
        r.followers = followers;
        r
    }

    #[test]
    fn empty_state_prints_hint() {
        let rendered = render(&State::new());
        assert!(rendered.contains("lurk run"));
    }

    #[test]
    fn sorted_by_followers_descending_unknown_last() {
        let mut state = State::new();
        state.insert("small".into(), record("small", Some(10)));
        state.insert("big".into(), record("big", Some(5_000_000)));
        state.insert("mystery".into(), record("mystery", None));

        let rendered = render(&state);
        let big = rendered.find("big").expect("big");
        let small = rendered.find("small").expect("small");
        let mystery = rendered.find("mystery").expect("mystery");

        assert!(big < small);
        assert!(small < mystery);
        assert!(rendered.contains("5.0m"));
    }
}
