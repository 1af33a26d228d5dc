//! Change detection between the last-seen record and a fresh fetch.
//!
//! Compares a fixed set of tracked fields (everything except the username
//! key). Unknown-vs-unknown is equal; unknown-vs-known is a change. A
//! username seen for the first time always counts as changed.

use crate::record::ProfileRecord;

/// One differing field, rendered for verbose output.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

pub fn has_changed(previous: Option<&ProfileRecord>, current: &ProfileRecord) -> bool {
    match previous {
        None => true,
        Some(prev) => !field_changes(prev, current).is_empty(),
    }
}

/// List every tracked field that differs, in fixed field order.
pub fn field_changes(previous: &ProfileRecord, current: &ProfileRecord) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    compare_count(&mut changes, "followers", previous.followers, current.followers);
    compare_count(&mut changes, "following", previous.following, current.following);
    compare_count(&mut changes, "posts", previous.posts, current.posts);
    compare_count(&mut changes, "likes", previous.likes, current.likes);
    compare_text(&mut changes, "bio", &previous.bio, &current.bio);
    compare_text(
        &mut changes,
        "profile_pic_url",
        &previous.profile_pic_url,
        &current.profile_pic_url,
    );
    compare_text(
        &mut changes,
        "display_name",
        &previous.display_name,
        &current.display_name,
    );

    changes
}

fn compare_count(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    old: Option<u64>,
    new: Option<u64>,
) {
    if old != new {
        changes.push(FieldChange {
            field,
            old: render_count(old),
            new: render_count(new),
        });
    }
}

fn compare_text(
    changes: &mut Vec<FieldChange>,
    field: &'static str,
    old: &Option<String>,
    new: &Option<String>,
) {
    if old != new {
        changes.push(FieldChange {
            field,
            old: old.clone().unwrap_or_else(|| "(unknown)".to_string()),
            new: new.clone().unwrap_or_else(|| "(unknown)".to_string()),
        });
    }
}

fn render_count(value: Option<u64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "(unknown)".to_string(),
    }
}
