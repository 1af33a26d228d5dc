use chrono::{FixedOffset, Utc};

/// Humanize a count for table output: "-" for unknown, abbreviated above a
/// thousand ("1.2k", "3.4m").
pub fn format_count(value: Option<u64>) -> String {
    let Some(n) = value else {
        return "-".to_string();
    };

    if n >= 1_000_000 {
        format!("{:.1}m", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Current time as an ISO-8601 timestamp. Offset zero renders with a
/// trailing `Z`; any other configured offset renders numerically.
pub fn timestamp(offset_minutes: i32) -> String {
    render_timestamp(Utc::now(), offset_minutes)
}

fn render_timestamp(now: chrono::DateTime<Utc>, offset_minutes: i32) -> String {
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) if offset_minutes != 0 => now
            .with_timezone(&offset)
            .format("%Y-%m-%dT%H:%M:%S%:z")
            .to_string(),
        _ => now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    }
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
