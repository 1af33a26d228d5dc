//! Text normalization shared by the profile sources.
//!
//! Upstreams render counts in several shapes ("1,234", "1.2k", "3.4m") and
//! embed strings with JSON escape sequences; both are normalized here so the
//! sources produce identical records regardless of transport.

/// Parse a human-rendered count into an integer.
///
/// Accepts plain digits with thousands separators and abbreviated forms with
/// a `k` (×1,000) or `m` (×1,000,000) suffix, case-insensitive, optional
/// decimal point. Rounds to the nearest integer. Anything else is `None` —
/// never a fabricated zero.
pub fn parse_count(text: &str) -> Option<u64> {
    let cleaned = text.trim().to_ascii_lowercase().replace(',', "");

    let (digits, multiplier) = if let Some(rest) = cleaned.strip_suffix('k') {
        (rest.trim_end(), 1_000.0)
    } else if let Some(rest) = cleaned.strip_suffix('m') {
        (rest.trim_end(), 1_000_000.0)
    } else {
        (cleaned.as_str(), 1.0)
    };

    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !digits.chars().any(|c| c.is_ascii_digit())
        || digits.chars().filter(|c| *c == '.').count() > 1
    {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    Some((value * multiplier).round() as u64)
}

/// Reverse JSON string escapes (`\uXXXX` including surrogate pairs, `\"`,
/// `\n`, `\\`, `\/`) introduced by the payload encoding.
///
/// Delegates to serde_json for correct escape handling; falls back to a
/// minimal manual unescape if the content isn't a valid JSON string body.
pub fn decode_escapes(s: &str) -> String {
    let quoted = format!("\"{s}\"");
    serde_json::from_str::<String>(&quoted)
        .unwrap_or_else(|_| s.replace("\\\"", "\"").replace("\\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_digits() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count("12,345,678"), Some(12_345_678));
    }

    #[test]
    fn abbreviated_suffixes() {
        assert_eq!(parse_count("1.2k"), Some(1200));
        assert_eq!(parse_count("3.4m"), Some(3_400_000));
        assert_eq!(parse_count("2K"), Some(2000));
        assert_eq!(parse_count("1.5 M"), Some(1_500_000));
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(parse_count("1.2345k"), Some(1235));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_count("bogus"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("k"), None);
        assert_eq!(parse_count("1.2.3"), None);
        assert_eq!(parse_count("-5"), None);
        assert_eq!(parse_count("."), None);
    }

    #[test]
    fn decodes_unicode_escapes() {
        assert_eq!(decode_escapes("caf\\u00e9"), "café");
        assert_eq!(decode_escapes("a \\u0026 b"), "a & b");
    }

    #[test]
    fn decodes_surrogate_pairs() {
        assert_eq!(decode_escapes("\\ud83d\\ude00"), "😀");
    }

    #[test]
    fn decodes_quotes_and_newlines() {
        assert_eq!(decode_escapes("say \\\"hi\\\"\\nbye"), "say \"hi\"\nbye");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(decode_escapes("no escapes here"), "no escapes here");
    }
}
