//! Username roster loading.
//!
//! The roster is a plain text file, one username per line. Blank lines and
//! `#` comments are skipped; a single leading `@` is stripped.

use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<Vec<String>, std::io::Error> {
    let content = fs::read_to_string(path)?;
    Ok(parse(&content))
}

fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.strip_prefix('@').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blanks_and_comments() {
        let usernames = parse("alice\n\n# watched competitors\nbob\n   \n");
        assert_eq!(usernames, vec!["alice", "bob"]);
    }

    #[test]
    fn strips_leading_at_and_whitespace() {
        let usernames = parse("  @alice  \n@bob\ncarol\n");
        assert_eq!(usernames, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn only_first_at_is_stripped() {
        let usernames = parse("@@weird\n");
        assert_eq!(usernames, vec!["@weird"]);
    }

    #[test]
    fn preserves_file_order_and_duplicates() {
        let usernames = parse("bob\nalice\nbob\n");
        assert_eq!(usernames, vec!["bob", "alice", "bob"]);
    }

    #[test]
    fn empty_file_yields_empty_roster() {
        assert!(parse("").is_empty());
        assert!(parse("# only comments\n").is_empty());
    }
}
