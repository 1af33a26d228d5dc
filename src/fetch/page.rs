//! Profile page source.
//!
//! Fetches the public HTML profile page and pulls metrics out of the JSON
//! blobs the page embeds. This is deliberately a string scan, not an HTML
//! parse: the page structure shifts constantly and robust scraping is a
//! non-goal. When the JSON keys are missing, counts fall back to the
//! `og:description` meta tag ("1,234 Followers, 56 Following, 78 Posts").

use std::time::Duration;

use crate::fetch::source::{FetchError, ProfileSource};
use crate::fetch::text::{decode_escapes, parse_count};
use crate::record::ProfileRecord;

pub struct PageSource {
    agent: ureq::Agent,
    base_url: String,
    user_agent: String,
}

impl PageSource {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        PageSource {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

impl ProfileSource for PageSource {
    fn name(&self) -> &'static str {
        "profile page"
    }

    fn fetch(&self, username: &str) -> Result<ProfileRecord, FetchError> {
        let url = format!("{}/{username}/", self.base_url);

        let response = self
            .agent
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .set("Accept-Language", "en-US,en;q=0.9")
            .call();

        let html = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| FetchError::Transport(e.to_string()))?,
            Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
            Err(e) => return Err(FetchError::Transport(e.to_string())),
        };

        parse_profile_html(username, &html)
    }
}

/// Extract a profile record from a fetched page. Public so the benchmark can
/// exercise extraction without a network round trip.
pub fn parse_profile_html(username: &str, html: &str) -> Result<ProfileRecord, FetchError> {
    let mut record = ProfileRecord::new(username);

    record.followers = extract_edge_count(html, "edge_followed_by");
    record.following = extract_edge_count(html, "edge_follow");
    record.posts = extract_edge_count(html, "edge_owner_to_timeline_media");

    record.bio = extract_string(html, "biography").map(|s| decode_escapes(&s));
    record.display_name = extract_string(html, "full_name").map(|s| decode_escapes(&s));

    record.profile_pic_url = extract_string(html, "profile_pic_url_hd")
        .or_else(|| extract_string(html, "profile_pic_url"))
        .map(|s| decode_escapes(&s));

    // counts missing from the json blobs sometimes survive in the og tag
    if record.followers.is_none() || record.following.is_none() || record.posts.is_none() {
        if let Some(content) = og_description(html) {
            let (followers, following, posts) = og_counts(&content);
            record.followers = record.followers.or(followers);
            record.following = record.following.or(following);
            record.posts = record.posts.or(posts);
        }
    }

    if record.is_empty() {
        return Err(FetchError::Parse);
    }

    Ok(record)
}

/// Find `"<key>"` followed by a nearby `"count": <digits>` pair.
fn extract_edge_count(html: &str, key: &str) -> Option<u64> {
    let needle = format!("\"{key}\"");
    let start = html.find(&needle)? + needle.len();

    // the count sits directly inside the edge object; a short window keeps
    // us from matching some unrelated count further down the page
    let mut end = (start + 64).min(html.len());
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    let window = &html[start..end];

    let count_pos = window.find("\"count\"")? + "\"count\"".len();
    let rest = window[count_pos..].trim_start_matches(|c: char| c == ':' || c.is_whitespace());

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

/// Find `"<key>": "<value>"` and return the raw (still escaped) value.
fn extract_string(html: &str, key: &str) -> Option<String> {
    let needle = format!("\"{key}\"");
    let start = html.find(&needle)? + needle.len();
    let rest = html[start..].trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    let rest = rest.strip_prefix('"')?;

    // scan for the closing quote, honoring backslash escapes
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(rest[..i].to_string()),
            _ => i += 1,
        }
    }

    None
}

fn og_description(html: &str) -> Option<String> {
    let needle = "property=\"og:description\"";
    let start = html.find(needle)? + needle.len();
    let rest = &html[start..];

    let content_pos = rest.find("content=\"")? + "content=\"".len();
    let content = &rest[content_pos..];
    let end = content.find('"')?;

    Some(content[..end].to_string())
}

/// Pull "<number> Followers/Following/Posts" pairs out of the og tag text.
fn og_counts(content: &str) -> (Option<u64>, Option<u64>, Option<u64>) {
    let mut followers = None;
    let mut following = None;
    let mut posts = None;

    let tokens: Vec<&str> = content.split_whitespace().collect();
    for pair in tokens.windows(2) {
        let label = pair[1]
            .trim_matches(|c: char| !c.is_ascii_alphanumeric())
            .to_ascii_lowercase();

        match label.as_str() {
            "followers" => followers = followers.or_else(|| parse_count(pair[0])),
            "following" => following = following.or_else(|| parse_count(pair[0])),
            "posts" => posts = posts.or_else(|| parse_count(pair[0])),
            _ => {}
        }
    }

    (followers, following, posts)
}
