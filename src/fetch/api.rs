//! Metrics API source.
//!
//! Calls a bearer-token-authenticated REST endpoint instead of scraping
//! HTML. The token is read from an environment variable so it never lands
//! in the config file. Numeric fields arrive as JSON numbers or as
//! abbreviated strings ("1.2k") depending on the API version; both decode
//! to the same record.

use std::time::Duration;

use serde_json::Value;

use crate::fetch::source::{FetchError, ProfileSource};
use crate::fetch::text::parse_count;
use crate::record::ProfileRecord;

pub struct ApiSource {
    agent: ureq::Agent,
    endpoint: String,
    token_env: String,
}

impl ApiSource {
    pub fn new(endpoint: &str, token_env: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        ApiSource {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token_env: token_env.to_string(),
        }
    }

    fn token(&self) -> Result<String, FetchError> {
        std::env::var(&self.token_env)
            .map_err(|_| FetchError::Credentials(self.token_env.clone()))
    }
}

impl ProfileSource for ApiSource {
    fn name(&self) -> &'static str {
        "metrics api"
    }

    fn fetch(&self, username: &str) -> Result<ProfileRecord, FetchError> {
        let token = self.token()?;
        let url = format!("{}/users/{username}", self.endpoint);

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Accept", "application/json")
            .call();

        let body: Value = match response {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| FetchError::Transport(e.to_string()))?,
            Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
            Err(e) => return Err(FetchError::Transport(e.to_string())),
        };

        parse_api_payload(username, &body)
    }
}

/// Map an API response body onto a record. Split from the transport so the
/// decoding rules are testable without a server.
pub fn parse_api_payload(username: &str, body: &Value) -> Result<ProfileRecord, FetchError> {
    let mut record = ProfileRecord::new(username);

    record.followers = count_field(body, "followers");
    record.following = count_field(body, "following");
    record.posts = count_field(body, "posts");
    record.likes = count_field(body, "likes");

    record.bio = string_field(body, "bio");
    record.display_name = string_field(body, "display_name");
    record.profile_pic_url = string_field(body, "profile_picture_url");

    if record.is_empty() {
        return Err(FetchError::Parse);
    }

    Ok(record)
}

/// A count may be a JSON number or an abbreviated string; null and absent
/// both mean unknown.
fn count_field(body: &Value, key: &str) -> Option<u64> {
    match body.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_count(s),
        _ => None,
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_numeric_payload() {
        let body = json!({
            "followers": 1234,
            "following": 56,
            "posts": 78,
            "likes": 9000,
            "bio": "hello",
            "display_name": "Alice",
            "profile_picture_url": "https://cdn.example.com/a.jpg"
        });

        let record = parse_api_payload("alice", &body).expect("parse");
        assert_eq!(record.followers, Some(1234));
        assert_eq!(record.likes, Some(9000));
        assert_eq!(record.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn accepts_abbreviated_string_counts() {
        let body = json!({ "followers": "1.2k", "posts": "3.4m" });

        let record = parse_api_payload("bob", &body).expect("parse");
        assert_eq!(record.followers, Some(1200));
        assert_eq!(record.posts, Some(3_400_000));
    }

    #[test]
    fn missing_and_null_fields_stay_unknown() {
        let body = json!({ "followers": 10, "bio": null });

        let record = parse_api_payload("carol", &body).expect("parse");
        assert_eq!(record.followers, Some(10));
        assert_eq!(record.bio, None);
        assert_eq!(record.following, None);
    }

    #[test]
    fn empty_payload_is_a_parse_failure() {
        let err = parse_api_payload("dave", &json!({})).unwrap_err();
        assert!(matches!(err, FetchError::Parse));
    }

    #[test]
    fn zero_follower_count_is_a_value_not_unknown() {
        let body = json!({ "followers": 0 });

        let record = parse_api_payload("erin", &body).expect("parse");
        assert_eq!(record.followers, Some(0));
    }
}
