use serde::{Deserialize, Serialize};

/// One snapshot of a tracked account's public metrics.
///
/// `None` means "not available from the upstream source" and is distinct
/// from zero or an empty string. Numeric fields must never default to zero
/// when the source omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub posts: Option<u64>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
    // extension fields, not every upstream provides them; default keeps
    // state files written by older versions loadable
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
}

impl ProfileRecord {
    pub fn new(username: &str) -> Self {
        ProfileRecord {
            username: username.to_string(),
            followers: None,
            following: None,
            posts: None,
            bio: None,
            profile_pic_url: None,
            display_name: None,
            likes: None,
        }
    }

    /// True when every tracked field is unknown. Such a record means the
    /// fetch extracted nothing and must not overwrite prior state.
    pub fn is_empty(&self) -> bool {
        self.followers.is_none()
            && self.following.is_none()
            && self.posts.is_none()
            && self.bio.is_none()
            && self.profile_pic_url.is_none()
            && self.display_name.is_none()
            && self.likes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_is_empty() {
        assert!(ProfileRecord::new("alice").is_empty());
    }

    #[test]
    fn any_field_makes_record_non_empty() {
        let mut record = ProfileRecord::new("alice");
        record.followers = Some(0);
        assert!(!record.is_empty());

        let mut record = ProfileRecord::new("alice");
        record.bio = Some(String::new());
        assert!(!record.is_empty());
    }

    #[test]
    fn state_json_without_extension_fields_loads() {
        // state written before display_name/likes existed
        let json = r#"{
            "username": "alice",
            "followers": 100,
            "following": 50,
            "posts": 10,
            "bio": "hello",
            "profile_pic_url": null
        }"#;

        let record: ProfileRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(record.followers, Some(100));
        assert_eq!(record.display_name, None);
        assert_eq!(record.likes, None);
    }
}
