use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who wrote a comment.
///
/// Older store variants send a resolved display name, newer ones only send the
/// author's user id and expect the client to ask `/nickname` for the label.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Author {
    Named(String),
    UserId(String),
    Anonymous,
}

/// Attached image of a comment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ImageRef {
    /// Serving path handed out by the store (usually relative).
    Url(String),
    /// Blob key, served through `/serve-image?blob-key=`.
    BlobKey(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Comment {
    pub id: i64,
    pub author: Author,
    pub mood: Option<String>,
    pub content: String,
    pub image: Option<ImageRef>,
    pub sentiment: Option<f32>,
    pub timestamp_ms: i64,
}

impl Comment {
    /// `"<name> - <mood>"`, or just the name when no mood was picked.
    pub fn author_line(&self, display_name: &str) -> String {
        match self.mood.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(mood) => format!("{} - {}", display_name, mood),
            None => display_name.to_string(),
        }
    }

    pub fn sentiment_label(&self) -> Option<String> {
        self.sentiment.map(|s| format!("Sentiment Score: {}", s))
    }
}

/// Response of `GET /login`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginStatus {
    pub is_logged_in: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub login_url: Option<String>,
    #[serde(default)]
    pub logout_url: Option<String>,
}

impl LoginStatus {
    /// Target of the Login/Logout link.
    pub fn toggle_url(&self) -> Option<&str> {
        if self.is_logged_in {
            self.logout_url.as_deref()
        } else {
            self.login_url.as_deref()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub content: String,

    /// Hover title; only the built-in landmarks have one.
    #[serde(default, skip_serializing)]
    pub title: Option<String>,

    /// Built-in landmarks are drawn with the flag style.
    #[serde(default, skip_serializing)]
    pub landmark: bool,
}

impl Marker {
    pub fn new(lat: f64, lng: f64, content: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            content: content.into(),
            title: None,
            landmark: false,
        }
    }

    pub fn landmark(lat: f64, lng: f64, title: &str, content: &str) -> Self {
        Self {
            lat,
            lng,
            content: content.to_string(),
            title: Some(title.to_string()),
            landmark: true,
        }
    }
}

/// `GET /comments-mood`: mood label → number of comments.
pub(crate) type MoodCounts = BTreeMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(mood: Option<&str>, sentiment: Option<f32>) -> Comment {
        Comment {
            id: 1,
            author: Author::Named("heidi".to_string()),
            mood: mood.map(str::to_string),
            content: "hi".to_string(),
            image: None,
            sentiment,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn author_line_appends_mood() {
        assert_eq!(comment(Some("Happy"), None).author_line("heidi"), "heidi - Happy");
    }

    #[test]
    fn author_line_without_mood_is_just_the_name() {
        assert_eq!(comment(None, None).author_line("heidi"), "heidi");
        assert_eq!(comment(Some("  "), None).author_line("heidi"), "heidi");
    }

    #[test]
    fn sentiment_label_only_when_present() {
        assert_eq!(
            comment(None, Some(0.5)).sentiment_label().as_deref(),
            Some("Sentiment Score: 0.5")
        );
        assert!(comment(None, None).sentiment_label().is_none());
    }

    #[test]
    fn login_status_contract_deserialize() {
        let json = r#"{"isLoggedIn": true, "logoutUrl": "/_ah/logout", "userId": "42"}"#;
        let parsed: LoginStatus = serde_json::from_str(json).expect("login status should parse");
        assert!(parsed.is_logged_in);
        assert_eq!(parsed.user_id.as_deref(), Some("42"));
        assert_eq!(parsed.toggle_url(), Some("/_ah/logout"));

        let json = r#"{"isLoggedIn": false, "loginUrl": "/_ah/login"}"#;
        let parsed: LoginStatus = serde_json::from_str(json).expect("login status should parse");
        assert_eq!(parsed.toggle_url(), Some("/_ah/login"));
        assert!(parsed.user_id.is_none());
    }

    #[test]
    fn marker_serializes_only_wire_fields() {
        let m = Marker::landmark(1.0, 2.0, "Nanjing", "born here");
        let v = serde_json::to_value(&m).expect("should serialize");
        assert_eq!(v["lat"], 1.0);
        assert_eq!(v["content"], "born here");
        assert!(v.get("title").is_none());
        assert!(v.get("landmark").is_none());
    }
}
