use crate::models::{Author, Comment, ImageRef, LoginStatus, Marker, MoodCounts};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: format!("Network error: {e}"),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: format!("Malformed response: {e}"),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {}", body.trim()),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Fallback when neither `window.ENV` nor the page origin is available.
const DEFAULT_API_URL: &str = "http://localhost:8080";

pub(crate) const DEFAULT_COMMENTS_PER_PAGE: usize = 5;

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub comments_per_page: usize,
}

impl EnvConfig {
    pub fn new() -> Self {
        let window = web_sys::window();

        let env = window
            .as_ref()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        let env_str = |key: &str| {
            env.as_ref()
                .and_then(|env| js_sys::Reflect::get(env, &key.into()).ok())
                .and_then(|v| v.as_string())
        };

        let env_num = |key: &str| {
            env.as_ref()
                .and_then(|env| js_sys::Reflect::get(env, &key.into()).ok())
                .and_then(|v| v.as_f64().or_else(|| v.as_string()?.trim().parse().ok()))
        };

        // `API_URL` is the documented key, `api_url` is accepted for older pages.
        let api_url = env_str("API_URL")
            .or_else(|| env_str("api_url"))
            .or_else(|| window.as_ref().and_then(|w| w.location().origin().ok()))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let comments_per_page = env_num("COMMENTS_PER_PAGE")
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_COMMENTS_PER_PAGE);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            comments_per_page,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct DeleteCommentForm {
    pub id: i64,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct MarkerForm {
    pub lat: f64,
    pub lng: f64,
    pub content: String,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(res: reqwest::Response, ctx: &str) -> ApiResult<reqwest::Response> {
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn get_json(&self, path: &str, ctx: &str) -> ApiResult<serde_json::Value> {
        let res = reqwest::Client::new()
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;
        let res = Self::check(res, ctx).await?;

        // The comment servlet labels its JSON as text/html, so parse the body ourselves.
        let body = res.text().await.map_err(ApiError::network)?;
        serde_json::from_str(&body).map_err(ApiError::parse)
    }

    async fn get_text(&self, path: &str, ctx: &str) -> ApiResult<String> {
        let res = reqwest::Client::new()
            .get(self.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;
        let res = Self::check(res, ctx).await?;
        let body = res.text().await.map_err(ApiError::network)?;
        Ok(body.trim().to_string())
    }

    async fn post_form<F: Serialize>(
        &self,
        path: &str,
        form: Option<&F>,
        ctx: &str,
    ) -> ApiResult<()> {
        let mut req = reqwest::Client::new().post(self.url(path));
        if let Some(form) = form {
            req = req.form(form);
        }
        let res = req.send().await.map_err(ApiError::network)?;
        Self::check(res, ctx).await.map(|_| ())
    }

    pub(crate) fn comments_path(language_code: &str) -> String {
        let code = if language_code.trim().is_empty() {
            "original"
        } else {
            language_code.trim()
        };
        format!("/comments?languageCode={}", urlencoding::encode(code))
    }

    pub(crate) fn nickname_path(user_id: &str) -> String {
        format!("/nickname?userId={}", urlencoding::encode(user_id))
    }

    pub(crate) fn serve_image_path(blob_key: &str) -> String {
        format!("/serve-image?blob-key={}", urlencoding::encode(blob_key))
    }

    /// Absolute URL an `<img>`/`<a>` can point at.
    pub fn image_src(&self, image: &ImageRef) -> String {
        match image {
            ImageRef::Url(u) if u.starts_with("http://") || u.starts_with("https://") => u.clone(),
            ImageRef::Url(u) if u.starts_with('/') => self.url(u),
            ImageRef::Url(u) => self.url(&format!("/{u}")),
            ImageRef::BlobKey(k) => self.url(&Self::serve_image_path(k)),
        }
    }

    pub async fn get_comments(&self, language_code: &str) -> ApiResult<Vec<Comment>> {
        let data = self
            .get_json(&Self::comments_path(language_code), "Failed to load comments")
            .await?;
        Self::parse_comment_list_response(data)
    }

    pub async fn delete_comment(&self, id: i64) -> ApiResult<()> {
        self.post_form(
            "/delete-comments",
            Some(&DeleteCommentForm { id }),
            "Failed to delete comment",
        )
        .await
    }

    pub async fn delete_all_comments(&self) -> ApiResult<()> {
        self.post_form::<DeleteCommentForm>("/delete-comments", None, "Failed to delete comments")
            .await
    }

    pub async fn get_nickname(&self, user_id: &str) -> ApiResult<String> {
        self.get_text(&Self::nickname_path(user_id), "Failed to load nickname")
            .await
    }

    pub async fn get_login_status(&self) -> ApiResult<LoginStatus> {
        let data = self.get_json("/login", "Failed to load login status").await?;
        serde_json::from_value(data).map_err(ApiError::parse)
    }

    pub async fn get_upload_url(&self) -> ApiResult<String> {
        let url = self
            .get_text("/blobstore-upload-url", "Failed to get upload URL")
            .await?;
        if url.is_empty() {
            return Err(ApiError::parse("empty upload URL"));
        }
        Ok(url)
    }

    pub async fn get_markers(&self) -> ApiResult<Vec<Marker>> {
        let data = self.get_json("/markers", "Failed to load markers").await?;
        Self::parse_marker_list_response(data)
    }

    pub async fn post_marker(&self, marker: &Marker) -> ApiResult<()> {
        self.post_form(
            "/markers",
            Some(&MarkerForm {
                lat: marker.lat,
                lng: marker.lng,
                content: marker.content.clone(),
            }),
            "Failed to save marker",
        )
        .await
    }

    pub async fn get_mood_counts(&self) -> ApiResult<MoodCounts> {
        let data = self.get_json("/comments-mood", "Failed to load moods").await?;
        Self::parse_mood_counts_response(data)
    }

    /// The collection itself must be an array; entries without a usable id are skipped.
    pub(crate) fn parse_comment_list_response(data: serde_json::Value) -> ApiResult<Vec<Comment>> {
        let list = data
            .as_array()
            .ok_or_else(|| ApiError::parse("comment list is not an array"))?;

        let mut out: Vec<Comment> = Vec::with_capacity(list.len());
        for item in list {
            let get_s = |k: &str| {
                item.get(k)
                    .and_then(|v| v.as_str())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            };

            let Some(id) = item.get("id").and_then(|v| {
                v.as_i64()
                    .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            }) else {
                continue;
            };

            let author = if let Some(name) = get_s("name").or_else(|| get_s("email")) {
                Author::Named(name)
            } else if let Some(user_id) = get_s("userId") {
                Author::UserId(user_id)
            } else {
                Author::Anonymous
            };

            let image = get_s("imageUrl")
                .map(ImageRef::Url)
                .or_else(|| get_s("blobKeyString").map(ImageRef::BlobKey));

            out.push(Comment {
                id,
                author,
                mood: get_s("mood"),
                content: item
                    .get("content")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                image,
                sentiment: item.get("sentiment").and_then(|v| v.as_f64()).map(|s| s as f32),
                timestamp_ms: item.get("timestamp").and_then(|v| v.as_i64()).unwrap_or(0),
            });
        }

        Ok(out)
    }

    pub(crate) fn parse_marker_list_response(data: serde_json::Value) -> ApiResult<Vec<Marker>> {
        let list = data
            .as_array()
            .ok_or_else(|| ApiError::parse("marker list is not an array"))?;

        Ok(list
            .iter()
            .filter_map(|item| serde_json::from_value::<Marker>(item.clone()).ok())
            .filter(|m| m.lat.is_finite() && m.lng.is_finite())
            .collect())
    }

    pub(crate) fn parse_mood_counts_response(data: serde_json::Value) -> ApiResult<MoodCounts> {
        let map = data
            .as_object()
            .ok_or_else(|| ApiError::parse("mood counts is not an object"))?;

        Ok(map
            .iter()
            .filter_map(|(mood, count)| Some((mood.clone(), count.as_u64()?)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.url("/login"), "http://localhost:8080/login");
    }

    #[test]
    fn comments_path_defaults_to_original_language() {
        assert_eq!(ApiClient::comments_path(""), "/comments?languageCode=original");
        assert_eq!(ApiClient::comments_path("zh-CN"), "/comments?languageCode=zh-CN");
    }

    #[test]
    fn query_parameters_are_encoded() {
        assert_eq!(ApiClient::nickname_path("a b&c"), "/nickname?userId=a%20b%26c");
        assert_eq!(ApiClient::serve_image_path("k=1"), "/serve-image?blob-key=k%3D1");
    }

    #[test]
    fn image_src_resolves_against_base_url() {
        let client = ApiClient::new("http://host".to_string());
        assert_eq!(
            client.image_src(&ImageRef::Url("/_ah/img/abc".to_string())),
            "http://host/_ah/img/abc"
        );
        assert_eq!(
            client.image_src(&ImageRef::Url("https://cdn/x.png".to_string())),
            "https://cdn/x.png"
        );
        assert_eq!(
            client.image_src(&ImageRef::BlobKey("abc".to_string())),
            "http://host/serve-image?blob-key=abc"
        );
    }

    #[test]
    fn parse_comment_list_reads_named_variant() {
        let data = json!([{
            "id": 7,
            "name": "heidi@example.com",
            "mood": "Happy",
            "content": "Nice site",
            "imageUrl": "/_ah/img/k",
            "sentiment": 0.8,
            "timestamp": 1_593_000_000_000i64
        }]);
        let comments = ApiClient::parse_comment_list_response(data).expect("should parse");
        assert_eq!(comments.len(), 1);
        let c = &comments[0];
        assert_eq!(c.id, 7);
        assert_eq!(c.author, Author::Named("heidi@example.com".to_string()));
        assert_eq!(c.mood.as_deref(), Some("Happy"));
        assert_eq!(c.image, Some(ImageRef::Url("/_ah/img/k".to_string())));
        assert!((c.sentiment.expect("sentiment") - 0.8).abs() < 1e-6);
        assert_eq!(c.timestamp_ms, 1_593_000_000_000);
    }

    #[test]
    fn parse_comment_list_reads_user_id_variant() {
        let data = json!([{
            "id": "12",
            "userId": "u-1",
            "content": "hello",
            "blobKeyString": "blob-1",
            "timestamp": 5
        }]);
        let comments = ApiClient::parse_comment_list_response(data).expect("should parse");
        let c = &comments[0];
        assert_eq!(c.id, 12);
        assert_eq!(c.author, Author::UserId("u-1".to_string()));
        assert_eq!(c.image, Some(ImageRef::BlobKey("blob-1".to_string())));
        assert!(c.mood.is_none());
        assert!(c.sentiment.is_none());
    }

    #[test]
    fn parse_comment_list_skips_entries_without_id() {
        let data = json!([
            {"content": "no id"},
            {"id": 1, "content": "ok"},
            {"id": "not-a-number", "content": "bad id"}
        ]);
        let comments = ApiClient::parse_comment_list_response(data).expect("should parse");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, 1);
        assert_eq!(comments[0].author, Author::Anonymous);
    }

    #[test]
    fn parse_comment_list_rejects_non_array() {
        let err = ApiClient::parse_comment_list_response(json!({"comments": []}))
            .expect_err("object is not a comment list");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn parse_empty_comment_list_is_ok() {
        let comments = ApiClient::parse_comment_list_response(json!([])).expect("should parse");
        assert!(comments.is_empty());
    }

    #[test]
    fn parse_marker_list_skips_malformed_entries() {
        let data = json!([
            {"lat": 1.5, "lng": 2.5, "content": "here"},
            {"lat": "x", "lng": 2.5, "content": "bad"},
            {"lng": 2.5, "content": "missing lat"}
        ]);
        let markers = ApiClient::parse_marker_list_response(data).expect("should parse");
        assert_eq!(markers, vec![Marker::new(1.5, 2.5, "here")]);
    }

    #[test]
    fn parse_mood_counts_keeps_numeric_entries() {
        let data = json!({"Happy": 3, "Sad": 1, "Weird": "many"});
        let counts = ApiClient::parse_mood_counts_response(data).expect("should parse");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("Happy"), Some(&3));
        assert_eq!(counts.get("Sad"), Some(&1));
    }

    #[test]
    fn delete_form_serializes_id() {
        let v = serde_json::to_value(DeleteCommentForm { id: 7 }).expect("should serialize");
        assert_eq!(v["id"], 7);
    }
}
