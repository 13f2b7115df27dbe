use crate::models::{
    Article, ArticleEnvelope, ArticleList, ArticlePayload, AuthResponse, LoginRequest,
    MeResponse, SignupRequest, User,
};
use crate::storage::{load_token_from_storage, TOKEN_KEY, USER_KEY};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
pub(crate) enum ApiError {
    /// A 401 on an authenticated request: the stored token is no longer valid.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Unauthorized => ApiErrorKind::Unauthorized,
            Self::Network(_) => ApiErrorKind::Network,
            Self::Http { .. } => ApiErrorKind::Http,
            Self::Parse(_) => ApiErrorKind::Parse,
        }
    }

    /// The stored token was rejected; callers sign out and route to `/login`.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    /// Build an HTTP error, preferring the backend's `{"error": "..."}` message.
    pub(crate) fn http(status: u16, body: &str, ctx: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("{ctx} ({status})"));
        Self::Http { status, message }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub log_level: String,
}

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

impl EnvConfig {
    /// Read `window.ENV`, accepting both `API_URL` and the lowercase `api_url`.
    pub fn new() -> Self {
        let read = |keys: &[&str]| -> Option<String> {
            let env = web_sys::window()?.get("ENV")?;
            if env.is_undefined() || !env.is_object() {
                return None;
            }
            keys.iter().find_map(|k| {
                js_sys::Reflect::get(&env, &(*k).into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };

        Self {
            api_url: read(&["API_URL", "api_url"]).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_level: read(&["LOG_LEVEL", "log_level"])
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.trim()).unwrap_or(tracing::Level::INFO)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence boundary for articles: hydration, submission and the author's dashboard.
#[async_trait(?Send)]
pub(crate) trait ArticleStore {
    async fn fetch_article(&self, id: &str) -> ApiResult<Article>;
    async fn create_article(&self, payload: &ArticlePayload) -> ApiResult<Article>;
    async fn update_article(&self, id: &str, payload: &ArticlePayload) -> ApiResult<()>;
    /// Articles written by the signed-in user.
    async fn list_my_articles(&self) -> ApiResult<Vec<Article>>;
    async fn delete_article(&self, id: &str) -> ApiResult<()>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let mut client = Self::new(EnvConfig::new().api_url);
        client.token = load_token_from_storage();
        client
    }

    pub fn save_to_storage(&self) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            if let Some(token) = &self.token {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
    }

    pub fn clear_storage() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn logout(&mut self) {
        self.token = None;
        Self::clear_storage();
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn article_path(id: &str) -> String {
        format!("/articles/{}", urlencoding::encode(id))
    }

    /// Single request/response round trip. No retries.
    pub(crate) async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let res = self.send_api(method, path, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// Like [`Self::request_api`] but ignores the response body (`204`, `{message}`).
    pub(crate) async fn request_api_discard(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<()> {
        self.send_api(method, path, body).await.map(|_| ())
    }

    async fn send_api(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status.as_u16() == 401 && self.token.is_some() {
            Err(ApiError::Unauthorized)
        } else {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(%method, path, status = status.as_u16(), "request failed");
            Err(ApiError::http(status.as_u16(), &body, "Request failed"))
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.request_api(
            Method::POST,
            "/auth/login",
            Some(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    pub async fn signup(&self, username: &str, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.request_api(
            Method::POST,
            "/auth/signup",
            Some(&SignupRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    /// Validate the stored token.
    pub async fn me(&self) -> ApiResult<User> {
        let res: MeResponse = self.request_api(Method::GET, "/auth/me", None::<&()>).await?;
        Ok(res.user)
    }
}

#[async_trait(?Send)]
impl ArticleStore for ApiClient {
    async fn fetch_article(&self, id: &str) -> ApiResult<Article> {
        let env: ArticleEnvelope = self
            .request_api(Method::GET, &Self::article_path(id), None::<&()>)
            .await?;
        Ok(env.article)
    }

    async fn create_article(&self, payload: &ArticlePayload) -> ApiResult<Article> {
        let env: ArticleEnvelope = self
            .request_api(Method::POST, "/articles", Some(payload))
            .await?;
        Ok(env.article)
    }

    async fn update_article(&self, id: &str, payload: &ArticlePayload) -> ApiResult<()> {
        self.request_api_discard(Method::PUT, &Self::article_path(id), Some(payload))
            .await
    }

    async fn list_my_articles(&self) -> ApiResult<Vec<Article>> {
        let list: ArticleList = self
            .request_api(Method::GET, "/articles/user/me", None::<&()>)
            .await?;
        Ok(list.articles)
    }

    async fn delete_article(&self, id: &str) -> ApiResult<()> {
        self.request_api_discard(Method::DELETE, &Self::article_path(id), None::<&()>)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api/".to_string());
        assert_eq!(client.base_url, "http://localhost:5000/api");
        assert_eq!(client.url("/ai/improve"), "http://localhost:5000/api/ai/improve");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_api_client_auth_header() {
        let mut client = ApiClient::new(DEFAULT_API_URL.to_string());
        assert!(client.get_auth_header().is_none());
        assert!(!client.is_authenticated());

        client.set_token("my-jwt-token".to_string());
        assert_eq!(client.get_auth_header().as_deref(), Some("Bearer my-jwt-token"));
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_article_path_encodes_id() {
        assert_eq!(ApiClient::article_path("12"), "/articles/12");
        assert_eq!(ApiClient::article_path("a/b"), "/articles/a%2Fb");
    }

    #[test]
    fn test_http_error_prefers_backend_message() {
        let e = ApiError::http(500, r#"{"error": "AI quota exceeded"}"#, "Request failed");
        assert_eq!(e.to_string(), "AI quota exceeded");
        assert_eq!(e.kind(), ApiErrorKind::Http);

        let e = ApiError::http(502, "<html>bad gateway</html>", "Request failed");
        assert_eq!(e.to_string(), "Request failed (502)");
    }

    #[test]
    fn test_only_unauthorized_expires_session() {
        assert!(ApiError::Unauthorized.is_session_expired());
        assert!(!ApiError::Network("offline".to_string()).is_session_expired());
        assert!(!ApiError::http(403, "{}", "Request failed").is_session_expired());
    }

    #[test]
    fn test_login_request_serialization() {
        let v = serde_json::to_value(LoginRequest {
            email: "u@example.com".to_string(),
            password: "pass".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v, serde_json::json!({"email": "u@example.com", "password": "pass"}));
    }
}
