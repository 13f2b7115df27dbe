use crate::api::{ApiClient, ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Rewrite modes accepted by `POST /ai/improve`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum TransformMode {
    Improve,
    Grammar,
    Concise,
    Title,
}

/// Every AI round trip a draft can have in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum AiAction {
    Improve,
    Grammar,
    Concise,
    Title,
    Tags,
}

impl From<TransformMode> for AiAction {
    fn from(m: TransformMode) -> Self {
        match m {
            TransformMode::Improve => Self::Improve,
            TransformMode::Grammar => Self::Grammar,
            TransformMode::Concise => Self::Concise,
            TransformMode::Title => Self::Title,
        }
    }
}

impl AiAction {
    /// Rewrite mode behind this action; `None` for tag suggestion.
    pub fn transform_mode(self) -> Option<TransformMode> {
        match self {
            Self::Improve => Some(TransformMode::Improve),
            Self::Grammar => Some(TransformMode::Grammar),
            Self::Concise => Some(TransformMode::Concise),
            Self::Title => Some(TransformMode::Title),
            Self::Tags => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Improve => "Improve Writing",
            Self::Grammar => "Fix Grammar",
            Self::Concise => "Make Concise",
            Self::Title => "Suggest Titles",
            Self::Tags => "Suggest Tags",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Improve => "Content improved!",
            Self::Grammar => "Content grammar fixed!",
            Self::Concise => "Content made concise!",
            Self::Title => "Title suggestions generated!",
            Self::Tags => "Tags suggested!",
        }
    }

    /// Phrase completing "Write some content first before ...".
    pub fn guard_phrase(self) -> &'static str {
        match self {
            Self::Tags => "suggesting tags",
            _ => "using AI assist",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TransformResult {
    /// Replacement body for improve/grammar/concise.
    Body(String),
    /// Candidate titles for `title`.
    Titles(Vec<String>),
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct ImproveRequest<'a> {
    pub content: &'a str,
    pub mode: TransformMode,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct ImproveResponse {
    pub improved: String,
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct SuggestTagsRequest<'a> {
    pub content: &'a str,
    pub title: &'a str,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct SuggestTagsResponse {
    pub tags: Vec<String>,
}

/// `title` mode returns a JSON-encoded array of strings inside `improved`.
///
/// Anything else is a hard failure; a partial list is never returned.
pub(crate) fn parse_title_suggestions(improved: &str) -> ApiResult<Vec<String>> {
    let titles: Vec<String> = serde_json::from_str(improved.trim())
        .map_err(|e| ApiError::parse(format!("title suggestions: {e}")))?;
    Ok(titles
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Stateless request/response contract to the AI service.
#[async_trait(?Send)]
pub(crate) trait AiAssistant {
    async fn transform(&self, body: &str, mode: TransformMode) -> ApiResult<TransformResult>;
    async fn suggest_tags(&self, body: &str, title: &str) -> ApiResult<Vec<String>>;
}

#[async_trait(?Send)]
impl AiAssistant for ApiClient {
    async fn transform(&self, body: &str, mode: TransformMode) -> ApiResult<TransformResult> {
        let res: ImproveResponse = self
            .request_api(
                Method::POST,
                "/ai/improve",
                Some(&ImproveRequest {
                    content: body,
                    mode,
                }),
            )
            .await?;

        match mode {
            TransformMode::Title => parse_title_suggestions(&res.improved).map(TransformResult::Titles),
            _ => Ok(TransformResult::Body(res.improved)),
        }
    }

    async fn suggest_tags(&self, body: &str, title: &str) -> ApiResult<Vec<String>> {
        let res: SuggestTagsResponse = self
            .request_api(
                Method::POST,
                "/ai/suggest-tags",
                Some(&SuggestTagsRequest {
                    content: body,
                    title,
                }),
            )
            .await?;
        Ok(res.tags)
    }
}
