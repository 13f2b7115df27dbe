use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Backend ids arrive as numbers from some endpoints and strings from others.
fn id_from_string_or_number<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(match Repr::deserialize(d)? {
        Repr::Text(s) => s,
        Repr::Number(n) => n.to_string(),
    })
}

fn opt_id_from_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "id_from_string_or_number")] String);

    Ok(Option::<Wrap>::deserialize(d)?.map(|w| w.0))
}

/// Signed-in account.
///
/// Fields beyond id/username are kept opaque so backend additions don't break parsing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct User {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub(crate) enum Category {
    #[default]
    Tech,
    #[serde(rename = "AI")]
    #[strum(serialize = "AI")]
    Ai,
    Backend,
    Frontend,
    DevOps,
    Database,
    Cloud,
    Security,
    Mobile,
    #[serde(other)]
    Other,
}

/// `null` is treated like an unknown name.
fn category_or_other<'de, D>(d: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Category>::deserialize(d)?.unwrap_or(Category::Other))
}

impl Category {
    /// Parse a stored category, mapping anything unknown to `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or(Self::Other)
    }
}

/// Persisted article as returned under the `article` envelope.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Article {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "category_or_other")]
    pub category: Category,
    /// Comma-joined; split/trim/filter on read.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "opt_id_from_string_or_number")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author: Option<ArticleAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Article {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author_id.as_deref() == Some(user.id.as_str())
    }
}

/// Author summary embedded in an article response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ArticleAuthor {
    #[serde(default)]
    pub username: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ArticleEnvelope {
    pub article: Article,
}

/// `GET /articles/user/me`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ArticleList {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Body of `POST /articles` and `PUT /articles/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ArticlePayload {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct MeResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_article_envelope_contract_deserialize() {
        let json = r#"{
            "article": {
                "id": 42,
                "title": "Building Fast Caches",
                "content": "<p>hi</p>",
                "category": "Backend",
                "tags": "rust, cache",
                "author_id": 7,
                "author": {"id": 7, "username": "ana"},
                "created_at": "2026-01-02T03:04:05Z"
            }
        }"#;
        let parsed: ArticleEnvelope = serde_json::from_str(json).expect("article should parse");
        let a = parsed.article;
        assert_eq!(a.id, "42");
        assert_eq!(a.category, Category::Backend);
        assert_eq!(a.tags.as_deref(), Some("rust, cache"));
        assert_eq!(a.author_id.as_deref(), Some("7"));
        assert_eq!(a.author.as_ref().map(|u| u.username.as_str()), Some("ana"));

        let owner: User = serde_json::from_str(r#"{"id": 7, "username": "ana"}"#).expect("user");
        let other: User = serde_json::from_str(r#"{"id": "8"}"#).expect("user");
        assert!(a.is_authored_by(&owner));
        assert!(!a.is_authored_by(&other));
    }

    #[test]
    fn test_article_tolerates_missing_and_unknown_fields() {
        let json = r#"{"id": "a1", "title": "t", "content": null, "category": "Gardening"}"#;
        let a: Article = serde_json::from_str(json).expect("article should parse");
        assert!(a.content.is_none());
        assert_eq!(a.category, Category::Other);
        assert!(a.tags.is_none());
        assert!(a.author_id.is_none());
    }

    #[test]
    fn test_null_category_maps_to_other() {
        let a: Article = serde_json::from_str(r#"{"id": 1, "title": "T", "category": null}"#)
            .expect("null category should not fail hydration");
        assert_eq!(a.category, Category::Other);

        let a: Article = serde_json::from_str(r#"{"id": 1, "title": "T"}"#).expect("missing category");
        assert_eq!(a.category, Category::Tech);
    }

    #[test]
    fn test_article_list_contract() {
        let json = r#"{"articles": [
            {"id": 3, "title": "One", "category": "Cloud", "created_at": "2026-03-01T10:00:00Z"},
            {"id": "4", "title": "Two"}
        ]}"#;
        let list: ArticleList = serde_json::from_str(json).expect("list should parse");
        let ids: Vec<&str> = list.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
        assert_eq!(list.articles[0].category, Category::Cloud);

        let empty: ArticleList = serde_json::from_str("{}").expect("empty list");
        assert!(empty.articles.is_empty());
    }

    #[test]
    fn test_category_wire_names() {
        let names: Vec<String> = Category::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "Tech", "AI", "Backend", "Frontend", "DevOps", "Database", "Cloud", "Security",
                "Mobile", "Other"
            ]
        );
        assert_eq!(serde_json::to_value(Category::Ai).expect("serialize"), "AI");
        assert_eq!(Category::parse_lenient("DevOps"), Category::DevOps);
        assert_eq!(Category::parse_lenient("nope"), Category::Other);
    }

    #[test]
    fn test_auth_response_contract_deserialize() {
        let json = r#"{"token": "jwt", "user": {"id": 3, "username": "u", "email": "u@example.com"}}"#;
        let parsed: AuthResponse = serde_json::from_str(json).expect("auth response should parse");
        assert_eq!(parsed.token, "jwt");
        assert_eq!(parsed.user.id, "3");
        assert_eq!(parsed.user.extra["email"], "u@example.com");
    }
}
