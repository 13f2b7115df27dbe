mod content;
mod tags;

pub(crate) use content::is_empty_body;
pub(crate) use tags::{join_tags, merge_tags, split_tags};

use crate::models::{Article, ArticlePayload, Category};

/// Fields a draft must have before it can be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DraftField {
    Title,
    Body,
}

/// The article being authored.
///
/// Tags are held as the raw comma-separated text the user edits;
/// [`Draft::tags`] is the normalized, duplicate-free view.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Draft {
    pub title: String,
    pub body: String,
    pub category: Category,
    pub tags_raw: String,
}

impl Draft {
    pub fn from_article(a: &Article) -> Self {
        Self {
            title: a.title.clone(),
            body: a.content.clone().unwrap_or_default(),
            category: a.category,
            tags_raw: a.tags.clone().unwrap_or_default(),
        }
    }

    pub fn tags(&self) -> Vec<String> {
        split_tags(&self.tags_raw)
    }

    pub fn has_content(&self) -> bool {
        !is_empty_body(Some(&self.body))
    }

    /// Fields that block submission, in display order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = vec![];
        if self.title.trim().is_empty() {
            missing.push(DraftField::Title);
        }
        if !self.has_content() {
            missing.push(DraftField::Body);
        }
        missing
    }

    pub fn to_payload(&self) -> ArticlePayload {
        ArticlePayload {
            title: self.title.clone(),
            content: self.body.clone(),
            category: self.category,
            tags: join_tags(&self.tags()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: "9".to_string(),
            title: "Caches".to_string(),
            content: Some("<p>body</p>".to_string()),
            category: Category::Database,
            tags: Some("redis,  cache ,redis".to_string()),
            author_id: None,
            author: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_from_article_hydrates_every_field() {
        let d = Draft::from_article(&article());
        assert_eq!(d.title, "Caches");
        assert_eq!(d.body, "<p>body</p>");
        assert_eq!(d.category, Category::Database);
        assert_eq!(d.tags(), vec!["redis".to_string(), "cache".to_string()]);
    }

    #[test]
    fn test_from_article_without_content_is_empty() {
        let mut a = article();
        a.content = None;
        assert!(!Draft::from_article(&a).has_content());
    }

    #[test]
    fn test_payload_normalizes_tags() {
        let p = Draft::from_article(&article()).to_payload();
        assert_eq!(p.tags, "redis, cache");
        assert_eq!(p.content, "<p>body</p>");
    }

    #[test]
    fn test_missing_fields_reports_each_reason() {
        let mut d = Draft::default();
        assert_eq!(d.missing_fields(), vec![DraftField::Title, DraftField::Body]);

        d.title = "   ".to_string();
        d.body = "<p>x</p>".to_string();
        assert_eq!(d.missing_fields(), vec![DraftField::Title]);

        d.title = "T".to_string();
        d.body = "<p></p>".to_string();
        assert_eq!(d.missing_fields(), vec![DraftField::Body]);

        d.body = "<p>x</p>".to_string();
        assert!(d.missing_fields().is_empty());
    }
}
