use crate::api::{ApiResult, ArticleStore};
use crate::models::Article;

pub(crate) const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this article?";
pub(crate) const DELETED_NOTICE: &str = "Article deleted.";

pub(crate) async fn delete_article<S>(store: &S, id: &str) -> ApiResult<()>
where
    S: ArticleStore + ?Sized,
{
    match store.delete_article(id).await {
        Ok(()) => {
            tracing::info!(article_id = %id, "article deleted");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(article_id = %id, error = %e, "delete failed");
            Err(e)
        }
    }
}

/// Drop a deleted article from a listing. Unknown ids leave it unchanged.
pub(crate) fn remove_row(rows: &mut Vec<Article>, id: &str) {
    rows.retain(|a| a.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{ArticlePayload, Category};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingStore {
        deleted: RefCell<Vec<String>>,
        fail: Option<ApiError>,
    }

    #[async_trait(?Send)]
    impl ArticleStore for RecordingStore {
        async fn fetch_article(&self, _id: &str) -> ApiResult<Article> {
            Err(ApiError::Network("unused".to_string()))
        }

        async fn create_article(&self, _payload: &ArticlePayload) -> ApiResult<Article> {
            Err(ApiError::Network("unused".to_string()))
        }

        async fn update_article(&self, _id: &str, _payload: &ArticlePayload) -> ApiResult<()> {
            Err(ApiError::Network("unused".to_string()))
        }

        async fn list_my_articles(&self) -> ApiResult<Vec<Article>> {
            Ok(vec![])
        }

        async fn delete_article(&self, id: &str) -> ApiResult<()> {
            if let Some(e) = &self.fail {
                return Err(e.clone());
            }
            self.deleted.borrow_mut().push(id.to_string());
            Ok(())
        }
    }

    fn row(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {id}"),
            content: None,
            category: Category::Tech,
            tags: None,
            author_id: Some("1".to_string()),
            author: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_delete_then_remove_row() {
        let store = RecordingStore::default();
        let mut rows = vec![row("1"), row("2"), row("3")];

        block_on(delete_article(&store, "2")).expect("deleted");
        remove_row(&mut rows, "2");

        let ids: Vec<&str> = rows.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(*store.deleted.borrow(), vec!["2".to_string()]);

        remove_row(&mut rows, "missing");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_failed_delete_surfaces_backend_message() {
        let store = RecordingStore {
            fail: Some(ApiError::http(403, r#"{"error": "Not your article."}"#, "Failed to delete")),
            ..Default::default()
        };

        let err = block_on(delete_article(&store, "1")).expect_err("forbidden");

        assert_eq!(err.to_string(), "Not your article.");
        assert!(store.deleted.borrow().is_empty());
    }

    #[test]
    fn test_expired_session_on_delete() {
        let store = RecordingStore {
            fail: Some(ApiError::Unauthorized),
            ..Default::default()
        };

        let err = block_on(delete_article(&store, "1")).expect_err("expired");

        assert!(err.is_session_expired());
    }
}
