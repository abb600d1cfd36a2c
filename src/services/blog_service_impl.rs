//! `SeaORM` implementation of the `BlogService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::{BlogDraft, BlogId, validate_blog_changes, validate_new_blog};
use crate::entities::blogs;
use crate::services::blog_service::{BlogError, BlogService};

pub struct SeaOrmBlogService {
    store: Store,
}

impl SeaOrmBlogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlogService for SeaOrmBlogService {
    async fn list(&self) -> Result<Vec<blogs::Model>, BlogError> {
        Ok(self.store.list_blogs().await?)
    }

    async fn get(&self, id: BlogId) -> Result<blogs::Model, BlogError> {
        self.store
            .get_blog(id)
            .await?
            .ok_or(BlogError::NotFound(id))
    }

    async fn create(&self, draft: BlogDraft) -> Result<blogs::Model, BlogError> {
        let blog = validate_new_blog(draft)?;
        let saved = self.store.add_blog(blog).await?;

        metrics::counter!("blogs_created_total").increment(1);
        info!(blog_id = saved.id, title = %saved.title, "Blog created");

        Ok(saved)
    }

    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<blogs::Model, BlogError> {
        let changes = validate_blog_changes(draft)?;

        let updated = self
            .store
            .update_blog(id, changes)
            .await?
            .ok_or(BlogError::NotFound(id))?;

        info!(blog_id = updated.id, version = updated.version, "Blog updated");
        Ok(updated)
    }

    async fn delete(&self, id: BlogId) -> Result<bool, BlogError> {
        let removed = self.store.remove_blog(id).await?;
        if removed {
            info!(blog_id = %id, "Blog deleted");
        } else {
            debug!(blog_id = %id, "Delete requested for missing blog");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmBlogService {
        SeaOrmBlogService::new(Store::new("sqlite::memory:").await.unwrap())
    }

    fn draft(title: &str, author: &str, likes: Option<i32>) -> BlogDraft {
        BlogDraft {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            url: Some("https://example.com".to_string()),
            likes,
        }
    }

    #[tokio::test]
    async fn create_defaults_likes_and_persists() {
        let service = service().await;
        let blog = service.create(draft("A", "B", None)).await.unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_create_leaves_store_unchanged() {
        let service = service().await;
        let err = service.create(draft("", "", Some(42))).await.unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_blog_is_not_found() {
        let service = service().await;
        let err = service
            .update(BlogId::new(5), draft("A", "B", Some(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::NotFound(id) if id == BlogId::new(5)));
    }

    #[tokio::test]
    async fn invalid_update_does_not_touch_blog() {
        let service = service().await;
        let blog = service.create(draft("A", "B", Some(3))).await.unwrap();
        let id = BlogId::new(blog.id);

        let err = service
            .update(id, draft("", "B", Some(9)))
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
        assert_eq!(service.get(id).await.unwrap(), blog);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = service().await;
        let blog = service.create(draft("A", "B", None)).await.unwrap();
        let id = BlogId::new(blog.id);

        assert!(service.delete(id).await.unwrap());
        assert!(!service.delete(id).await.unwrap());
        assert!(matches!(
            service.get(id).await.unwrap_err(),
            BlogError::NotFound(_)
        ));
    }
}
