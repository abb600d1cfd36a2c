//! Domain service for blog documents.
//!
//! Validates candidate payloads, talks to the store, and reports outcomes as
//! [`BlogError`] so the HTTP layer can map them onto status codes.

use thiserror::Error;

use crate::domain::{BlogDraft, BlogId, Violations};
use crate::entities::blogs;

/// Errors specific to blog operations.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Blog not found: {0}")]
    NotFound(BlogId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BlogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BlogError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<sea_orm::DbErr>().is_some() {
            return Self::Database(format!("{err:#}"));
        }
        Self::Internal(err.to_string())
    }
}

impl From<Violations> for BlogError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

/// Domain service trait for blogs.
#[async_trait::async_trait]
pub trait BlogService: Send + Sync {
    /// Returns every blog ordered by id.
    async fn list(&self) -> Result<Vec<blogs::Model>, BlogError>;

    /// Returns a single blog.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::NotFound`] if no blog has this id.
    async fn get(&self, id: BlogId) -> Result<blogs::Model, BlogError>;

    /// Validates and persists a new blog.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Validation`] if `title` or `author` is missing or blank.
    async fn create(&self, draft: BlogDraft) -> Result<blogs::Model, BlogError>;

    /// Applies the supplied fields to an existing blog.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Validation`] for invalid fields and
    /// [`BlogError::NotFound`] if the id does not resolve.
    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<blogs::Model, BlogError>;

    /// Removes a blog. Returns whether anything was removed; a missing blog is not an error.
    async fn delete(&self, id: BlogId) -> Result<bool, BlogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_error_display() {
        let err = BlogError::NotFound(BlogId::new(42));
        assert_eq!(err.to_string(), "Blog not found: 42");

        let err = BlogError::Validation(Violations::single("title", "title is required"));
        assert_eq!(err.to_string(), "Validation failed: title is required");
    }

    #[test]
    fn db_errors_convert_to_database_variant() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let err: BlogError = db_err.into();
        assert!(matches!(err, BlogError::Database(_)));

        let wrapped = anyhow::Error::new(sea_orm::DbErr::Custom("test".to_string()))
            .context("Failed to list blogs");
        assert!(matches!(BlogError::from(wrapped), BlogError::Database(_)));
    }
}
