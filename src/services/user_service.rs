//! Domain service for user accounts.
//!
//! Handles validation, username uniqueness, and password hashing before a
//! user document is persisted.

use thiserror::Error;

use crate::domain::{UserDraft, Violations};
use crate::entities::users;

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<sea_orm::DbErr>().is_some() {
            return Self::Database(format!("{err:#}"));
        }
        Self::Internal(err.to_string())
    }
}

impl From<Violations> for UserError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Returns every user ordered by id.
    async fn list(&self) -> Result<Vec<users::Model>, UserError>;

    /// Validates, hashes the password, and persists a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] for a missing/short password or a
    /// short username, and [`UserError::UsernameTaken`] if the username exists.
    async fn create(&self, draft: UserDraft) -> Result<users::Model, UserError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_display() {
        let err = UserError::UsernameTaken("bananica".to_string());
        assert_eq!(err.to_string(), "Username already taken: bananica");
    }

    #[test]
    fn anyhow_without_db_error_is_internal() {
        let err: UserError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, UserError::Internal(_)));
    }
}
