//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::db::{Store, hash_password};
use crate::domain::{UserDraft, validate_new_user};
use crate::entities::users;
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sea_orm::DbErr>().is_some_and(|db_err| {
        matches!(
            db_err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        )
    })
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list(&self) -> Result<Vec<users::Model>, UserError> {
        Ok(self.store.list_users().await?)
    }

    async fn create(&self, draft: UserDraft) -> Result<users::Model, UserError> {
        let new_user = validate_new_user(draft)?;

        if self
            .store
            .get_user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameTaken(new_user.username));
        }

        // Argon2 is CPU-intensive and would block the async runtime if run directly.
        let password = new_user.password;
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| UserError::Hashing(format!("hashing task panicked: {e}")))?
            .map_err(|e| UserError::Hashing(e.to_string()))?;

        let saved = match self
            .store
            .add_user(&new_user.username, &new_user.name, password_hash)
            .await
        {
            Ok(saved) => saved,
            // Lost a race against a concurrent insert of the same username.
            Err(err) if is_unique_violation(&err) => {
                warn!(username = %new_user.username, "Duplicate username rejected by store");
                return Err(UserError::UsernameTaken(new_user.username));
            }
            Err(err) => return Err(err.into()),
        };

        metrics::counter!("users_created_total").increment(1);
        info!(user_id = saved.id, username = %saved.username, "User created");

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmUserService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };
        SeaOrmUserService::new(store, security)
    }

    fn draft(username: &str, password: Option<&str>) -> UserDraft {
        UserDraft {
            username: Some(username.to_string()),
            name: Some("Jagoda Banana".to_string()),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let service = service().await;
        let user = service
            .create(draft("lubenica", Some("123456")))
            .await
            .unwrap();

        assert_eq!(user.username, "lubenica");
        assert_ne!(user.password_hash, "123456");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let service = service().await;
        service
            .create(draft("bananica", Some("123456789")))
            .await
            .unwrap();

        let err = service
            .create(draft("bananica", Some("123456789")))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::UsernameTaken(name) if name == "bananica"));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn padded_username_counts_as_duplicate() {
        let service = service().await;
        service
            .create(draft("bananica", Some("123456789")))
            .await
            .unwrap();

        let err = service
            .create(draft("  bananica  ", Some("123456789")))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::UsernameTaken(name) if name == "bananica"));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn short_username_is_rejected_before_store() {
        let service = service().await;
        let err = service
            .create(draft("ab", Some("123456")))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[test]
    fn unique_violation_detection_ignores_other_errors() {
        let err = anyhow::Error::new(sea_orm::DbErr::Custom("nope".to_string()));
        assert!(!is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow::anyhow!("plain")));
    }
}
