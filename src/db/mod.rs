use crate::domain::{BlogChanges, BlogId, NewBlog};
use crate::entities::{blogs, users};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::constants::store::{
    ACQUIRE_TIMEOUT, CONNECT_TIMEOUT, IDLE_TIMEOUT, IN_MEMORY_LIFETIME, MAX_LIFETIME,
};

pub mod migrator;
pub mod repositories;

pub use repositories::user::hash_password;

/// Idle timeout and max lifetime for pooled connections. sqlx otherwise
/// recycles idle connections after 10 minutes and all connections after 30,
/// which would drop an in-memory database.
const fn pool_timeouts(in_memory: bool) -> (Duration, Duration) {
    if in_memory {
        (IN_MEMORY_LIFETIME, IN_MEMORY_LIFETIME)
    } else {
        (IDLE_TIMEOUT, MAX_LIFETIME)
    }
}

/// Handle to the document store. Cheap to clone; every clone shares one pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each connection to an in-memory SQLite database sees its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(CONNECT_TIMEOUT)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .sqlx_logging(false);

        let (idle_timeout, max_lifetime) = pool_timeouts(in_memory);
        opt.idle_timeout(idle_timeout).max_lifetime(max_lifetime);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Closes the pool for every clone of this store.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_blogs(&self) -> Result<Vec<blogs::Model>> {
        self.blog_repo().list_all().await
    }

    pub async fn get_blog(&self, id: BlogId) -> Result<Option<blogs::Model>> {
        self.blog_repo().get(id).await
    }

    pub async fn count_blogs(&self) -> Result<u64> {
        self.blog_repo().count().await
    }

    pub async fn add_blog(&self, blog: NewBlog) -> Result<blogs::Model> {
        self.blog_repo().insert(blog).await
    }

    pub async fn update_blog(
        &self,
        id: BlogId,
        changes: BlogChanges,
    ) -> Result<Option<blogs::Model>> {
        self.blog_repo().update(id, changes).await
    }

    pub async fn remove_blog(&self, id: BlogId) -> Result<bool> {
        self.blog_repo().delete(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list_all().await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn add_user(
        &self,
        username: &str,
        name: &str,
        password_hash: String,
    ) -> Result<users::Model> {
        self.user_repo().insert(username, name, password_hash).await
    }
}
