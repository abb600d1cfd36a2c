use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{BlogService, SeaOrmBlogService, SeaOrmUserService, UserService};

/// Process-wide handles, built once at start-up and injected into every handler.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub blog_service: Arc<dyn BlogService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    /// Opens the store described by `config` and wires the services on top of it.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let blog_service =
            Arc::new(SeaOrmBlogService::new(store.clone())) as Arc<dyn BlogService>;

        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;

        Self {
            config: Arc::new(config),
            store,
            blog_service,
            user_service,
        }
    }
}
