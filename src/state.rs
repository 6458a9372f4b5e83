use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, LogService, SeaOrmAuthService, SeaOrmLogService, SeaOrmTagService, TagService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub log_service: Arc<dyn LogService>,

    pub tag_service: Arc<dyn TagService>,
}

impl SharedState {
    /// Connects the store, applies migrations and seeds the admin account.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if store
            .ensure_admin_user(&config.bootstrap, &config.security)
            .await?
        {
            info!("Bootstrap admin account ready");
        }

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already-migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let log_service = Arc::new(SeaOrmLogService::new(
            store.clone(),
            config.search.page_size,
            config.search.recent_limit,
        )) as Arc<dyn LogService>;

        let tag_service = Arc::new(SeaOrmTagService::new(store.clone()))
            as Arc<dyn TagService>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            log_service,
            tag_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
