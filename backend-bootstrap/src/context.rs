use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{Mutex, RwLock};

use backend_application::commands::{auth_commands, store_commands};
use backend_application::{AppState, Metrics, TabCache};
use backend_domain::services::LoginThrottle;
use backend_infrastructure::{AppConfig, DocumentStore, StoreListFileRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(DocumentStore::open(&runtime_config.data_dir).await?);

        let store_list = Arc::new(StoreListFileRepository::new());
        let mut stores = {
            use backend_domain::StoreListRepository;
            store_list
                .load_stores(&runtime_config.stores_path)
                .await
                .unwrap_or_default()
        };
        if stores.is_empty() {
            stores = runtime_config.default_stores.clone();
        }
        let stores = store_commands::normalize_store_list(stores);

        let throttle = LoginThrottle::new(
            runtime_config.max_login_attempts,
            (runtime_config.login_window_seconds as i64) * 1_000,
        );
        let dashboard = TabCache::new(
            (runtime_config.dashboard_cache_seconds as i64) * 1_000,
            runtime_config.dashboard_cache_capacity,
        );

        let state = AppState {
            config: runtime_config,
            users: store.clone(),
            ledger: store.clone(),
            codes: store.clone(),
            loans: store.clone(),
            rewards: store,
            store_list,
            stores: Arc::new(RwLock::new(stores)),
            throttle: Arc::new(Mutex::new(throttle)),
            dashboard: Arc::new(dashboard),
            metrics: Arc::new(Metrics::default()),
        };

        auth_commands::seed_admin(&state).await?;

        Ok(Self { state })
    }
}
