use std::sync::Arc;

use backend_domain::ports::{
    CodeRepository, LedgerRepository, LoanRepository, RewardRepository, StoreListRepository,
    UserRepository,
};
use backend_domain::services::LoginThrottle;
use backend_domain::RuntimeConfig;
use tokio::sync::{Mutex, RwLock};

use crate::{Metrics, TabCache};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub codes: Arc<dyn CodeRepository>,
    pub loans: Arc<dyn LoanRepository>,
    pub rewards: Arc<dyn RewardRepository>,
    pub store_list: Arc<dyn StoreListRepository>,
    pub stores: Arc<RwLock<Vec<String>>>,
    pub throttle: Arc<Mutex<LoginThrottle>>,
    pub dashboard: Arc<TabCache>,
    pub metrics: Arc<Metrics>,
}
