//! Application state management.

use std::sync::Arc;

use crate::config::LedgerConfig;
use crate::domain::{FaucetClient, LedgerGateway, LedgerStore};

use super::service::AppService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppService>,
    pub gateway: Arc<dyn LedgerGateway>,
    pub faucet: Arc<dyn FaucetClient>,
    pub store: Arc<dyn LedgerStore>,
}

impl AppState {
    /// Create a new application state
    #[must_use]
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        faucet: Arc<dyn FaucetClient>,
        store: Arc<dyn LedgerStore>,
        config: LedgerConfig,
    ) -> Self {
        let service = Arc::new(AppService::new(
            Arc::clone(&gateway),
            Arc::clone(&faucet),
            Arc::clone(&store),
            config,
        ));
        Self {
            service,
            gateway,
            faucet,
            store,
        }
    }
}
