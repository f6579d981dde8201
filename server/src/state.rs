use std::sync::Arc;

use tracing::info;

use crate::{config::Config, error::AppError, inventory::Store, session::Sessions};

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new() -> Result<Arc<Self>, AppError> {
        Self::from_config(Config::load())
    }

    pub fn from_config(config: Config) -> Result<Arc<Self>, AppError> {
        let store = Store::open(&config.inventory_file)?;
        info!(cars = store.len(), file = %config.inventory_file, "Inventory loaded");

        Ok(Arc::new(Self {
            config,
            store,
            sessions: Sessions::new(),
        }))
    }
}
