use crate::config::Config;
use crate::db::{Db, DocumentStore};
use crate::error::AppError;
use std::sync::Arc;

/// Shared by every handler. The store is optional so the service can still
/// answer diagnostics when no database is configured.
pub struct AppState {
    pub config: Config,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn DocumentStore>>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }

    /// Opens the configured SQLite store. Failure to open is logged and the
    /// service runs without a store.
    pub fn from_config(config: Config) -> Arc<Self> {
        let store: Option<Arc<dyn DocumentStore>> = match config.database_url.as_deref() {
            None => {
                log::warn!("DATABASE_URL not set, data endpoints will be unavailable");
                None
            }
            Some(path) => match Db::open(path, &config.database_name) {
                Ok(db) => {
                    log::info!("opened store {} at {}", config.database_name, path);
                    Some(Arc::new(db))
                }
                Err(e) => {
                    log::error!("failed to open store at {}: {}", path, e);
                    None
                }
            },
        };
        Self::new(config, store)
    }

    pub fn store(&self) -> Result<&dyn DocumentStore, AppError> {
        self.store.as_deref().ok_or(AppError::StoreUnavailable)
    }

    pub fn try_store(&self) -> Option<&dyn DocumentStore> {
        self.store.as_deref()
    }
}
