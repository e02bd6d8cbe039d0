use std::sync::Arc;

use plantdx_core::error::CoreError;
use plantdx_db::repositories::DiseaseStore;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Disease store. `None` until the database connection is established.
    pub store: Option<Arc<dyn DiseaseStore>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DiseaseStore>, config: ServerConfig) -> Self {
        Self {
            store: Some(store),
            config: Arc::new(config),
        }
    }

    /// The initialized store, or [`CoreError::NotReady`].
    pub fn store(&self) -> Result<&dyn DiseaseStore, AppError> {
        self.store
            .as_deref()
            .ok_or(AppError::Core(CoreError::NotReady))
    }
}
