//! Application state shared across handlers.

use crate::auth::UserRegistry;
use crate::config::{Config, StatusMode};
use crate::error::{ApiError, AppError, Result};
use crate::library::Catalog;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Read-only book catalog.
    pub catalog: Arc<Catalog>,
    /// Registered users.
    pub users: Arc<UserRegistry>,
}

impl AppState {
    /// Create state around a catalog with an empty user registry.
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            users: Arc::new(UserRegistry::new()),
        }
    }

    /// Create state with the catalog named by the config.
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = Catalog::from_seed(config.catalog.seed.as_deref())?;
        tracing::info!(
            books = catalog.len(),
            seed = ?config.catalog.seed,
            "Catalog loaded"
        );
        Ok(Self::new(config, catalog))
    }

    /// Configured wire compatibility mode.
    pub fn mode(&self) -> StatusMode {
        self.config.api.status_codes
    }

    /// Bind an error to the configured status mapping.
    pub fn reject(&self, error: AppError) -> ApiError {
        ApiError::new(error, self.mode())
    }
}
