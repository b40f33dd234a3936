//! Application state for the catalog service.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::{self, DbPool};
use crate::services::{CatalogService, UploadService};
use crate::{Config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Record lifecycle service.
    pub catalog: CatalogService,
    /// Configuration the state was built from.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create the application state: open the store, apply the schema and
    /// make sure the content directory exists.
    pub async fn new(config: Config) -> Result<Self> {
        let db = db::init_pool(&config.database.path).await?;
        db::initialize_schema(&db).await?;

        let uploads = UploadService::new(&config.storage.upload_dir);
        uploads.ensure_dir().await?;

        let catalog = CatalogService::new(db.clone(), uploads);

        Ok(Self {
            db,
            catalog,
            config: Arc::new(config),
        })
    }
}
