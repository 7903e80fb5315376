//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::{AdminConfig, CatalogConfig},
    services::images::ImageStore,
};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`. Handlers read partition
/// values from [`Self::catalog`] instead of the process environment.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    images: ImageStore,
}

impl AppState {
    /// Build the application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool, images: ImageStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                images,
            }),
        }
    }

    /// The loaded admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Category partition configuration.
    #[must_use]
    pub fn catalog(&self) -> &CatalogConfig {
        &self.inner.config.catalog
    }

    /// Partition tag served by this deployment.
    #[must_use]
    pub fn storefront(&self) -> &str {
        &self.inner.config.catalog.active
    }

    /// The `PostgreSQL` connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Banner image storage.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }
}
