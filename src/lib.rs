//! Itemd - minimal in-memory item catalog served over HTTP
//!
//! This crate provides:
//! - An in-memory, thread-safe item store
//! - An HTTP API for creating, fetching, and listing items
//!
//! # Usage
//!
//! As a library (embedded):
//! ```ignore
//! use itemd::{Config, Service};
//!
//! let service = Service::new(Config::default());
//! // service.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! itemd --config ~/.itemd/config.toml
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ItemdError, Result};
pub use store::{Item, ItemStore};

use std::sync::Arc;

/// Composition root: owns the configuration and the process-wide item store.
pub struct Service {
    /// Configuration
    pub config: Config,

    /// The item store, initialized empty and discarded at process exit
    store: Arc<ItemStore>,
}

impl Service {
    /// Create a new Service instance with the given configuration
    pub fn new(config: Config) -> Self {
        Service {
            config,
            store: Arc::new(ItemStore::new()),
        }
    }

    /// Create a Service instance around an existing store (for embedding)
    pub fn with_store(config: Config, store: Arc<ItemStore>) -> Self {
        Service { config, store }
    }

    /// Get a handle to the item store
    pub fn store(&self) -> &Arc<ItemStore> {
        &self.store
    }

    /// Start the HTTP API server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.store.clone()).await
    }
}
