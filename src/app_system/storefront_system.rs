use std::sync::Arc;

use tracing::{error, info, warn};

use super::error::SystemError;
use crate::actor_framework::{ResourceActor, Snapshotter};
use crate::auth_actor::AuthService;
use crate::catalog::seed::demo_catalog;
use crate::clients::{AuthClient, CatalogClient};
use crate::config::StorefrontConfig;
use crate::domain::Product;
use crate::persistence::{FileStore, JsonSnapshot, KeyValueStore, MemoryStore, PRODUCTS_KEY};
use crate::product_actor::timestamp_ids;

/// The running storefront: the catalog store and auth service actors plus the
/// clients that reach them.
///
/// Clients are handed out explicitly; nothing looks them up globally.
pub struct StorefrontSystem {
    pub catalog_client: CatalogClient,
    pub auth_client: AuthClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts the system on the store selected by `config`. Must be called
    /// inside a Tokio runtime.
    pub fn new(config: &StorefrontConfig) -> Result<Self, SystemError> {
        let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => {
                let files = FileStore::new(dir);
                info!(storage_dir = %files.root().display(), "Using file-backed storage");
                Arc::new(files)
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_store(config, store)
    }

    pub fn with_store(
        config: &StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SystemError> {
        let buffer_size = config.channel_buffer.get();

        // 1. Catalog store, restored from its snapshot
        let snapshot = Arc::new(JsonSnapshot::<Product>::new(Arc::clone(&store), PRODUCTS_KEY));
        let products = match snapshot.load()? {
            Some(products) => {
                info!(products = products.len(), "Restored catalog");
                products
            }
            None => {
                let defaults = if config.seed_demo_catalog {
                    demo_catalog()
                } else {
                    Vec::new()
                };
                info!(products = defaults.len(), "No stored catalog, starting from defaults");
                if let Err(e) = snapshot.save(&defaults) {
                    warn!(error = %e, "Failed to write default catalog");
                }
                defaults
            }
        };

        let floor = products.iter().map(|p| p.id).max().unwrap_or(0);
        let (catalog_actor, catalog_resource_client) =
            ResourceActor::<Product>::new(buffer_size, timestamp_ids(floor));
        let catalog_actor = catalog_actor.with_items(products).with_snapshot(snapshot);
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        // 2. Auth service, sharing the same store for its session
        let (auth_service, auth_client) =
            AuthService::new(buffer_size, Arc::clone(&store), config.login_latency);
        let auth_handle = tokio::spawn(auth_service.run());

        Ok(Self {
            catalog_client,
            auth_client,
            handles: vec![catalog_handle, auth_handle],
        })
    }

    /// Drops the clients, which closes the actor channels, then waits for
    /// every actor to finish. Clones held elsewhere keep their actor alive.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.catalog_client);
        drop(self.auth_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
