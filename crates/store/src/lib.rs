//! Trip and master-list persistence behind async repository traits.

use std::sync::Arc;

use tracing::debug;

use packwise_core::config::{StorageBackend, StorageConfig};

pub mod repositories;

pub use repositories::{
    InMemoryTemplateRepository, InMemoryTripRepository, JsonFileStore, RepositoryError,
    TemplateRepository, TripRepository,
};

/// The repositories selected by the storage configuration.
#[derive(Clone)]
pub struct Repositories {
    pub trips: Arc<dyn TripRepository>,
    pub templates: Arc<dyn TemplateRepository>,
}

impl Repositories {
    pub fn from_config(storage: &StorageConfig) -> Self {
        debug!(
            event_name = "store.opened",
            backend = ?storage.backend,
            data_dir = %storage.data_dir.display(),
            "opening repositories"
        );
        match storage.backend {
            StorageBackend::Json => {
                let store = Arc::new(JsonFileStore::new(storage.data_dir.clone()));
                Self { trips: store.clone(), templates: store }
            }
            StorageBackend::Memory => Self::in_memory(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            trips: Arc::new(InMemoryTripRepository::default()),
            templates: Arc::new(InMemoryTemplateRepository::default()),
        }
    }
}
