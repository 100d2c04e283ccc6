use std::sync::Arc;

use crate::config::Backend;
use crate::store::{MemoryStore, NoteStore, PgStore, SettingsStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
    pub settings: Arc<dyn SettingsStore>,
}

impl AppState {
    /// Both stores backed by one shared backend.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: NoteStore + SettingsStore + 'static,
    {
        AppState {
            notes: store.clone(),
            settings: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Opens the configured backend. Postgres gets its migrations applied first.
    pub async fn open(backend: &Backend) -> Result<Self, StoreError> {
        match backend {
            Backend::Memory => {
                tracing::warn!("using in-memory store, data is lost on shutdown");
                Ok(Self::in_memory())
            }
            Backend::Postgres { url, pool_size } => {
                let store = PgStore::connect(url, *pool_size).await?;
                store.migrate().await?;
                Ok(Self::with_store(Arc::new(store)))
            }
        }
    }
}
